use common::gesture::TapTracker;
use common::model::pivot::PivotConfig;
use common::model::row::Row;
use common::pivot::PivotTable;
use std::cell::RefCell;
use std::rc::Rc;

pub struct PivotWidget {
    /// Working copy of the configuration; the widget's own UI edits this.
    pub config: PivotConfig,
    pub table: PivotTable,
    /// Every field the widget offers, in first-record order.
    pub attributes: Vec<String>,
    /// Generation to report from the next `rendered` call.
    pub pending_refresh: Option<u64>,
    /// Shared with the touch handlers, which classify synchronously.
    pub tap_tracker: Rc<RefCell<TapTracker>>,
}

impl PivotWidget {
    pub fn new(rows: &[Row], config: PivotConfig, generation: u64) -> Self {
        Self {
            table: PivotTable::build(rows, &config),
            attributes: attributes_of(rows, &config),
            config,
            pending_refresh: Some(generation),
            tap_tracker: Rc::default(),
        }
    }

    pub fn reset(&mut self, rows: &[Row], config: PivotConfig, generation: u64) {
        self.attributes = attributes_of(rows, &config);
        self.table = PivotTable::build(rows, &config);
        self.config = config;
        self.pending_refresh = Some(generation);
    }

    pub fn rebuild(&mut self, rows: &[Row], generation: u64) {
        self.table = PivotTable::build(rows, &self.config);
        self.pending_refresh = Some(generation);
    }
}

/// Columns of the first record, followed by configured fields the data does
/// not have.
fn attributes_of(rows: &[Row], config: &PivotConfig) -> Vec<String> {
    let mut attributes: Vec<String> = rows
        .first()
        .map(|row| row.keys().cloned().collect())
        .unwrap_or_default();
    for field in config
        .row_fields
        .iter()
        .chain(&config.col_fields)
        .chain(&config.value_fields)
    {
        if !attributes.contains(field) {
            attributes.push(field.clone());
        }
    }
    attributes
}
