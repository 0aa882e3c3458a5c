//! Grouping and aggregation behind the bundled pivot widget.
//!
//! The controller never calls into this module; it is what the frontend's
//! widget draws from. Only a handful of named aggregators and renderers are
//! provided.

use crate::model::pivot::PivotConfig;
use crate::model::row::Row;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aggregator {
    Count,
    CountUniqueValues,
    Sum,
    Average,
    Minimum,
    Maximum,
}

impl Aggregator {
    pub const ALL: [Aggregator; 6] = [
        Aggregator::Count,
        Aggregator::CountUniqueValues,
        Aggregator::Sum,
        Aggregator::Average,
        Aggregator::Minimum,
        Aggregator::Maximum,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Aggregator::Count => "Count",
            Aggregator::CountUniqueValues => "Count Unique Values",
            Aggregator::Sum => "Sum",
            Aggregator::Average => "Average",
            Aggregator::Minimum => "Minimum",
            Aggregator::Maximum => "Maximum",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }

    /// Whether the aggregator reads a value field.
    pub fn needs_value_field(self) -> bool {
        !matches!(self, Aggregator::Count)
    }

    /// Count-like results are integers.
    pub fn is_count(self) -> bool {
        matches!(self, Aggregator::Count | Aggregator::CountUniqueValues)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RendererKind {
    Table,
    Heatmap,
    BarChart,
}

impl RendererKind {
    pub const ALL: [RendererKind; 3] =
        [RendererKind::Table, RendererKind::Heatmap, RendererKind::BarChart];

    pub fn name(self) -> &'static str {
        match self {
            RendererKind::Table => "Table",
            RendererKind::Heatmap => "Heatmap",
            RendererKind::BarChart => "Bar Chart",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.name() == name)
    }
}

#[derive(Debug, Clone, Default)]
struct Accumulator {
    count: usize,
    numeric: usize,
    sum: f64,
    min: Option<f64>,
    max: Option<f64>,
    uniques: HashSet<String>,
}

impl Accumulator {
    fn push(&mut self, aggregator: Aggregator, row: &Row, value_field: Option<&str>) {
        self.count += 1;
        if !aggregator.needs_value_field() {
            return;
        }
        let Some(value) = value_field.and_then(|f| row.get(f)) else {
            return;
        };
        if aggregator == Aggregator::CountUniqueValues {
            self.uniques.insert(value.to_string());
            return;
        }
        if let Some(n) = value.as_number() {
            self.numeric += 1;
            self.sum += n;
            self.min = Some(self.min.map_or(n, |m| m.min(n)));
            self.max = Some(self.max.map_or(n, |m| m.max(n)));
        }
    }

    fn value(&self, aggregator: Aggregator) -> Option<f64> {
        match aggregator {
            Aggregator::Count => Some(self.count as f64),
            Aggregator::CountUniqueValues => Some(self.uniques.len() as f64),
            Aggregator::Sum => Some(self.sum),
            Aggregator::Average => (self.numeric > 0).then(|| self.sum / self.numeric as f64),
            Aggregator::Minimum => self.min,
            Aggregator::Maximum => self.max,
        }
    }
}

type Key = Vec<String>;

/// Cross-tabulation of a row set under one configuration.
#[derive(Debug, Clone)]
pub struct PivotTable {
    pub aggregator: Aggregator,
    pub row_keys: Vec<Key>,
    pub col_keys: Vec<Key>,
    cells: HashMap<(Key, Key), Accumulator>,
    row_totals: HashMap<Key, Accumulator>,
    col_totals: HashMap<Key, Accumulator>,
    grand_total: Accumulator,
}

impl PivotTable {
    /// Groups `rows` by the configuration's row and column fields. Unknown
    /// aggregator names fall back to `Count`; a missing group value is
    /// keyed as `null`.
    pub fn build(rows: &[Row], config: &PivotConfig) -> Self {
        let aggregator = Aggregator::from_name(&config.aggregator_name).unwrap_or(Aggregator::Count);
        let value_field = config.value_fields.first().map(String::as_str);

        let mut table = Self {
            aggregator,
            row_keys: Vec::new(),
            col_keys: Vec::new(),
            cells: HashMap::new(),
            row_totals: HashMap::new(),
            col_totals: HashMap::new(),
            grand_total: Accumulator::default(),
        };

        for row in rows {
            let row_key = group_key(row, &config.row_fields);
            let col_key = group_key(row, &config.col_fields);

            table
                .cells
                .entry((row_key.clone(), col_key.clone()))
                .or_default()
                .push(aggregator, row, value_field);
            table
                .row_totals
                .entry(row_key)
                .or_default()
                .push(aggregator, row, value_field);
            table
                .col_totals
                .entry(col_key)
                .or_default()
                .push(aggregator, row, value_field);
            table.grand_total.push(aggregator, row, value_field);
        }

        table.row_keys = table.row_totals.keys().cloned().collect();
        table.col_keys = table.col_totals.keys().cloned().collect();
        table.row_keys.sort_by(|a, b| compare_keys(a, b));
        table.col_keys.sort_by(|a, b| compare_keys(a, b));
        table
    }

    pub fn value(&self, row_key: &[String], col_key: &[String]) -> Option<f64> {
        self.cells
            .get(&(row_key.to_vec(), col_key.to_vec()))
            .and_then(|acc| acc.value(self.aggregator))
    }

    pub fn row_total(&self, row_key: &[String]) -> Option<f64> {
        self.row_totals.get(row_key).and_then(|acc| acc.value(self.aggregator))
    }

    pub fn col_total(&self, col_key: &[String]) -> Option<f64> {
        self.col_totals.get(col_key).and_then(|acc| acc.value(self.aggregator))
    }

    pub fn grand_total(&self) -> Option<f64> {
        self.grand_total.value(self.aggregator)
    }

    /// Smallest and largest cell value, used for heatmap shading.
    pub fn cell_range(&self) -> Option<(f64, f64)> {
        self.cells
            .values()
            .filter_map(|acc| acc.value(self.aggregator))
            .fold(None, |range, v| match range {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

fn group_key(row: &Row, fields: &[String]) -> Key {
    fields
        .iter()
        .map(|f| row.get(f).map_or_else(|| "null".to_string(), |v| v.to_string()))
        .collect()
}

/// Numbers sort numerically and before text; text sorts lexically.
fn compare_values(a: &str, b: &str) -> Ordering {
    match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

fn compare_keys(a: &[String], b: &[String]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(x, y)| compare_values(x, y))
        .find(|o| o.is_ne())
        .unwrap_or_else(|| a.len().cmp(&b.len()))
}
