//! Canonical dataset plus the active per-column filters.
//!
//! The store never mutates the loaded rows. The filtered view is a pure
//! function of `(base_rows, active_filters)` and is recomputed by callers
//! after every change; when no filter is active it is the base dataset
//! itself, shared rather than copied.

use crate::analysis::{analyze_column, ColumnAnalysis};
use crate::model::configuration::DatasetFingerprint;
use crate::model::filter::{ActiveFilters, ColumnFilter};
use crate::model::row::{Dataset, Row};
use log::info;
use std::rc::Rc;

#[derive(Debug, Clone)]
pub struct FilterStore {
    base_rows: Rc<[Row]>,
    active_filters: ActiveFilters,
}

impl Default for FilterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterStore {
    pub fn new() -> Self {
        Self {
            base_rows: Rc::from(Vec::new()),
            active_filters: ActiveFilters::new(),
        }
    }

    /// Replaces the dataset and clears every filter, including filters on
    /// columns the new dataset does not have. The caller must re-render.
    pub fn load(&mut self, rows: Dataset) {
        let dropped = self.active_filters.len();
        self.base_rows = Rc::from(rows);
        self.active_filters.clear();
        info!(
            "dataset loaded: {} records, {} columns ({} filters cleared)",
            self.base_rows.len(),
            self.column_names().len(),
            dropped
        );
    }

    pub fn base_rows(&self) -> &Rc<[Row]> {
        &self.base_rows
    }

    pub fn is_loaded(&self) -> bool {
        !self.base_rows.is_empty()
    }

    pub fn record_count(&self) -> usize {
        self.base_rows.len()
    }

    /// Column names of the first record, in order.
    pub fn column_names(&self) -> Vec<String> {
        self.base_rows
            .first()
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Whether the first record has `name`. This is the validity check used
    /// before opening a filter editor.
    pub fn has_column(&self, name: &str) -> bool {
        self.base_rows.first().is_some_and(|row| row.contains_key(name))
    }

    pub fn analyze_column(&self, name: &str) -> ColumnAnalysis {
        analyze_column(&self.base_rows, name)
    }

    /// Inserts or replaces the filter for `name`. Categorical filters carry
    /// the complete excluded set; nothing is merged.
    pub fn set_filter(&mut self, name: impl Into<String>, filter: ColumnFilter) {
        let name = name.into();
        info!("filter set on {}: {:?}", name, filter);
        self.active_filters.insert(name, filter);
    }

    /// Removes the filter for `name`. Returns whether one was present.
    pub fn clear_filter(&mut self, name: &str) -> bool {
        let removed = self.active_filters.remove(name).is_some();
        if removed {
            info!("filter cleared on {}", name);
        }
        removed
    }

    pub fn clear_all(&mut self) {
        self.active_filters.clear();
    }

    /// Installs a complete filter map, as restored from a saved configuration.
    pub fn replace_filters(&mut self, filters: ActiveFilters) {
        self.active_filters = filters;
    }

    pub fn active_filters(&self) -> &ActiveFilters {
        &self.active_filters
    }

    pub fn filter(&self, name: &str) -> Option<&ColumnFilter> {
        self.active_filters.get(name)
    }

    pub fn is_filtered(&self, name: &str) -> bool {
        self.active_filters.contains_key(name)
    }

    /// Rows of the base dataset that satisfy every active filter, in their
    /// original order.
    pub fn compute_view(&self) -> Rc<[Row]> {
        if self.active_filters.is_empty() {
            return Rc::clone(&self.base_rows);
        }
        self.base_rows
            .iter()
            .filter(|row| self.row_passes(row))
            .cloned()
            .collect()
    }

    fn row_passes(&self, row: &Row) -> bool {
        self.active_filters
            .iter()
            .all(|(column, filter)| filter.passes(row.get(column)))
    }

    pub fn fingerprint(&self) -> DatasetFingerprint {
        DatasetFingerprint {
            records: self.record_count(),
            columns: self.column_names(),
        }
    }
}
