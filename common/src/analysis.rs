//! Column analysis backing the filter editor.
//!
//! An analysis is computed on demand each time the editor opens for a column
//! and always runs over the full base dataset, never the filtered view, so
//! that the range offered by a numeric editor does not shrink as filters are
//! applied.

use crate::config::NUMERIC_COLUMN_THRESHOLD;
use crate::model::row::Row;
use std::collections::BTreeSet;

/// Derived description of one column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnAnalysis {
    pub name: String,
    pub kind: ColumnKind,
    /// Count of non-null, non-empty values.
    pub total_values: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnKind {
    Numeric { min: f64, max: f64, avg: f64 },
    /// Distinct stringified values, sorted.
    Categorical { unique_values: BTreeSet<String> },
}

impl ColumnAnalysis {
    /// Analysis of a column with no usable values.
    pub fn empty(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: ColumnKind::Categorical {
                unique_values: BTreeSet::new(),
            },
            total_values: 0,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.kind, ColumnKind::Numeric { .. })
    }

    pub fn unique_values(&self) -> Option<&BTreeSet<String>> {
        match &self.kind {
            ColumnKind::Categorical { unique_values } => Some(unique_values),
            ColumnKind::Numeric { .. } => None,
        }
    }
}

/// Analyzes `name` over `rows`.
///
/// Returns an empty analysis when `rows` is empty or when the first row does
/// not have the column. A column is numeric when at least
/// [`NUMERIC_COLUMN_THRESHOLD`] of its non-blank values parse as numbers; the
/// min/max/avg are then computed over the values that do.
pub fn analyze_column(rows: &[Row], name: &str) -> ColumnAnalysis {
    let Some(first) = rows.first() else {
        return ColumnAnalysis::empty(name);
    };
    if !first.contains_key(name) {
        return ColumnAnalysis::empty(name);
    }

    let values: Vec<_> = rows
        .iter()
        .filter_map(|row| row.get(name))
        .filter(|v| !v.is_blank())
        .collect();
    let numbers: Vec<f64> = values.iter().filter_map(|v| v.as_number()).collect();

    let total_values = values.len();
    let numeric =
        total_values > 0 && numbers.len() as f64 >= total_values as f64 * NUMERIC_COLUMN_THRESHOLD;

    let kind = if numeric {
        let min = numbers.iter().copied().fold(f64::INFINITY, f64::min);
        let max = numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let avg = numbers.iter().sum::<f64>() / numbers.len() as f64;
        log::debug!("numeric column {}: min={} max={} avg={}", name, min, max, avg);
        ColumnKind::Numeric { min, max, avg }
    } else {
        let unique_values: BTreeSet<String> = values.iter().map(|v| v.to_string()).collect();
        log::debug!(
            "categorical column {}: {} unique values",
            name,
            unique_values.len()
        );
        ColumnKind::Categorical { unique_values }
    };

    ColumnAnalysis {
        name: name.to_string(),
        kind,
        total_values,
    }
}
