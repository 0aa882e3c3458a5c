use crate::model::row::CellValue;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A per-column predicate applied by the filter store.
///
/// The serialized shape matches the configuration files produced by the
/// export feature: `{"excludedValues": [...]}` for categorical filters and
/// `{"min": .., "max": ..}` for numeric ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnFilter {
    /// Rows pass when their stringified value is not in `excluded_values`.
    Categorical {
        #[serde(rename = "excludedValues")]
        excluded_values: BTreeSet<String>,
    },
    /// Rows pass when their numeric value lies within `[min, max]`. A missing
    /// bound is unbounded on that side.
    NumericRange {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
}

impl ColumnFilter {
    pub fn excluding<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ColumnFilter::Categorical {
            excluded_values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn range(min: Option<f64>, max: Option<f64>) -> Self {
        ColumnFilter::NumericRange { min, max }
    }

    /// Evaluates the predicate for one row's value. `None` means the row has
    /// no entry for the column.
    ///
    /// Missing values pass categorical filters. Values that do not parse as a
    /// number pass numeric filters.
    pub fn passes(&self, value: Option<&CellValue>) -> bool {
        match self {
            ColumnFilter::Categorical { excluded_values } => match value {
                Some(v) => !excluded_values.contains(&v.to_string()),
                None => true,
            },
            ColumnFilter::NumericRange { min, max } => {
                let Some(n) = value.and_then(CellValue::as_number) else {
                    return true;
                };
                min.is_none_or(|lo| n >= lo) && max.is_none_or(|hi| n <= hi)
            }
        }
    }
}

/// Column name to filter. A key exists only while a filter is applied to it.
pub type ActiveFilters = BTreeMap<String, ColumnFilter>;
