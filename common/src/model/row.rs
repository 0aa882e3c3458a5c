use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single scalar cell. Values are not strongly typed: numeric-ness is
/// inferred when a column is analyzed or filtered, never declared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Numeric reading of the value, if it has one.
    ///
    /// Text is trimmed before parsing. Non-finite results (`NaN`, `inf`) are
    /// not considered numbers.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if n.is_finite() => Some(*n),
            CellValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    /// `true` for null and for the empty string. Blank values are ignored by
    /// column analysis.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Builds a cell from an arbitrary JSON value. Arrays and objects are kept
    /// as their JSON text.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => CellValue::Null,
            serde_json::Value::Bool(b) => CellValue::Bool(*b),
            serde_json::Value::Number(n) => n.as_f64().map_or(CellValue::Null, CellValue::Number),
            serde_json::Value::String(s) => CellValue::Text(s.clone()),
            other => CellValue::Text(other.to_string()),
        }
    }
}

/// Stringified form used for categorical comparison and display.
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => f.write_str("null"),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

/// Ordered mapping from column name to value. Every row of a dataset shares
/// the header-driven column set, although individual rows may omit keys.
pub type Row = IndexMap<String, CellValue>;

/// A loaded dataset. Replaced wholesale on every load, never mutated in place.
pub type Dataset = Vec<Row>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn stringifies_like_the_categorical_filter_expects() {
        assert_eq!(CellValue::Number(10.0).to_string(), "10");
        assert_eq!(CellValue::Number(2.5).to_string(), "2.5");
        assert_eq!(CellValue::Bool(true).to_string(), "true");
        assert_eq!(CellValue::Null.to_string(), "null");
        assert_eq!(CellValue::from("North").to_string(), "North");
    }

    #[test]
    fn numeric_reading_trims_text_and_rejects_non_finite() {
        assert_eq!(CellValue::from(" 42 ").as_number(), Some(42.0));
        assert_eq!(CellValue::from("NaN").as_number(), None);
        assert_eq!(CellValue::from("inf").as_number(), None);
        assert_eq!(CellValue::from("abc").as_number(), None);
        assert_eq!(CellValue::Bool(true).as_number(), None);
        assert_eq!(CellValue::Null.as_number(), None);
    }

    #[test]
    fn rows_deserialize_from_wire_json_in_column_order() {
        let row: Row =
            serde_json::from_str(r#"{"driver":"Ayrton","year":1988,"points":null,"won":true}"#)
                .unwrap();
        let keys: Vec<&str> = row.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["driver", "year", "points", "won"]);
        assert_eq!(row["year"], CellValue::Number(1988.0));
        assert_eq!(row["points"], CellValue::Null);
        assert_eq!(row["won"], CellValue::Bool(true));
    }

    #[test]
    fn nested_json_is_kept_as_text() {
        let value = serde_json::json!({"a": [1, 2]});
        assert_eq!(CellValue::from_json(&value), CellValue::from(r#"{"a":[1,2]}"#));
    }
}
