use crate::config::{DEFAULT_AGGREGATOR, DEFAULT_RENDERER};
use serde::{Deserialize, Serialize};

/// Declarative pivot configuration shared between the controller and the
/// pivot widget.
///
/// The widget is the primary mutator (its own drag-and-drop UI reports new
/// configurations), the controller the secondary one (loading a saved
/// configuration). Field lists are plain column names and may reference
/// columns that are absent from the currently loaded dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PivotConfig {
    /// Fields grouped on the row axis, outermost first.
    #[serde(rename = "rows", default)]
    pub row_fields: Vec<String>,
    /// Fields grouped on the column axis, outermost first.
    #[serde(rename = "cols", default)]
    pub col_fields: Vec<String>,
    /// Fields fed to the aggregator.
    #[serde(rename = "vals", default)]
    pub value_fields: Vec<String>,
    #[serde(default = "default_aggregator_name")]
    pub aggregator_name: String,
    #[serde(default = "default_renderer_name")]
    pub renderer_name: String,
    /// Renderer-specific options, opaque to the controller.
    #[serde(default)]
    pub renderer_options: serde_json::Map<String, serde_json::Value>,
}

fn default_aggregator_name() -> String {
    DEFAULT_AGGREGATOR.to_string()
}

fn default_renderer_name() -> String {
    DEFAULT_RENDERER.to_string()
}

impl Default for PivotConfig {
    fn default() -> Self {
        Self {
            row_fields: Vec::new(),
            col_fields: Vec::new(),
            value_fields: Vec::new(),
            aggregator_name: default_aggregator_name(),
            renderer_name: default_renderer_name(),
            renderer_options: serde_json::Map::new(),
        }
    }
}

impl PivotConfig {
    /// `true` when at least one field sits on the row, column or value axis.
    pub fn has_field_selections(&self) -> bool {
        !(self.row_fields.is_empty() && self.col_fields.is_empty() && self.value_fields.is_empty())
    }

    /// One-line description used in log output.
    pub fn summary(&self) -> String {
        format!(
            "rows=[{}], cols=[{}], vals=[{}], aggregator={}, renderer={}",
            self.row_fields.join(","),
            self.col_fields.join(","),
            self.value_fields.join(","),
            self.aggregator_name,
            self.renderer_name
        )
    }

    /// Whether `column` currently sits on the row or column axis.
    pub fn is_on_axis(&self, column: &str) -> bool {
        self.row_fields.iter().chain(&self.col_fields).any(|f| f == column)
    }
}

/// Which axis container a field chip lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Unused,
    Rows,
    Cols,
}

impl PivotConfig {
    /// Moves `field` to the end of `axis`, removing it from wherever it was.
    pub fn move_field(&mut self, field: &str, axis: Axis) {
        self.row_fields.retain(|f| f != field);
        self.col_fields.retain(|f| f != field);
        match axis {
            Axis::Rows => self.row_fields.push(field.to_string()),
            Axis::Cols => self.col_fields.push(field.to_string()),
            Axis::Unused => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_has_no_selections() {
        let config = PivotConfig::default();
        assert!(!config.has_field_selections());
        assert_eq!(config.aggregator_name, "Count");
        assert_eq!(config.renderer_name, "Table");
    }

    #[test]
    fn any_axis_counts_as_a_selection() {
        let mut config = PivotConfig::default();
        config.value_fields.push("Sales".into());
        assert!(config.has_field_selections());
    }

    #[test]
    fn deserializes_widget_shaped_json_with_defaults() {
        let config: PivotConfig =
            serde_json::from_str(r#"{"rows":["Region"],"cols":[],"vals":["Sales"]}"#).unwrap();
        assert_eq!(config.row_fields, vec!["Region".to_string()]);
        assert_eq!(config.value_fields, vec!["Sales".to_string()]);
        assert_eq!(config.aggregator_name, "Count");
        assert_eq!(config.renderer_name, "Table");
    }

    #[test]
    fn move_field_keeps_a_field_on_one_axis() {
        let mut config = PivotConfig::default();
        config.move_field("Region", Axis::Rows);
        config.move_field("Quarter", Axis::Rows);
        config.move_field("Region", Axis::Cols);
        assert_eq!(config.row_fields, vec!["Quarter".to_string()]);
        assert_eq!(config.col_fields, vec!["Region".to_string()]);

        config.move_field("Quarter", Axis::Unused);
        assert!(config.row_fields.is_empty());
    }
}
