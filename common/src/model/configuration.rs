use crate::model::filter::ActiveFilters;
use crate::model::pivot::PivotConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lightweight descriptor of the dataset a configuration was saved against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DatasetFingerprint {
    /// Number of records in the base dataset (not the filtered view).
    pub records: usize,
    /// Column names of the first record, in order.
    pub columns: Vec<String>,
}

/// Deep copy of the live pivot state at a point in time.
///
/// This is also the on-disk shape of an exported configuration file:
/// `{ pivotConfig, activeFilters, timestamp, dataInfo: { records, columns } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationSnapshot {
    pub pivot_config: PivotConfig,
    #[serde(default)]
    pub active_filters: ActiveFilters,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub data_info: DatasetFingerprint,
}

/// A named snapshot held in the session's configuration collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedConfiguration {
    /// Sequential name of the form `Config-N`.
    pub name: String,
    #[serde(flatten)]
    pub snapshot: ConfigurationSnapshot,
}

impl ConfigurationSnapshot {
    /// File name used when the snapshot is exported for download.
    pub fn export_file_name(&self) -> String {
        format!("pivot-config-{}.json", self.timestamp.timestamp_millis())
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::filter::ColumnFilter;
    use pretty_assertions::assert_eq;

    fn snapshot() -> ConfigurationSnapshot {
        let mut filters = ActiveFilters::new();
        filters.insert("Region".into(), ColumnFilter::excluding(["South"]));
        ConfigurationSnapshot {
            pivot_config: PivotConfig {
                row_fields: vec!["Region".into()],
                ..PivotConfig::default()
            },
            active_filters: filters,
            timestamp: DateTime::from_timestamp_millis(1_700_000_000_000).unwrap(),
            data_info: DatasetFingerprint {
                records: 10,
                columns: vec!["Region".into(), "Sales".into()],
            },
        }
    }

    #[test]
    fn export_shape_uses_camel_case_keys() {
        let json = serde_json::to_value(snapshot()).unwrap();
        let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["activeFilters", "dataInfo", "pivotConfig", "timestamp"]);
        assert_eq!(json["dataInfo"]["records"], 10);
        assert_eq!(json["pivotConfig"]["rows"][0], "Region");
    }

    #[test]
    fn export_file_parses_back() {
        let original = snapshot();
        let text = original.to_json_pretty().unwrap();
        assert_eq!(ConfigurationSnapshot::from_json(&text).unwrap(), original);
    }

    #[test]
    fn file_without_filters_or_data_info_still_loads() {
        let text = r#"{"pivotConfig":{"rows":["Quarter"]},"timestamp":"2024-03-01T10:00:00Z"}"#;
        let parsed = ConfigurationSnapshot::from_json(text).unwrap();
        assert!(parsed.active_filters.is_empty());
        assert_eq!(parsed.data_info, DatasetFingerprint::default());
    }

    #[test]
    fn export_file_name_carries_millis() {
        assert_eq!(snapshot().export_file_name(), "pivot-config-1700000000000.json");
    }
}
