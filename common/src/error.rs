use thiserror::Error;

/// Failures surfaced to the user as transient notices.
///
/// The `Display` text of every variant is the message shown in the toast, so
/// it is phrased for the end user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExplorerError {
    /// A network request, file read or parse step failed.
    #[error("{0}")]
    LoadFailure(String),
    /// The backend query succeeded but produced no rows.
    #[error("Query returned no results")]
    EmptyResult,
    #[error("Please upload CSV, Excel, or JSON files ({0} is not supported)")]
    UnsupportedFileType(String),
    #[error("File too large (max {limit_mb}MB)")]
    FileTooLarge { size_mb: f64, limit_mb: u32 },
    #[error("Configuration {0} not found")]
    ConfigNotFound(String),
    /// A header interception resolved to a column the dataset does not have.
    #[error("Column \"{0}\" not found in data")]
    ColumnNotFound(String),
    #[error("No configuration to save - modify the pivot table first")]
    NothingToSave,
    #[error("No data loaded")]
    NoData,
}

pub type Result<T> = std::result::Result<T, ExplorerError>;

impl ExplorerError {
    pub fn load_failure(context: &str, err: impl std::fmt::Display) -> Self {
        ExplorerError::LoadFailure(format!("{}: {}", context, err))
    }

    /// A request that reached the server but was answered with a non-success
    /// `status`. The server's explanation, when there is one, is appended.
    pub fn rejected(context: &str, status: u16, detail: &str) -> Self {
        let detail = detail.trim();
        if detail.is_empty() {
            ExplorerError::LoadFailure(format!("{} (HTTP {})", context, status))
        } else {
            ExplorerError::LoadFailure(format!("{} (HTTP {}): {}", context, status, detail))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rejected_requests_name_the_status() {
        assert_eq!(
            ExplorerError::rejected("Could not load default query from backend", 503, "").to_string(),
            "Could not load default query from backend (HTTP 503)"
        );
        assert_eq!(
            ExplorerError::rejected("Error executing backend query", 400, "no such table: t\n")
                .to_string(),
            "Error executing backend query (HTTP 400): no such table: t"
        );
    }

    #[test]
    fn connection_failures_keep_the_cause() {
        assert_eq!(
            ExplorerError::load_failure("Failed to connect to backend", "TypeError: fetch failed")
                .to_string(),
            "Failed to connect to backend: TypeError: fetch failed"
        );
    }
}
