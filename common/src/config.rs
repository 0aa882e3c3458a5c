//! Application constants shared by the backend and the browser client.
//!
//! These are fixed at build time. Server-side settings that vary per
//! deployment (bind address, database path) are read from the environment by
//! the backend instead.

/// Maximum accepted upload size.
pub const MAX_UPLOAD_MB: u32 = 50;

/// File extensions accepted by the upload control, lowercase with the dot.
pub const SUPPORTED_EXTENSIONS: [&str; 4] = [".csv", ".xlsx", ".xls", ".json"];

pub const DEFAULT_RENDERER: &str = "Table";
pub const DEFAULT_AGGREGATOR: &str = "Count";
pub const THOUSANDS_SEPARATOR: &str = ",";
pub const DECIMAL_SEPARATOR: &str = ".";
pub const DIGITS_AFTER_DECIMAL: usize = 2;

/// Share of non-blank values that must parse as numbers for a column to be
/// treated as numeric. Not configurable.
pub const NUMERIC_COLUMN_THRESHOLD: f64 = 0.8;

/// A touch on a column header counts as a tap (and opens the filter editor)
/// only if it moves less than this many pixels...
pub const TAP_MAX_DISTANCE_PX: f64 = 10.0;
/// ...and lifts within this many milliseconds.
pub const TAP_MAX_DURATION_MS: f64 = 500.0;

/// Delay after a render request before header interception is re-bound when
/// the widget's own completion signal has not arrived.
pub const RENDER_SETTLE_FALLBACK_MS: u32 = 200;

pub const TOAST_DURATION_MS: u32 = 3000;

/// Delimiters considered when sniffing a CSV header line.
pub const CSV_DELIMITER_CANDIDATES: [u8; 4] = [b',', b'\t', b'|', b';'];

pub const SAMPLE_DATA_PATH: &str = "/data/sample.csv";
pub const DEFAULT_QUERY_PATH: &str = "/api/default-query";
pub const SUBMIT_INPUT_PATH: &str = "/api/submit-input";
