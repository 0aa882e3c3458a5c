//! Turning uploaded files into datasets.
//!
//! The upload control dispatches on the file extension only; there is no
//! content sniffing. Each parser yields rows keyed by header name:
//!
//! - CSV: the delimiter is guessed from the header line, header cells are
//!   trimmed, blank lines are skipped and cells are typed (numbers, booleans,
//!   empty cells become null).
//! - Excel: first worksheet only, first row is the header, empty cells are
//!   left out of the row.
//! - JSON: an array of objects, or a single object.

use crate::config::{CSV_DELIMITER_CANDIDATES, MAX_UPLOAD_MB, SUPPORTED_EXTENSIONS};
use crate::error::{ExplorerError, Result};
use crate::model::row::{CellValue, Dataset, Row};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::io::Cursor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Csv,
    Excel,
    Json,
}

impl FileKind {
    pub fn from_file_name(name: &str) -> Result<Self> {
        let lower = name.to_lowercase();
        let extension = lower
            .rfind('.')
            .map(|idx| &lower[idx..])
            .filter(|ext| SUPPORTED_EXTENSIONS.contains(ext))
            .ok_or_else(|| ExplorerError::UnsupportedFileType(name.to_string()))?;
        Ok(match extension {
            ".csv" => FileKind::Csv,
            ".json" => FileKind::Json,
            _ => FileKind::Excel,
        })
    }

    pub fn label(self) -> &'static str {
        match self {
            FileKind::Csv => "CSV",
            FileKind::Excel => "Excel",
            FileKind::Json => "JSON",
        }
    }
}

/// Checks name and size before the file is read.
pub fn validate_upload(name: &str, size_bytes: u64) -> Result<FileKind> {
    let kind = FileKind::from_file_name(name)?;
    let size_mb = size_bytes as f64 / (1024.0 * 1024.0);
    if size_mb > MAX_UPLOAD_MB as f64 {
        return Err(ExplorerError::FileTooLarge {
            size_mb,
            limit_mb: MAX_UPLOAD_MB,
        });
    }
    Ok(kind)
}

pub fn parse_file(kind: FileKind, bytes: &[u8]) -> Result<Dataset> {
    match kind {
        FileKind::Csv => parse_csv(&String::from_utf8_lossy(bytes)),
        FileKind::Json => parse_json(&String::from_utf8_lossy(bytes)),
        FileKind::Excel => parse_excel(bytes),
    }
}

/// Picks the candidate delimiter that occurs most often in `header_line`.
/// Ties go to the earlier candidate; a line with none of them yields `,`.
pub fn guess_delimiter(header_line: &str) -> u8 {
    let mut best = b',';
    let mut best_count = 0;
    for candidate in CSV_DELIMITER_CANDIDATES {
        let count = header_line.bytes().filter(|&b| b == candidate).count();
        if count > best_count {
            best = candidate;
            best_count = count;
        }
    }
    best
}

fn infer_cell(raw: &str) -> CellValue {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return CellValue::Null;
    }
    if let Some(n) = trimmed.parse::<f64>().ok().filter(|n| n.is_finite()) {
        return CellValue::Number(n);
    }
    match trimmed.to_ascii_lowercase().as_str() {
        "true" => CellValue::Bool(true),
        "false" => CellValue::Bool(false),
        _ => CellValue::Text(raw.to_string()),
    }
}

pub fn parse_csv(text: &str) -> Result<Dataset> {
    let text = text.trim_start_matches('\u{feff}');
    let header_line = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    let delimiter = guess_delimiter(header_line);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ExplorerError::load_failure("Error parsing CSV file", e))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Dataset::new();
    for record in reader.records() {
        let record = record.map_err(|e| ExplorerError::load_failure("Error parsing CSV file", e))?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(header, cell)| (header.clone(), infer_cell(cell)))
            .collect();
        rows.push(row);
    }
    log::info!(
        "parsed CSV: {} records, {} columns, delimiter {:?}",
        rows.len(),
        headers.len(),
        delimiter as char
    );
    Ok(rows)
}

pub fn parse_json(text: &str) -> Result<Dataset> {
    let value: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| ExplorerError::load_failure("Error parsing JSON file", e))?;
    let items = match value {
        serde_json::Value::Array(items) => items,
        object @ serde_json::Value::Object(_) => vec![object],
        _ => {
            return Err(ExplorerError::LoadFailure(
                "Error parsing JSON file: expected an object or an array of objects".into(),
            ));
        }
    };

    let mut skipped = 0usize;
    let rows: Dataset = items
        .iter()
        .filter_map(|item| match item {
            serde_json::Value::Object(map) => Some(
                map.iter()
                    .map(|(k, v)| (k.clone(), CellValue::from_json(v)))
                    .collect::<Row>(),
            ),
            _ => {
                skipped += 1;
                None
            }
        })
        .collect();
    if skipped > 0 {
        log::warn!("skipped {} JSON array items that are not objects", skipped);
    }
    Ok(rows)
}

fn excel_cell(data: &Data) -> Option<CellValue> {
    match data {
        Data::Empty => None,
        Data::Bool(b) => Some(CellValue::Bool(*b)),
        Data::Int(i) => Some(CellValue::Number(*i as f64)),
        Data::Float(f) => Some(CellValue::Number(*f)),
        Data::String(s) => Some(CellValue::Text(s.clone())),
        Data::DateTime(dt) => Some(CellValue::Number(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(CellValue::Text(s.clone())),
        Data::Error(e) => Some(CellValue::Text(format!("#{:?}", e))),
    }
}

pub fn parse_excel(bytes: &[u8]) -> Result<Dataset> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| ExplorerError::load_failure("Error parsing Excel file", e))?;
    let first_sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ExplorerError::LoadFailure("Error parsing Excel file: no sheets".into()))?;
    let range = workbook
        .worksheet_range(&first_sheet)
        .map_err(|e| ExplorerError::load_failure("Error parsing Excel file", e))?;

    let mut sheet_rows = range.rows();
    let Some(header_cells) = sheet_rows.next() else {
        return Ok(Dataset::new());
    };
    let headers: Vec<String> = header_cells
        .iter()
        .enumerate()
        .map(|(idx, cell)| match cell {
            Data::Empty => format!("__EMPTY_{}", idx),
            other => other.to_string().trim().to_string(),
        })
        .collect();

    let rows: Dataset = sheet_rows
        .map(|cells| {
            headers
                .iter()
                .zip(cells)
                .filter_map(|(header, cell)| excel_cell(cell).map(|v| (header.clone(), v)))
                .collect::<Row>()
        })
        .filter(|row| !row.is_empty())
        .collect();
    log::info!("parsed Excel sheet {}: {} records", first_sheet, rows.len());
    Ok(rows)
}

/// Writes `rows` as CSV, using the first row's columns as the header.
pub fn to_csv(rows: &[Row]) -> Result<String> {
    let columns: Vec<&String> = rows.first().map(|r| r.keys().collect()).unwrap_or_default();
    let mut writer = csv::Writer::from_writer(Vec::new());
    let write_err = |e: csv::Error| ExplorerError::load_failure("Error writing CSV", e);

    writer.write_record(&columns).map_err(write_err)?;
    for row in rows {
        let record = columns.iter().map(|column| match row.get(*column) {
            Some(CellValue::Null) | None => String::new(),
            Some(value) => value.to_string(),
        });
        writer.write_record(record).map_err(write_err)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ExplorerError::load_failure("Error writing CSV", e))?;
    String::from_utf8(bytes).map_err(|e| ExplorerError::load_failure("Error writing CSV", e))
}
