use common::config::{DECIMAL_SEPARATOR, DIGITS_AFTER_DECIMAL};
use num_format::{Locale, ToFormattedString};

/// Formats `value` with thousands separators and `digits` decimals.
pub fn format_number(value: f64, digits: usize) -> String {
    let fixed = format!("{:.*}", digits, value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let grouped = int_part
        .parse::<u64>()
        .map(|n| n.to_formatted_string(&Locale::en))
        .unwrap_or_else(|_| int_part.to_string());

    let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
    let mut out = String::new();
    if value < 0.0 && !is_zero {
        out.push('-');
    }
    out.push_str(&grouped);
    if !frac_part.is_empty() {
        out.push_str(DECIMAL_SEPARATOR);
        out.push_str(frac_part);
    }
    out
}

/// Cell text for an aggregate: counts are whole numbers, everything else
/// gets the configured number of decimals.
pub fn format_aggregate(value: Option<f64>, is_count: bool) -> String {
    match value {
        Some(v) if is_count => format_number(v, 0),
        Some(v) => format_number(v, DIGITS_AFTER_DECIMAL),
        None => String::new(),
    }
}
