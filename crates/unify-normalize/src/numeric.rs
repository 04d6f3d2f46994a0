//! Numeric normalization utilities.

use serde_json::Value;

use crate::outcome::{Normalized, is_null_like};

/// Parses a provider number such as `1,234.56`, `12,5`, or `3.2%`.
///
/// A percent sign anywhere divides the result by 100. Commas are thousands
/// separators when a `.` is also present, when there are several of them, or
/// when exactly three digits follow the only one; otherwise a lone comma is
/// the decimal point.
pub fn normalize_float(raw: &str) -> Normalized<f64> {
    let trimmed = raw.trim();
    if is_null_like(trimmed) {
        return Normalized::Absent;
    }

    let is_percent = trimmed.contains('%');
    let cleaned: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | ','))
        .collect();
    let candidate = resolve_commas(&cleaned);

    match candidate.parse::<f64>() {
        Ok(value) if is_percent => Normalized::Value(value / 100.0),
        Ok(value) => Normalized::Value(value),
        Err(_) => Normalized::Unchanged(trimmed.to_string()),
    }
}

/// Float normalization followed by round-half-to-even.
pub fn normalize_int(raw: &str) -> Normalized<i64> {
    normalize_float(raw).map(round_to_i64)
}

/// Like [`normalize_float`] but passes native JSON numbers through.
pub fn normalize_float_value(value: &Value) -> Normalized<f64> {
    match value {
        Value::Null => Normalized::Absent,
        Value::Number(number) => number
            .as_f64()
            .map_or_else(|| Normalized::Unchanged(number.to_string()), Normalized::Value),
        Value::String(text) => normalize_float(text),
        other => Normalized::Unchanged(other.to_string()),
    }
}

/// Like [`normalize_int`] but passes native integers through and rounds floats.
pub fn normalize_int_value(value: &Value) -> Normalized<i64> {
    match value {
        Value::Number(number) => match number.as_i64() {
            Some(int) => Normalized::Value(int),
            None => normalize_float_value(value).map(round_to_i64),
        },
        _ => normalize_float_value(value).map(round_to_i64),
    }
}

fn resolve_commas(cleaned: &str) -> String {
    if !cleaned.contains(',') {
        return cleaned.to_string();
    }
    if cleaned.contains('.') {
        return cleaned.replace(',', "");
    }
    let segments: Vec<&str> = cleaned.split(',').collect();
    match segments.as_slice() {
        [_, fraction] if fraction.len() != 3 => cleaned.replace(',', "."),
        _ => cleaned.replace(',', ""),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn round_to_i64(value: f64) -> i64 {
    value.round_ties_even() as i64
}
