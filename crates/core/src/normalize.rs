//! Normalization helpers for heterogeneous catalog metadata.
//!
//! Platform usage figures arrive as free-text strings ("22,000,000",
//! "22M") and audience blobs as loosely-shaped JSON. These helpers resolve
//! both into typed values once, at the storage boundary.

use serde_json::Value;

/// Parse a human-entered count string into a number.
///
/// Accepts digit grouping separators (`,`, `_`, spaces) and the
/// suffixes `k`/`m`/`b` (case-insensitive, decimal mantissa allowed).
/// Returns `None` for anything that does not resolve to a non-negative
/// count.
pub fn parse_count(raw: &str) -> Option<u64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '_' | ' '))
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let (mantissa, multiplier) = match cleaned.chars().last() {
        Some('k') | Some('K') => (&cleaned[..cleaned.len() - 1], 1_000.0),
        Some('m') | Some('M') => (&cleaned[..cleaned.len() - 1], 1_000_000.0),
        Some('b') | Some('B') => (&cleaned[..cleaned.len() - 1], 1_000_000_000.0),
        _ => (cleaned.as_str(), 1.0),
    };

    let value: f64 = mantissa.parse().ok()?;
    if value < 0.0 || !value.is_finite() {
        return None;
    }
    Some((value * multiplier).round() as u64)
}

/// Resolve a JSON value into a list of non-empty strings.
///
/// Arrays keep their string elements (trimmed, empties dropped); a bare
/// string is promoted to a single-element list; anything else is empty.
pub fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Vec::new()
            } else {
                vec![trimmed.to_string()]
            }
        }
        _ => Vec::new(),
    }
}

/// True when two string lists share at least one element,
/// compared case-insensitively.
pub fn lists_overlap(a: &[String], b: &[String]) -> bool {
    a.iter()
        .any(|x| b.iter().any(|y| x.eq_ignore_ascii_case(y)))
}
