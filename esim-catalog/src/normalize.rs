//! Conversion of raw spreadsheet cells into typed values.
//!
//! None of these functions fail: a cell that cannot be read as the requested
//! type yields `None`, and deciding whether that matters is left to the
//! validator.

/// Parse a cell as a finite number.
pub fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a cell as a decimal and return its canonical string form.
///
/// `" 9.990 "` becomes `"9.99"`, `"7.0"` becomes `"7"`. Non-numeric, empty,
/// and non-finite (`inf`, `NaN`) input yields `None`.
pub fn parse_decimal(s: &str) -> Option<String> {
    parse_number(s).map(|v| {
        // Normalize negative zero so "-0" and "0" store identically
        let v = if v == 0.0 { 0.0 } else { v };
        v.to_string()
    })
}

/// Parse a cell as a whole number. `"7"` and `"7.0"` are accepted, `"7.5"` is not.
pub fn parse_whole_number(s: &str) -> Option<i64> {
    let v = parse_number(s)?;
    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    if v.fract() != 0.0 || v < i64::MIN as f64 || v >= i64::MAX as f64 {
        return None;
    }
    Some(v as i64)
}

/// Tri-state boolean parse.
///
/// `yes`/`true`/`1`/`y` → `Some(true)`, `no`/`false`/`0`/`n` → `Some(false)`,
/// case-insensitive. Anything else, including an empty cell, is unknown.
pub fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "yes" | "true" | "1" | "y" => Some(true),
        "no" | "false" | "0" | "n" => Some(false),
        _ => None,
    }
}

/// Trim a cell, mapping blank text to `None`.
pub fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
