//! Number formatting and script-safe JSON for the HTML document.

use serde::Serialize;

/// Formats a dollar amount rounded to whole dollars with thousands
/// separators, e.g. `$52,340`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn format_dollars(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Serializes `value` as JSON that can be embedded in a `<script>` element
/// without terminating it early.
///
/// # Errors
///
/// Returns [`serde_json::Error`] if serialization fails.
pub fn script_safe_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}
