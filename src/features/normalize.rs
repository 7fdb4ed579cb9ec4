use serde_json::Value;

/// Coerce an arbitrary JSON value into a float.
///
/// Field readings arrive from submission forms in whatever shape the client
/// sent: plain numbers, numeric strings with units ("12.5kg", "30 ppt"),
/// booleans, or nothing at all. Every shape collapses to a float; there is
/// no error path.
pub fn numeric_value(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => {
            // Keep digits, sign, and decimal point; drop units and symbols
            let cleaned: String = s
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                .collect();
            if cleaned.is_empty() {
                0.0
            } else {
                cleaned.parse().unwrap_or(0.0)
            }
        }
        _ => 0.0,
    }
}
