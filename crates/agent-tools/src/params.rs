//! Helpers for reading tool arguments and shaping error payloads

use agent_core::{Error, Result};
use serde_json::{Value, json};

/// Payload a data tool returns instead of failing: `{"error": message}`
pub fn error_payload(message: impl std::fmt::Display) -> Value {
    json!({ "error": message.to_string() })
}

/// Read a required, non-empty string argument
pub fn required_str(params: &Value, tool: &str, key: &str) -> Result<String> {
    optional_str(params, key)
        .ok_or_else(|| Error::invalid_input(tool, format!("missing required argument '{key}'")))
}

/// Read an optional string argument, treating blanks as absent
pub fn optional_str(params: &Value, key: &str) -> Option<String> {
    params
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Read an optional numeric argument
///
/// Models send numbers as `5`, `5.0` or `"5"`; all are accepted. Absent, null
/// and blank values are `Ok(None)`. `Err` holds the reason when the value is
/// present but not a finite number.
pub fn optional_number(params: &Value, key: &str) -> std::result::Result<Option<f64>, String> {
    let raw = match params.get(key) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(raw) => raw,
    };
    let number = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number
        .filter(|n| n.is_finite())
        .map(Some)
        .ok_or_else(|| format!("'{key}' must be a number, got {raw}"))
}
