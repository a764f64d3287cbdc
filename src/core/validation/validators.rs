//! Reusable field validators
//!
//! A validator receives the field name and its value and returns a message
//! when the value is rejected. Absent or mistyped values pass; emptiness is
//! checked once, by the required-field pass of the validation config.

use serde_json::Value;

/// Validator: number must be positive
pub fn positive() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match as_number(value) {
        Some(num) if num <= 0.0 => Err(format!(
            "'{}' must be greater than 0 (value: {})",
            field, num
        )),
        _ => Ok(()),
    }
}

/// Validator: value must be in allowed list
pub fn in_list(
    allowed: Vec<String>,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| match value.as_str() {
        Some(s) if !allowed.iter().any(|a| a == s) => Err(format!(
            "'{}' must be one of: {} (value: {})",
            field,
            allowed.join(", "),
            s
        )),
        _ => Ok(()),
    }
}

/// Numbers, or strings holding a number (form inputs often send text)
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
