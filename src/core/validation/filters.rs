//! Reusable field filters
//!
//! These filters normalize draft values before they are validated and sent

use anyhow::{Result, bail};
use serde_json::{Value, json};

/// Filter: trim whitespace from string
pub fn trim() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| match value {
        Value::String(s) => Ok(Value::String(s.trim().to_string())),
        other => Ok(other),
    }
}

/// Filter: convert string to uppercase
pub fn uppercase() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| match value {
        Value::String(s) => Ok(Value::String(s.to_uppercase())),
        other => Ok(other),
    }
}

/// Filter: convert string to lowercase
pub fn lowercase() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| match value {
        Value::String(s) => Ok(Value::String(s.to_lowercase())),
        other => Ok(other),
    }
}

/// Filter: parse numeric text into a JSON number
///
/// Empty strings become `null`; text that is not a number is an error.
pub fn to_number() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |field: &str, value: Value| match value {
        Value::String(s) if s.trim().is_empty() => Ok(Value::Null),
        Value::String(s) => {
            let trimmed = s.trim();
            if let Ok(int) = trimmed.parse::<i64>() {
                Ok(json!(int))
            } else if let Ok(float) = trimmed.parse::<f64>() {
                Ok(json!(float))
            } else {
                bail!("'{}' must be a number (value: {})", field, trimmed)
            }
        }
        other => Ok(other),
    }
}

/// Filter: split comma separated text into an array of trimmed strings
pub fn comma_list() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| match value {
        Value::String(s) => Ok(Value::Array(
            s.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(|item| Value::String(item.to_string()))
                .collect(),
        )),
        other => Ok(other),
    }
}
