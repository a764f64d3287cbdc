//! Truthiness of draft values

use serde_json::Value;

/// Whether a draft value counts as filled in
///
/// Missing, `null`, `false`, `0`, `""` and `[]` are empty; everything else is
/// filled in.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(_)) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(None));
        assert!(!is_truthy(Some(&json!(null))));
        assert!(!is_truthy(Some(&json!(false))));
        assert!(!is_truthy(Some(&json!(0))));
        assert!(!is_truthy(Some(&json!(0.0))));
        assert!(!is_truthy(Some(&json!(""))));
        assert!(!is_truthy(Some(&json!([]))));

        assert!(is_truthy(Some(&json!(true))));
        assert!(is_truthy(Some(&json!(5))));
        assert!(is_truthy(Some(&json!("x"))));
        assert!(is_truthy(Some(&json!(["a"]))));
        assert!(is_truthy(Some(&json!({}))));
    }
}
