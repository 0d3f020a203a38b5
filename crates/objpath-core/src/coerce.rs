//! # Coercion: Scalar Conversions for Arithmetic and Messages
//!
//! Arithmetic updates and validation messages operate on loosely-typed
//! leaves. The conversion rules live here so every caller agrees on them.
//!
//! ## Number coercion ([`to_number`])
//!
//! | Value                | Number                        |
//! |----------------------|-------------------------------|
//! | `null`               | `0`                           |
//! | `false` / `true`     | `0` / `1`                     |
//! | number               | itself                        |
//! | string               | trimmed decimal parse, `""` → `0`, otherwise NaN |
//! | array / object       | NaN                           |
//!
//! ## Number production ([`number_value`])
//!
//! JSON numbers cannot hold NaN or infinities, so non-finite results
//! become `null`. Integral results inside the `i64` range are stored as
//! integers so `10 / 10` reads back as `1`, not `1.0`.

use serde_json::{Number, Value};

/// Convert a value to a number for arithmetic.
pub fn to_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse().unwrap_or(f64::NAN)
            }
        }
        Value::Array(_) | Value::Object(_) => f64::NAN,
    }
}

/// Produce a JSON value from an arithmetic result.
pub fn number_value(result: f64) -> Value {
    if !result.is_finite() {
        return Value::Null;
    }
    // i64::MAX is not exactly representable; the open upper bound keeps the cast exact.
    if result.fract() == 0.0 && result >= i64::MIN as f64 && result < i64::MAX as f64 {
        return Value::from(result as i64);
    }
    Number::from_f64(result).map_or(Value::Null, Value::Number)
}

/// Render a value as plain text.
///
/// Strings render bare (no quotes); numbers, booleans and `null` render as
/// their literal; containers render as compact JSON.
pub fn to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_number_table() {
        assert_eq!(to_number(&json!(null)), 0.0);
        assert_eq!(to_number(&json!(true)), 1.0);
        assert_eq!(to_number(&json!(false)), 0.0);
        assert_eq!(to_number(&json!(2.5)), 2.5);
        assert_eq!(to_number(&json!(" 42 ")), 42.0);
        assert_eq!(to_number(&json!("")), 0.0);
        assert!(to_number(&json!("abc")).is_nan());
        assert!(to_number(&json!([1])).is_nan());
        assert!(to_number(&json!({})).is_nan());
    }

    #[test]
    fn test_number_value_integral() {
        assert_eq!(number_value(1.0), json!(1));
        assert_eq!(number_value(-20.0), json!(-20));
        assert!(number_value(1.0).is_i64());
    }

    #[test]
    fn test_number_value_fractional() {
        assert_eq!(number_value(0.5), json!(0.5));
    }

    #[test]
    fn test_number_value_non_finite() {
        assert_eq!(number_value(f64::NAN), Value::Null);
        assert_eq!(number_value(f64::INFINITY), Value::Null);
        assert_eq!(number_value(f64::NEG_INFINITY), Value::Null);
    }

    #[test]
    fn test_to_text() {
        assert_eq!(to_text(&json!("aa")), "aa");
        assert_eq!(to_text(&json!(10)), "10");
        assert_eq!(to_text(&json!(null)), "null");
        assert_eq!(to_text(&json!(false)), "false");
        assert_eq!(to_text(&json!([1, "a"])), r#"[1,"a"]"#);
        assert_eq!(to_text(&json!({"k": 1})), r#"{"k":1}"#);
    }
}
