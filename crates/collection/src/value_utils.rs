//! Utility functions for working with serde_json::Value items

use std::cmp::Ordering;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::{Number, Value};

/// Get the type name of a Value for error messages
pub fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Parse decimal text, accepting exponent notation
fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Exact decimal form of a JSON number
///
/// Goes through the number's shortest text form, so `0.1` is exactly `0.1`.
pub fn number_to_decimal(num: &Number) -> Option<Decimal> {
    if let Some(i) = num.as_i64() {
        return Some(Decimal::from(i));
    }
    if let Some(u) = num.as_u64() {
        return Some(Decimal::from(u));
    }
    parse_decimal(&num.to_string())
}

/// Decimal form of a numeric value or numeric string
pub fn to_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => number_to_decimal(n),
        Value::String(s) => parse_decimal(s.trim()),
        _ => None,
    }
}

/// Equality with numbers compared by value (`1 == 1.0`)
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            match (number_to_decimal(x), number_to_decimal(y)) {
                (Some(x), Some(y)) => x == y,
                _ => x == y,
            }
        }
        _ => a == b,
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Total order used by every sorting operation
///
/// Values of different types order by type (null < bool < number < string <
/// array < object); arrays and objects compare equal among themselves.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            match (number_to_decimal(x), number_to_decimal(y)) {
                (Some(x), Some(y)) => x.cmp(&y),
                _ => {
                    let x = x.as_f64().unwrap_or(0.0);
                    let y = y.as_f64().unwrap_or(0.0);
                    x.partial_cmp(&y).unwrap_or(Ordering::Equal)
                }
            }
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

/// Hashable identity of a value, consistent with [`values_equal`]
pub fn canonical_key(value: &Value) -> String {
    match value {
        Value::Number(n) => match number_to_decimal(n) {
            Some(d) => format!("n:{}", d.normalize()),
            None => format!("n:{n}"),
        },
        other => other.to_string(),
    }
}

/// Map key (and join/implode text) for a value: strings as-is, everything
/// else as compact JSON
pub fn key_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Field of a record item, `None` for non-objects or missing keys
#[inline]
pub fn field<'a>(item: &'a Value, key: &str) -> Option<&'a Value> {
    item.as_object().and_then(|record| record.get(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_type_name() {
        assert_eq!(value_type_name(&Value::Null), "null");
        assert_eq!(value_type_name(&json!(true)), "boolean");
        assert_eq!(value_type_name(&json!(42)), "number");
        assert_eq!(value_type_name(&json!("test")), "string");
        assert_eq!(value_type_name(&json!([])), "array");
        assert_eq!(value_type_name(&json!({})), "object");
    }

    #[test]
    fn test_to_decimal_is_exact() {
        assert_eq!(to_decimal(&json!(0.1)), Decimal::from_str("0.1").ok());
        assert_eq!(to_decimal(&json!(7)), Some(Decimal::from(7)));
        assert_eq!(to_decimal(&json!(" 2.50 ")), Decimal::from_str("2.5").ok());
        assert_eq!(to_decimal(&json!("1e3")), Some(Decimal::from(1000)));
        assert_eq!(to_decimal(&json!("abc")), None);
        assert_eq!(to_decimal(&json!(null)), None);
    }

    #[test]
    fn test_numeric_equality() {
        assert!(values_equal(&json!(1), &json!(1.0)));
        assert!(!values_equal(&json!(1), &json!("1")));
        assert_eq!(canonical_key(&json!(1)), canonical_key(&json!(1.0)));
        assert_ne!(canonical_key(&json!(1)), canonical_key(&json!("1")));
    }

    #[test]
    fn test_compare_values() {
        assert_eq!(compare_values(&json!(2), &json!(10)), Ordering::Less);
        assert_eq!(compare_values(&json!("b"), &json!("a")), Ordering::Greater);
        assert_eq!(compare_values(&json!(null), &json!(0)), Ordering::Less);
        assert_eq!(compare_values(&json!(5), &json!("5")), Ordering::Less);
        assert_eq!(compare_values(&json!([1]), &json!([2])), Ordering::Equal);
    }

    #[test]
    fn test_key_string() {
        assert_eq!(key_string(&json!("a")), "a");
        assert_eq!(key_string(&json!(1)), "1");
        assert_eq!(key_string(&json!(null)), "null");
        assert_eq!(key_string(&json!([1, 2])), "[1,2]");
    }
}
