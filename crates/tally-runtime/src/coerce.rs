//! Equality and coercion rules for assertion values
//!
//! Two comparisons back the assertion surface:
//! - [`strict_eq`]: no conversion. Kinds must match; reference kinds compare
//!   by identity.
//! - [`loose_eq`]: the coercive comparison. Operands of different kinds are
//!   converted toward numbers (or primitives, for reference kinds) until the
//!   kinds line up.
//!
//! `null` is treated as `0` against numbers and booleans, so `0 == null`
//! holds. `undefined` only ever equals `null` or `undefined`.

use crate::value::Value;
use std::mem;
use std::rc::Rc;

/// Strict (non-coercive) equality.
pub fn strict_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Array(x), Value::Array(y)) => Rc::ptr_eq(x, y),
        (Value::Object(x), Value::Object(y)) => Rc::ptr_eq(x, y),
        (Value::Function(x), Value::Function(y)) => x.ptr_eq(y),
        _ => false,
    }
}

/// Loose (coercive) equality.
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    if mem::discriminant(a) == mem::discriminant(b) {
        return strict_eq(a, b);
    }

    match (a, b) {
        (Value::Null | Value::Undefined, Value::Null | Value::Undefined) => true,

        (Value::Null, Value::Number(_) | Value::Bool(_)) => loose_eq(&Value::Number(0.0), b),
        (Value::Number(_) | Value::Bool(_), Value::Null) => loose_eq(a, &Value::Number(0.0)),
        (Value::Null | Value::Undefined, _) | (_, Value::Null | Value::Undefined) => false,

        (Value::Number(x), Value::String(s)) => *x == string_to_number(s),
        (Value::String(s), Value::Number(y)) => string_to_number(s) == *y,

        (Value::Bool(_), _) => loose_eq(&Value::Number(to_number(a)), b),
        (_, Value::Bool(_)) => loose_eq(a, &Value::Number(to_number(b))),

        (Value::Array(_) | Value::Object(_) | Value::Function(_), Value::Number(_) | Value::String(_)) => {
            loose_eq(&to_primitive(a), b)
        }
        (Value::Number(_) | Value::String(_), Value::Array(_) | Value::Object(_) | Value::Function(_)) => {
            loose_eq(a, &to_primitive(b))
        }

        _ => false,
    }
}

/// Numeric conversion.
pub fn to_number(value: &Value) -> f64 {
    match value {
        Value::Undefined => f64::NAN,
        Value::Null => 0.0,
        Value::Bool(true) => 1.0,
        Value::Bool(false) => 0.0,
        Value::Number(n) => *n,
        Value::String(s) => string_to_number(s),
        Value::Array(_) | Value::Object(_) | Value::Function(_) => to_number(&to_primitive(value)),
    }
}

/// Reference kinds become their string form; primitives are returned as-is.
pub fn to_primitive(value: &Value) -> Value {
    match value {
        Value::Array(_) | Value::Object(_) | Value::Function(_) => Value::string(value.to_string()),
        other => other.clone(),
    }
}

/// Numeric literal parsing with script rules: surrounding whitespace is
/// ignored, the empty string is `0`, `0x`/`0o`/`0b` prefixes are accepted,
/// `Infinity` may be signed, anything else unparsable is `NaN`.
pub fn string_to_number(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = trimmed.strip_prefix(prefix) {
            return radix_to_number(digits, radix);
        }
    }

    // f64::from_str also accepts "inf" and "nan"; keep to decimal literals.
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return f64::NAN;
    }

    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Digits past `u64` range still convert; the result is rounded to a double.
fn radix_to_number(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    digits
        .chars()
        .try_fold(0.0_f64, |acc, c| {
            c.to_digit(radix).map(|d| acc * radix as f64 + d as f64)
        })
        .unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_to_number_literals() {
        assert_eq!(string_to_number(""), 0.0);
        assert_eq!(string_to_number("  \n"), 0.0);
        assert_eq!(string_to_number(" 42 "), 42.0);
        assert_eq!(string_to_number("-1.5e2"), -150.0);
        assert_eq!(string_to_number("0x1F"), 31.0);
        assert_eq!(string_to_number("0b101"), 5.0);
        assert_eq!(string_to_number("-Infinity"), f64::NEG_INFINITY);
    }

    #[test]
    fn test_radix_literals_wider_than_u64() {
        assert_eq!(string_to_number("0x10000000000000000"), 18446744073709551616.0);
        assert_eq!(string_to_number("0xFFFFFFFFFFFFFFFFFFFF"), 1208925819614629174706176.0);
        assert!(string_to_number("0x1G").is_nan());
    }

    #[test]
    fn test_large_numbers_compare_with_exponent_strings() {
        let big = Value::from(vec![1e21]);
        assert!(loose_eq(&big, &Value::from("1e+21")));
        assert!(loose_eq(&Value::from(1e21), &Value::from("1e+21")));
        assert!(!loose_eq(&big, &Value::from("1000000000000000000000")));
    }

    #[test]
    fn test_string_to_number_rejects_words() {
        assert!(string_to_number("abc").is_nan());
        assert!(string_to_number("inf").is_nan());
        assert!(string_to_number("nan").is_nan());
        assert!(string_to_number("1 2").is_nan());
        assert!(string_to_number("0x").is_nan());
    }

    #[test]
    fn test_to_number_of_reference_kinds() {
        assert_eq!(to_number(&Value::from(Vec::<i32>::new())), 0.0);
        assert_eq!(to_number(&Value::from(vec![7])), 7.0);
        assert!(to_number(&Value::from(vec![1, 2])).is_nan());
        assert!(to_number(&Value::object(Vec::<(String, Value)>::new())).is_nan());
    }

    #[test]
    fn test_nan_is_never_equal() {
        let nan = Value::from(f64::NAN);
        assert!(!strict_eq(&nan, &nan));
        assert!(!loose_eq(&nan, &nan));
    }

    #[test]
    fn test_signed_zero_is_equal() {
        assert!(strict_eq(&Value::from(0.0), &Value::from(-0.0)));
    }

    #[test]
    fn test_loose_eq_is_symmetric_for_null_rules() {
        let zero = Value::from(0);
        assert!(loose_eq(&zero, &Value::Null));
        assert!(loose_eq(&Value::Null, &zero));
        assert!(!loose_eq(&zero, &Value::Undefined));
        assert!(!loose_eq(&Value::Undefined, &zero));
    }
}
