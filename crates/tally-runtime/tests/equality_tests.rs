//! Coercive vs strict equality matrix
//!
//! Each row is checked through the assertion surface, so the recorded
//! outcome is exercised as well as the comparison itself.

use rstest::rstest;
use tally_runtime::coerce::{loose_eq, strict_eq};
use tally_runtime::{ExecutionMode, NullReporter, Suite, Value};

fn suite() -> Suite {
    Suite::new("equality", ExecutionMode::Console).with_console_reporter(NullReporter)
}

fn obj() -> Value {
    Value::object([("k", Value::from(1))])
}

// ============================================================================
// Loose vs strict
// ============================================================================

#[rstest]
#[case::zero_and_empty(Value::from(0), Value::from(""), true, false)]
#[case::one_and_true(Value::from(1), Value::from(true), true, false)]
#[case::zero_and_false(Value::from(0), Value::from(false), true, false)]
#[case::zero_and_null(Value::from(0), Value::Null, true, false)]
#[case::false_and_null(Value::from(false), Value::Null, true, false)]
#[case::zero_and_undefined(Value::from(0), Value::Undefined, false, false)]
#[case::null_and_undefined(Value::Null, Value::Undefined, true, false)]
#[case::null_and_null(Value::Null, Value::Null, true, true)]
#[case::undefined_and_undefined(Value::Undefined, Value::Undefined, true, true)]
#[case::null_and_empty(Value::Null, Value::from(""), false, false)]
#[case::number_and_numeric_string(Value::from(42), Value::from("42"), true, false)]
#[case::number_and_padded_string(Value::from(42), Value::from(" 42\n"), true, false)]
#[case::number_and_hex_string(Value::from(255), Value::from("0xff"), true, false)]
#[case::number_and_word(Value::from(1), Value::from("one"), false, false)]
#[case::string_true_is_not_true(Value::from("true"), Value::from(true), false, false)]
#[case::string_one_and_true(Value::from("1"), Value::from(true), true, false)]
#[case::two_is_not_true(Value::from(2), Value::from(true), false, false)]
#[case::empty_array_and_false(Value::from(Vec::<i32>::new()), Value::from(false), true, false)]
#[case::empty_array_and_empty_string(Value::from(Vec::<i32>::new()), Value::from(""), true, false)]
#[case::singleton_array_and_number(Value::from(vec![5]), Value::from(5), true, false)]
#[case::array_and_joined(Value::from(vec![1, 2]), Value::from("1,2"), true, false)]
#[case::object_and_tag(obj(), Value::from("[object Object]"), true, false)]
#[case::same_numbers(Value::from(3), Value::from(3.0), true, true)]
#[case::same_strings(Value::from("a"), Value::from("a"), true, true)]
#[case::different_strings(Value::from("a"), Value::from("b"), false, false)]
#[case::distinct_arrays(Value::from(vec![1]), Value::from(vec![1]), false, false)]
#[case::distinct_objects(obj(), obj(), false, false)]
#[case::nan(Value::from(f64::NAN), Value::from(f64::NAN), false, false)]
#[case::nan_string(Value::from(f64::NAN), Value::from("NaN"), false, false)]
fn test_equality_matrix(
    #[case] a: Value,
    #[case] b: Value,
    #[case] loose: bool,
    #[case] strict: bool,
) {
    assert_eq!(loose_eq(&a, &b), loose, "loose {:?} == {:?}", a, b);
    assert_eq!(loose_eq(&b, &a), loose, "loose {:?} == {:?}", b, a);
    assert_eq!(strict_eq(&a, &b), strict, "strict {:?} === {:?}", a, b);

    let mut t = suite();
    assert_eq!(t.assert_equals(a.clone(), b.clone(), None), loose);
    assert_eq!(t.assert_not_equals(a.clone(), b.clone(), None), !loose);
    assert_eq!(t.assert_same(a.clone(), b.clone(), None), strict);
    assert_eq!(t.assert_not_same(a, b, None), !strict);
    assert_eq!(t.results().total(), 4);
    assert_eq!(t.results().pass, 2);
}

// ============================================================================
// Identity
// ============================================================================

#[test]
fn test_reference_kinds_equal_themselves() {
    let arr = Value::from(vec![1, 2]);
    let object = obj();
    let func = Value::function(|_| Ok(()));

    for value in [arr, object, func] {
        assert!(strict_eq(&value, &value.clone()));
        assert!(loose_eq(&value, &value.clone()));
    }
}

#[test]
fn test_distinct_functions_differ() {
    let a = Value::function(|_| Ok(()));
    let b = Value::function(|_| Ok(()));
    assert!(!strict_eq(&a, &b));
    assert!(!loose_eq(&a, &b));
    assert!(loose_eq(&a, &Value::from("function")));
}

// ============================================================================
// Membership
// ============================================================================

#[rstest]
#[case::strict_false_vs_zero(Value::from(false), Value::from(vec![0]), false)]
#[case::strict_zero_vs_false(Value::from(0), Value::from(vec![false]), false)]
#[case::strict_string_vs_number(Value::from("1"), Value::from(vec![1]), false)]
#[case::present(Value::from("b"), Value::from(vec!["a", "b"]), true)]
#[case::null_present(Value::Null, Value::array(vec![Value::from(1), Value::Null]), true)]
#[case::undefined_not_null(Value::Undefined, Value::array(vec![Value::Null]), false)]
#[case::empty(Value::from(1), Value::from(Vec::<i32>::new()), false)]
#[case::nan_never_found(Value::from(f64::NAN), Value::from(vec![f64::NAN]), false)]
fn test_membership(#[case] needle: Value, #[case] haystack: Value, #[case] expected: bool) {
    let mut t = suite();
    assert_eq!(
        t.assert_in_array(needle.clone(), haystack.clone(), None),
        expected
    );
    assert_eq!(t.assert_not_in_array(needle, haystack, None), !expected);
}
