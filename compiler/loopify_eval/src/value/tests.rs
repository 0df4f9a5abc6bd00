use pretty_assertions::assert_eq;

use super::*;

fn numbers(values: &[f64]) -> Value {
    Value::array(values.iter().copied().map(Value::Number).collect())
}

#[test]
fn integral_numbers_print_without_fraction() {
    assert_eq!(Value::Number(3.0).to_string(), "3");
    assert_eq!(Value::Number(-0.5).to_string(), "-0.5");
    assert_eq!(Value::Number(f64::NAN).to_string(), "NaN");
    assert_eq!(Value::Number(f64::INFINITY).to_string(), "Infinity");
}

#[test]
fn arrays_join_with_commas() {
    assert_eq!(numbers(&[1.0, 2.0, 3.0]).to_string(), "1,2,3");
    let holes = Value::array(vec![Value::Undefined, Value::Number(1.0), Value::Null]);
    assert_eq!(holes.to_string(), ",1,");
}

#[test]
fn log_text_inspects_nested_values() {
    assert_eq!(Value::string("hi").log_text(), "hi");
    assert_eq!(numbers(&[1.0, 2.0]).log_text(), "[ 1, 2 ]");
    assert_eq!(Value::array(vec![]).log_text(), "[]");
    let words = Value::array(vec![Value::string("a"), Value::string("b")]);
    assert_eq!(words.log_text(), "[ 'a', 'b' ]");
    let object = Value::object(vec![("a".to_owned(), Value::Number(1.0))]);
    assert_eq!(object.log_text(), "{ a: 1 }");
    assert_eq!(Value::Native(Native::ConsoleLog).log_text(), "[Function]");
}

#[test]
fn truthiness() {
    for falsy in [
        Value::Undefined,
        Value::Null,
        Value::Bool(false),
        Value::Number(0.0),
        Value::Number(f64::NAN),
        Value::string(""),
    ] {
        assert!(!falsy.is_truthy(), "{falsy:?}");
    }
    assert!(Value::array(vec![]).is_truthy());
    assert!(Value::string("0").is_truthy());
}

#[test]
fn strict_equality_compares_references() {
    let a = numbers(&[1.0]);
    assert!(a.strict_equals(&a.clone()));
    assert!(!a.strict_equals(&numbers(&[1.0])));
    assert!(!Value::Number(1.0).strict_equals(&Value::string("1")));
    assert!(!Value::Number(f64::NAN).strict_equals(&Value::Number(f64::NAN)));
}

#[test]
fn loose_equality_coerces() {
    assert!(Value::Number(1.0).loose_equals(&Value::string("1")));
    assert!(Value::Null.loose_equals(&Value::Undefined));
    assert!(Value::Bool(true).loose_equals(&Value::Number(1.0)));
    assert!(!Value::Null.loose_equals(&Value::Number(0.0)));
}

#[test]
fn string_to_number() {
    assert_eq!(Value::string(" 42 ").to_number(), 42.0);
    assert_eq!(Value::string("").to_number(), 0.0);
    assert!(Value::string("x").to_number().is_nan());
}
