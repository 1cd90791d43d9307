//! Integration tests for parameter values
//!
//! These tests verify typed access, validation and string forms of values.

use crate::test_helpers::random_typed_value;
use approx::assert_relative_eq;
use optparams_rs::parameters::{Value, ValueType};
use optparams_rs::{Double, ParamError};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[test]
fn test_value_from_strings() {
    let v = Value::from_strings("NOMAD::Double", "10.101");
    assert!(v.is_valid());
    assert_relative_eq!(v.get_value_double().unwrap().todouble().unwrap(), 10.101);

    let v = Value::from_strings("bool", "TRUE");
    assert!(v.get_value_bool().unwrap());
    assert_eq!(v.get_value_str(), "TRUE");

    let v = Value::from_strings("std::string", "5471");
    assert_eq!(v.value_type(), &ValueType::Str);
    assert_eq!(v.get_value_str(), "5471");
}

#[test]
fn test_invalid_value_is_detected_lazily() {
    // Construction succeeds, typed access fails
    let v = Value::from_strings("bool", "abc");
    assert!(!v.is_valid());
    assert!(matches!(
        v.get_value_bool(),
        Err(ParamError::ConversionError { .. })
    ));
    assert_eq!(v.get_value_str(), "abc");
}

#[test]
fn test_typed_access_checks_kind() {
    let v = Value::from(7);
    assert!(matches!(
        v.get_value_double(),
        Err(ParamError::TypeMismatch { .. })
    ));
    assert!(matches!(
        v.get_value_bool(),
        Err(ParamError::TypeMismatch { .. })
    ));
    assert_eq!(v.get_value_int().unwrap(), 7);
}

#[test]
fn test_undefined_and_infinite_doubles() {
    let v = Value::from_strings("double", "");
    assert!(!v.get_value_double().unwrap().is_defined());

    let v = Value::from(Double::undefined());
    assert_eq!(v.get_value_str(), "NaN");

    let v = Value::from(f64::NEG_INFINITY);
    assert_eq!(v.get_value_str(), "-inf");
    assert_eq!(
        v.get_value_double().unwrap().value(),
        Some(f64::NEG_INFINITY)
    );
}

#[test]
fn test_random_values_round_trip_through_strings() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for _ in 0..200 {
        let (type_str, value_str) = random_typed_value(&mut rng);
        let v = Value::from_strings(type_str, &value_str);
        assert!(v.is_valid(), "{} {} should be valid", type_str, value_str);

        let rebuilt = Value::from_strings(v.type_str(), &v.to_string());
        assert_eq!(rebuilt, v);
    }
}

#[test]
fn test_set_value_str_is_atomic() {
    let mut v = Value::from(true);
    assert!(v.set_value_str("maybe").is_err());
    assert!(v.get_value_bool().unwrap());

    v.set_value_str("no").unwrap();
    assert!(!v.get_value_bool().unwrap());
    assert_eq!(v.get_value_str(), "no");
}
