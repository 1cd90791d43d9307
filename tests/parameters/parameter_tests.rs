//! Integration tests for the Parameter struct
//!
//! These tests verify that the Parameter struct behaves correctly in various scenarios.

use crate::test_helpers::{random_invalid_name, random_valid_name};
use optparams_rs::parameters::{name_is_valid, Category, Parameter};
use optparams_rs::ParamError;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[test]
fn test_parameter_lifecycle() {
    // Create a parameter
    let mut param = Parameter::new("name_10", "10.101", "double", Category::User, false).unwrap();

    // Check initial state
    assert_eq!(param.name(), "NAME_10");
    assert_eq!(param.type_str(), "double");
    assert_eq!(param.value_str(), "10.101");
    assert_eq!(param.category(), Category::User);
    assert!(!param.is_const());

    // Change value
    param.set_value(3.5).unwrap();
    assert_eq!(param.value_str(), "3.5");

    // Change value from its string form
    param.set_value_str("inf").unwrap();
    assert_eq!(param.value_str(), "inf");

    // Make the parameter const
    param.set_const(true);
    assert!(matches!(
        param.set_value(1.0),
        Err(ParamError::ConstViolation { .. })
    ));
    assert_eq!(param.value_str(), "inf");
}

#[test]
fn test_name_rules() {
    assert!(!name_is_valid("NAME1_"));
    assert!(!name_is_valid("Name2"));
    assert!(name_is_valid("NAME3"));
    assert!(!name_is_valid("NAME 4"));
    assert!(name_is_valid("NAME_5"));
    assert!(name_is_valid("NAME_6_IS4TESTING"));
}

#[test]
fn test_random_names() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    for _ in 0..500 {
        let valid = random_valid_name(&mut rng);
        assert!(name_is_valid(&valid), "{:?} should be valid", valid);
        let param = Parameter::user(&valid.to_lowercase(), "x").unwrap();
        assert_eq!(param.name(), valid);

        let invalid = random_invalid_name(&mut rng);
        assert!(!name_is_valid(&invalid), "{:?} should be invalid", invalid);
        assert!(matches!(
            Parameter::user(&invalid, "x"),
            Err(ParamError::InvalidName { .. })
        ));
    }
}

#[test]
fn test_construction_errors() {
    // Name is checked before value
    assert!(matches!(
        Parameter::new("NAME 2", "abc", "bool", Category::User, false),
        Err(ParamError::InvalidName { .. })
    ));
    assert!(matches!(
        Parameter::new("NAME2", "abc", "bool", Category::User, false),
        Err(ParamError::InvalidValue { .. })
    ));
    assert!(matches!(
        Parameter::new("NAME2", "1.5", "int", Category::User, false),
        Err(ParamError::InvalidValue { .. })
    ));
}

#[test]
fn test_opaque_types_keep_their_token() {
    let param = Parameter::new("X0", "( 0 0 0 )", "NOMAD::ArrayOfDouble", Category::Problem, true)
        .unwrap();
    assert_eq!(param.type_str(), "NOMAD::ArrayOfDouble");
    assert_eq!(param.value_str(), "( 0 0 0 )");
}

#[test]
fn test_parameters_sort_by_name() {
    let mut params = vec![
        Parameter::user("GAMMA", 3).unwrap(),
        Parameter::user("ALPHA", 1).unwrap(),
        Parameter::user("BETA", 2).unwrap(),
    ];
    params.sort();
    let names: Vec<&str> = params.iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["ALPHA", "BETA", "GAMMA"]);
}
