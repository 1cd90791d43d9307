//! Integration tests for the ParameterStore collection
//!
//! These tests verify that the ParameterStore collection behaves correctly in various scenarios.

use optparams_rs::config::{ReAddPolicy, StoreConfig, TypePolicy};
use optparams_rs::parameters::{
    Category, Parameter, ParameterStore, UpdateStatus, ValueType, DEFAULT_PARAMETERS,
};
use optparams_rs::{Double, ParamError};

#[test]
fn test_store_basic_operations() {
    // Create an empty store
    let mut store = ParameterStore::new();
    assert_eq!(store.len(), 0);
    assert!(store.is_empty());

    // Add parameters
    store.add(Parameter::user("first_parameter", 1.1).unwrap()).unwrap();
    store
        .add(Parameter::with_value("SECOND_PARAMETER", 2, Category::Algo, false).unwrap())
        .unwrap();
    assert_eq!(store.len(), 2);
    assert!(store.is_defined("FIRST_PARAMETER"));
    assert_eq!(store.names(), vec!["FIRST_PARAMETER", "SECOND_PARAMETER"]);

    // Find a parameter
    let found = store.find("second_parameter").unwrap();
    assert_eq!(found.category(), Category::Algo);
    assert_eq!(found.value().get_value_int().unwrap(), 2);

    // Update it
    assert_eq!(store.update("SECOND_PARAMETER", "3"), UpdateStatus::Updated);
    assert_eq!(store.get_value_int("SECOND_PARAMETER").unwrap(), 3);

    // Remove it
    assert!(store.remove("SECOND_PARAMETER"));
    assert!(!store.is_defined("SECOND_PARAMETER"));
    assert!(!store.remove("SECOND_PARAMETER"));

    // Clear everything
    store.clear();
    assert!(store.is_empty());
}

#[test]
fn test_readd_same_category_and_type_replaces() {
    let mut store = ParameterStore::new();
    assert!(store.add(Parameter::user("THIRD_PARAMETER", 3.3).unwrap()).unwrap());
    assert!(store.add(Parameter::user("THIRD_PARAMETER", 3.5).unwrap()).unwrap());
    assert_eq!(store.len(), 1);
    assert_eq!(
        store.get_value_double("THIRD_PARAMETER").unwrap(),
        Double::new(3.5)
    );
}

#[test]
fn test_readd_policies() {
    let mut strict = ParameterStore::new();
    strict.add(Parameter::user("P", 1).unwrap()).unwrap();
    assert!(matches!(
        strict.add(Parameter::with_value("P", 1, Category::Runner, false).unwrap()),
        Err(ParamError::CategoryMismatch { .. })
    ));
    assert!(matches!(
        strict.add(Parameter::user("P", true).unwrap()),
        Err(ParamError::TypeMismatch { .. })
    ));
    assert_eq!(strict.get_value_int("P").unwrap(), 1);

    let mut lenient =
        ParameterStore::with_config(StoreConfig::new().with_readd_policy(ReAddPolicy::Lenient));
    lenient.add(Parameter::user("P", 1).unwrap()).unwrap();
    lenient
        .add(Parameter::with_value("P", true, Category::Runner, false).unwrap())
        .unwrap();
    assert!(lenient.get_value_bool("P").unwrap());
    assert_eq!(lenient.get("P").unwrap().category(), Category::Runner);
}

#[test]
fn test_unknown_types() {
    let mut opaque = ParameterStore::new();
    opaque
        .add(Parameter::new("X0", "(0 0)", "NOMAD::Point", Category::Problem, false).unwrap())
        .unwrap();
    assert_eq!(
        opaque.get("X0").unwrap().value().value_type(),
        &ValueType::Opaque("NOMAD::Point".to_string())
    );
    assert!(matches!(
        opaque.get_value_double("X0"),
        Err(ParamError::TypeMismatch { .. })
    ));

    let mut strict =
        ParameterStore::with_config(StoreConfig::new().with_unknown_types(TypePolicy::Reject));
    assert!(matches!(
        strict.add(Parameter::new("X0", "(0 0)", "NOMAD::Point", Category::Problem, false).unwrap()),
        Err(ParamError::UnsupportedType { .. })
    ));
}

#[test]
fn test_update_on_const_is_not_updated() {
    let mut store = ParameterStore::new();
    store
        .add(Parameter::with_value("LOCKED", 9.9, Category::User, true).unwrap())
        .unwrap();
    assert_eq!(store.update("LOCKED", "1.0"), UpdateStatus::NotUpdated);
    assert_eq!(store.get_value_str("LOCKED").unwrap(), "9.9");

    store.set_const("LOCKED", false).unwrap();
    assert_eq!(store.update("LOCKED", "1.0"), UpdateStatus::Updated);
    assert_eq!(store.get_value_str("LOCKED").unwrap(), "1.0");
}

#[test]
fn test_update_stores_canonical_string() {
    let mut store = ParameterStore::new();
    store.apply_line("ALGO NOMAD::Double DISPLAY_DEGREE 2").unwrap();
    store.apply_line("DISPLAY_DEGREE 42").unwrap();

    let param = store.find("DISPLAY_DEGREE").unwrap();
    assert_eq!(param.category(), Category::Algo);
    assert_eq!(param.type_str(), "double");
    assert_eq!(param.value_str(), "42");
}

#[test]
fn test_runner_alone_is_rejected() {
    let mut store = ParameterStore::with_builtin_defaults();
    let before = store.to_lines();
    assert!(store.apply_line("RUNNER").is_err());
    assert_eq!(store.to_lines(), before);
}

#[test]
fn test_defaults_are_passed_in() {
    let custom = "ALGO int SEED 5\nRUNNER string TMP_DIR /scratch";
    let store = ParameterStore::with_defaults(custom, StoreConfig::default());
    assert_eq!(store.len(), 2);
    assert_eq!(store.get_value_int("SEED").unwrap(), 5);
    assert_eq!(store.get_value_str("TMP_DIR").unwrap(), "/scratch");

    let builtin = ParameterStore::with_builtin_defaults();
    assert!(builtin.len() > store.len());
    assert!(builtin.iter().all(|p| !p.is_const()));
    assert!(!DEFAULT_PARAMETERS.is_empty());
}

#[test]
fn test_get_value_missing_parameter() {
    let store = ParameterStore::new();
    assert!(matches!(
        store.get_value_str("MISSING"),
        Err(ParamError::NotFound { .. })
    ));
    assert!(store.find("MISSING").is_none());
}
