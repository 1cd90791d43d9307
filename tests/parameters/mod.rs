//! Integration tests for the parameter system
//!
//! These tests verify that the parameter system behaves correctly in various scenarios.

// Tests for values and their string forms
mod value_tests;

// Tests for the Parameter struct
mod parameter_tests;

// Tests for the ParameterStore collection
mod store_tests;
