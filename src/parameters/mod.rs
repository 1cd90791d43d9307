//! # Parameter System
//!
//! This module provides a typed parameter repository for optimization runs.
//! Parameters are named, typed and categorized values that can be loaded from
//! plain-text parameter files, updated, queried and written back.
//!
//! ## Key Features
//!
//! - **Typed Values**: `double` (possibly undefined), `int`, `bool` and `string`
//!   values, with unknown types kept as opaque text
//! - **Categories**: every parameter belongs to `ALGO`, `PROBLEM`, `RUNNER` or `USER`
//! - **Const Parameters**: const values refuse updates
//! - **Line Grammar**: `CATEGORY TYPE NAME [VALUE]` definitions and `NAME VALUE` assignments
//! - **Serialization Support**: Save and load parameter stores with serde
//!
//! ## Core Components
//!
//! - [`Value`]: A typed value held in canonical string form
//! - [`Parameter`]: A named value with a category and a const flag
//! - [`ParameterStore`]: A collection of parameters, unique by name
//! - [`grammar`]: Parsing of single parameter file lines
//!
//! ## Example Usage
//!
//! ```rust
//! use optparams_rs::parameters::{Category, Parameter, ParameterStore, UpdateStatus};
//!
//! let mut store = ParameterStore::with_builtin_defaults();
//!
//! // Definitions and assignments use the parameter file syntax
//! store.apply_line("PROBLEM int DIMENSION 3").unwrap();
//! store.apply_line("DISPLAY_DEGREE 3").unwrap();
//!
//! // PROBLEM parameters are const once loaded
//! assert_eq!(store.update("DIMENSION", "5"), UpdateStatus::NotUpdated);
//!
//! // Add parameters built in code
//! store
//!     .add(Parameter::with_value("SCALE", 0.5, Category::User, false).unwrap())
//!     .unwrap();
//!
//! assert_eq!(store.get_value_int("dimension").unwrap(), 3);
//! assert_eq!(store.get_value_str("DISPLAY_DEGREE").unwrap(), "3");
//! ```

pub mod grammar;
pub mod parameter;
pub mod store;
pub mod value;


// Re-export key types
pub use grammar::{GrammarError, ParsedLine};
pub use parameter::{name_is_valid, Category, Parameter};
pub use store::{
    Diagnostic, LoadReport, ParameterStore, SaveReport, UpdateStatus, DEFAULT_PARAMETERS,
};
pub use value::{Token, Value, ValueType};
