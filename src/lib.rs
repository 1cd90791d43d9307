//! # optparams-rs
//!
//! `optparams-rs` is a typed parameter repository for optimization software.
//!
//! The library provides:
//! - A [`Double`] number type with an explicit undefined state
//! - Typed parameter values and named, categorized parameters
//! - A parameter store that reads and writes plain-text parameter files
//! - Configurable policies for re-adding parameters and unknown types
//!
//! ## Basic Usage
//!
//! ```
//! use optparams_rs::{ParameterStore, UpdateStatus};
//!
//! let mut store = ParameterStore::new();
//! let report = store.read_from_str(
//!     "ALGO double DISPLAY_DEGREE 2\n\
//!      USER string BB_EXE ./bb.exe   # blackbox\n\
//!      DISPLAY_DEGREE 4",
//! );
//! assert!(report.is_clean());
//! assert_eq!(store.get_value_str("display_degree").unwrap(), "4");
//! assert_eq!(store.update("BB_EXE", "./other.exe"), UpdateStatus::Updated);
//! ```

// Public modules
pub mod config;
pub mod double;
pub mod error;

// Parameter system
pub mod parameters;

// Re-exports for convenience
pub use config::{ReAddPolicy, StoreConfig, TypePolicy, TypeTokens};
pub use double::Double;
pub use error::{ParamError, Result};
pub use parameters::{
    Category, LoadReport, Parameter, ParameterStore, SaveReport, UpdateStatus, Value, ValueType,
};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
