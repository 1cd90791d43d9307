use thiserror::Error;

use crate::parameters::grammar::GrammarError;

/// Error types for the optparams-rs library.
#[derive(Error, Debug)]
pub enum ParamError {
    /// Parameter name does not follow the naming rules.
    #[error("Parameter name \"{name}\" is not valid")]
    InvalidName { name: String },

    /// Value string cannot be converted to its declared type.
    #[error("Parameter value \"{value}\" is not valid for type {type_name}")]
    InvalidValue { value: String, type_name: String },

    /// A value of one type was requested or supplied where another was expected.
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// A string could not be converted to the requested type.
    #[error("Could not convert \"{value}\" to {target}")]
    ConversionError { value: String, target: String },

    /// Mutation attempted on a const parameter.
    #[error("Parameter {name} is const and cannot be modified")]
    ConstViolation { name: String },

    /// Parameter not found.
    #[error("Parameter not found: {name}")]
    NotFound { name: String },

    /// A parameter was re-added under a different category.
    #[error(
        "Category mismatch: parameter {name} with category {incoming} already exists with category {existing}"
    )]
    CategoryMismatch {
        name: String,
        existing: String,
        incoming: String,
    },

    /// Type token not recognised and the store rejects unknown types.
    #[error("Unsupported parameter type: {type_name}")]
    UnsupportedType { type_name: String },

    /// Token is not one of the parameter categories.
    #[error("Unknown parameter category: {0}")]
    UnknownCategory(String),

    /// A line could not be parsed.
    #[error(transparent)]
    Grammar(#[from] GrammarError),

    /// A line of a parameter file is not valid UTF-8.
    #[error("Line is not valid UTF-8")]
    InvalidUtf8,

    /// A value holds a line break and cannot be written to a parameter file.
    #[error("Value of parameter {name} contains a line break and cannot be written")]
    UnwritableValue { name: String },

    /// A file operation was requested with an empty path.
    #[error("File name is empty")]
    EmptyPath,

    /// I/O error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for optparams-rs operations.
pub type Result<T> = std::result::Result<T, ParamError>;
