//! Parameter definition and implementation
//!
//! This module provides the [`Parameter`] struct, a named and typed binding of a
//! [`Value`] with a [`Category`] and a const flag. Names are upper-cased on
//! construction and must follow the naming rules of [`name_is_valid`].

use crate::error::{ParamError, Result};
use crate::parameters::value::Value;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Coarse classification of a parameter
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::Display,
    strum::EnumIter,
)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Algo,
    Problem,
    Runner,
    #[default]
    User,
}

impl Category {
    /// Whether `token` names a category. Matching is case-sensitive.
    pub fn is_category(token: &str) -> bool {
        token.parse::<Category>().is_ok()
    }

    /// Parse a category token, failing with `UnknownCategory`
    pub fn from_token(token: &str) -> Result<Self> {
        token
            .parse()
            .map_err(|_| ParamError::UnknownCategory(token.to_string()))
    }
}

/// Check a parameter name.
///
/// A name starts with an upper-case letter, continues with upper-case letters,
/// digits or underscores, and ends with an upper-case letter or a digit. A
/// single character must be an upper-case letter.
///
/// # Examples
///
/// ```
/// use optparams_rs::parameters::name_is_valid;
///
/// assert!(name_is_valid("NAME_6_IS4TESTING"));
/// assert!(name_is_valid("X"));
/// assert!(!name_is_valid("NAME1_"));
/// assert!(!name_is_valid("Name2"));
/// assert!(!name_is_valid("NAME 4"));
/// assert!(!name_is_valid(""));
/// ```
pub fn name_is_valid(name: &str) -> bool {
    let bytes = name.as_bytes();
    let (Some(&first), Some(&last)) = (bytes.first(), bytes.last()) else {
        return false;
    };

    if !first.is_ascii_uppercase() {
        return false;
    }

    if bytes.len() > 2 {
        let interior_ok = bytes[1..bytes.len() - 1]
            .iter()
            .all(|&b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_');
        if !interior_ok {
            return false;
        }
    }

    last.is_ascii_uppercase() || last.is_ascii_digit()
}

/// Upper-case form used as the parameter key
pub(crate) fn normalize_name(name: &str) -> String {
    name.to_ascii_uppercase()
}

/// A named, typed and categorized parameter
///
/// Two parameters are equal, and ordered, by name only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    /// Upper-case name of the parameter
    name: String,

    /// Current value
    value: Value,

    /// Category of the parameter
    category: Category,

    /// Whether the value may still change
    is_const: bool,
}

impl Parameter {
    /// Create a parameter from a value string and a type token
    ///
    /// # Arguments
    ///
    /// * `name` - Name of the parameter, upper-cased before validation
    /// * `value_str` - String form of the value
    /// * `type_str` - Type token, e.g. `double` or `bool`
    /// * `category` - Category of the parameter
    /// * `is_const` - Whether the value is fixed
    ///
    /// # Returns
    ///
    /// The parameter, or `InvalidName` / `InvalidValue` (name is checked first)
    ///
    /// # Examples
    ///
    /// ```
    /// use optparams_rs::parameters::{Category, Parameter};
    ///
    /// let param = Parameter::new("display_degree", "2", "double", Category::Algo, false).unwrap();
    /// assert_eq!(param.name(), "DISPLAY_DEGREE");
    /// assert_eq!(param.value_str(), "2");
    ///
    /// assert!(Parameter::new("bad name", "2", "double", Category::Algo, false).is_err());
    /// assert!(Parameter::new("SEED", "two", "int", Category::Algo, false).is_err());
    /// ```
    pub fn new(
        name: &str,
        value_str: &str,
        type_str: &str,
        category: Category,
        is_const: bool,
    ) -> Result<Self> {
        Self::with_value(name, Value::from_strings(type_str, value_str), category, is_const)
    }

    /// Create a parameter from a [`Value`] or anything convertible into one
    pub fn with_value(
        name: &str,
        value: impl Into<Value>,
        category: Category,
        is_const: bool,
    ) -> Result<Self> {
        let param = Self {
            name: normalize_name(name),
            value: value.into(),
            category,
            is_const,
        };
        param.validate()?;
        Ok(param)
    }

    /// Create a non-const USER parameter
    pub fn user(name: &str, value: impl Into<Value>) -> Result<Self> {
        Self::with_value(name, value, Category::User, false)
    }

    /// Check the name and the value, in that order
    pub fn validate(&self) -> Result<()> {
        if !name_is_valid(&self.name) {
            return Err(ParamError::InvalidName {
                name: self.name.clone(),
            });
        }
        if !self.value.is_valid() {
            return Err(ParamError::InvalidValue {
                value: self.value.get_value_str().to_string(),
                type_name: self.value.type_str().to_string(),
            });
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The canonical string of the value
    pub fn value_str(&self) -> &str {
        self.value.get_value_str()
    }

    pub fn type_str(&self) -> &str {
        self.value.type_str()
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn is_const(&self) -> bool {
        self.is_const
    }

    pub fn set_const(&mut self, is_const: bool) {
        self.is_const = is_const;
    }

    /// Replace the value.
    ///
    /// Fails with `ConstViolation` on a const parameter and with `TypeMismatch`
    /// if the new value has another type. The value is unchanged on failure.
    pub fn set_value(&mut self, value: impl Into<Value>) -> Result<()> {
        self.check_mutable()?;
        let value = value.into();
        if value.value_type() != self.value.value_type() {
            return Err(ParamError::TypeMismatch {
                expected: self.value.type_str().to_string(),
                found: value.type_str().to_string(),
            });
        }
        self.value.set_value(value);
        Ok(())
    }

    /// Replace the value from its string form, keeping the type.
    ///
    /// Fails with `ConstViolation` on a const parameter and with
    /// `ConversionError` if the string does not convert. The value is unchanged
    /// on failure.
    pub fn set_value_str(&mut self, value_str: &str) -> Result<()> {
        self.check_mutable()?;
        self.value.set_value_str(value_str)
    }

    fn check_mutable(&self) -> Result<()> {
        if self.is_const {
            Err(ParamError::ConstViolation {
                name: self.name.clone(),
            })
        } else {
            Ok(())
        }
    }
}

impl PartialEq for Parameter {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Parameter {}

impl PartialOrd for Parameter {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Parameter {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}
