//! Parameter values
//!
//! A [`Value`] pairs a [`ValueType`] with the canonical string the typed content
//! is read from. Values built from native Rust types are always valid; values
//! built from a `(type, value)` pair of strings are checked lazily through
//! [`Value::is_valid`] and the typed getters.

use crate::double::{Double, UNDEF_STR};
use crate::error::{ParamError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of content held by a [`Value`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ValueType {
    /// Real number that may be undefined
    Double,
    /// 32-bit signed integer
    Int,
    /// Boolean
    Bool,
    /// Arbitrary text
    Str,
    /// Type token that is not recognised. The value is kept as text.
    Opaque(String),
}

impl ValueType {
    /// Map a type token to a type.
    ///
    /// The historical tokens `NOMAD::Double` and `std::string` are aliases of
    /// `double` and `string`. Anything unrecognised becomes [`ValueType::Opaque`].
    pub fn from_token(token: &str) -> Self {
        match token {
            "double" | "NOMAD::Double" => ValueType::Double,
            "int" => ValueType::Int,
            "bool" => ValueType::Bool,
            "string" | "std::string" => ValueType::Str,
            other => ValueType::Opaque(other.to_string()),
        }
    }

    /// Canonical token, as written to parameter files
    pub fn as_str(&self) -> &str {
        match self {
            ValueType::Double => "double",
            ValueType::Int => "int",
            ValueType::Bool => "bool",
            ValueType::Str => "string",
            ValueType::Opaque(token) => token,
        }
    }

    /// Historical token (`NOMAD::Double`, `std::string`), for files read by older tools
    pub fn historical_str(&self) -> &str {
        match self {
            ValueType::Double => "NOMAD::Double",
            ValueType::Str => "std::string",
            other => other.as_str(),
        }
    }

    /// Whether typed access is available for this type
    pub fn is_supported(&self) -> bool {
        !matches!(self, ValueType::Opaque(_))
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ValueType {
    fn from(token: String) -> Self {
        ValueType::from_token(&token)
    }
}

impl From<ValueType> for String {
    fn from(value_type: ValueType) -> Self {
        value_type.as_str().to_string()
    }
}

/// One token of a space-separated value, see [`Value::get_value_str_at`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// The token text
    pub text: &'a str,
    /// The requested index was past the last token; `text` is the last token
    pub past_end: bool,
}

/// A typed parameter value stored in canonical string form
///
/// Equality compares type and canonical string, so `1.0` and `1` are different
/// `double` values at this level. Use [`Double`] comparisons for numeric equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Value {
    #[serde(rename = "type")]
    value_type: ValueType,
    #[serde(rename = "value")]
    repr: String,
}

impl Value {
    /// Create a value from a type token and a value string.
    ///
    /// No conversion happens here. An empty `double` becomes undefined.
    ///
    /// # Examples
    ///
    /// ```
    /// use optparams_rs::parameters::{Value, ValueType};
    ///
    /// let v = Value::from_strings("double", "");
    /// assert_eq!(v.value_type(), &ValueType::Double);
    /// assert_eq!(v.get_value_str(), "NaN");
    /// assert!(v.is_valid());
    ///
    /// let bad = Value::from_strings("bool", "maybe");
    /// assert!(!bad.is_valid());
    /// ```
    pub fn from_strings(type_str: &str, value_str: &str) -> Self {
        Self::with_type(ValueType::from_token(type_str), value_str)
    }

    /// Create a value of a given type from a value string
    pub fn with_type(value_type: ValueType, value_str: &str) -> Self {
        let repr = if value_type == ValueType::Double && value_str.is_empty() {
            UNDEF_STR.to_string()
        } else {
            value_str.to_string()
        };
        Self { value_type, repr }
    }

    pub fn value_type(&self) -> &ValueType {
        &self.value_type
    }

    pub fn type_str(&self) -> &str {
        self.value_type.as_str()
    }

    /// Whether the value string converts to the declared type
    pub fn is_valid(&self) -> bool {
        match self.value_type {
            ValueType::Double => self.get_value_double().is_ok(),
            ValueType::Int => self.get_value_int().is_ok(),
            ValueType::Bool => self.get_value_bool().is_ok(),
            ValueType::Str | ValueType::Opaque(_) => true,
        }
    }

    /// Whether `value_str` is valid for the type named by `type_str`
    pub fn is_valid_for(type_str: &str, value_str: &str) -> bool {
        Self::from_strings(type_str, value_str).is_valid()
    }

    /// Read as a [`Double`]. Undefined values are returned, not rejected.
    pub fn get_value_double(&self) -> Result<Double> {
        self.expect_type(ValueType::Double)?;
        Double::parse(&self.repr)
    }

    pub fn get_value_int(&self) -> Result<i32> {
        self.expect_type(ValueType::Int)?;
        parse_int(&self.repr).ok_or_else(|| self.conversion_error())
    }

    pub fn get_value_bool(&self) -> Result<bool> {
        self.expect_type(ValueType::Bool)?;
        parse_bool(&self.repr).ok_or_else(|| self.conversion_error())
    }

    /// The canonical string
    pub fn get_value_str(&self) -> &str {
        &self.repr
    }

    /// Token `index` (0-based) of the space-separated value string.
    ///
    /// Past the end, the last token is returned and `past_end` is set.
    ///
    /// ```
    /// use optparams_rs::parameters::Value;
    ///
    /// let v = Value::from("index0 First secondsecond");
    /// assert_eq!(v.get_value_str_at(1).text, "First");
    ///
    /// let past = v.get_value_str_at(7);
    /// assert!(past.past_end);
    /// assert_eq!(past.text, "secondsecond");
    /// ```
    pub fn get_value_str_at(&self, index: usize) -> Token<'_> {
        let tokens: Vec<&str> = self.repr.split(' ').collect();
        match tokens.get(index) {
            Some(&text) => Token {
                text,
                past_end: false,
            },
            None => {
                tracing::warn!(
                    "End of string reached before index {} in \"{}\"",
                    index,
                    self.repr
                );
                Token {
                    text: tokens.last().copied().unwrap_or_default(),
                    past_end: true,
                }
            }
        }
    }

    /// Replace type and content at once
    pub fn set_value(&mut self, value: impl Into<Value>) {
        *self = value.into();
    }

    /// Replace the content, keeping the type.
    ///
    /// On conversion failure the value is left unchanged.
    pub fn set_value_str(&mut self, value_str: &str) -> Result<()> {
        let candidate = Self::with_type(self.value_type.clone(), value_str);
        if !candidate.is_valid() {
            return Err(ParamError::ConversionError {
                value: value_str.to_string(),
                target: self.value_type.to_string(),
            });
        }
        *self = candidate;
        Ok(())
    }

    /// Whether writing this value to a parameter file and reading it back would
    /// alter it: comments, tabs and space runs are not escapable.
    pub fn has_reserved_chars(&self) -> bool {
        self.repr.contains(['#', '\t'])
            || self.repr.contains("  ")
            || self.repr.starts_with(' ')
            || self.repr.ends_with(' ')
    }

    /// Whether the value spans several lines and so cannot be written at all
    pub fn has_line_break(&self) -> bool {
        self.repr.contains(['\n', '\r'])
    }

    fn expect_type(&self, expected: ValueType) -> Result<()> {
        if self.value_type == expected {
            Ok(())
        } else {
            Err(ParamError::TypeMismatch {
                expected: expected.to_string(),
                found: self.value_type.to_string(),
            })
        }
    }

    fn conversion_error(&self) -> ParamError {
        ParamError::ConversionError {
            value: self.repr.clone(),
            target: self.value_type.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr)
    }
}

impl From<Double> for Value {
    fn from(value: Double) -> Self {
        Self {
            value_type: ValueType::Double,
            repr: value.to_string(),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Double::new(value).into()
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self {
            value_type: ValueType::Int,
            repr: value.to_string(),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self {
            value_type: ValueType::Bool,
            repr: if value { "1" } else { "0" }.to_string(),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self {
            value_type: ValueType::Str,
            repr: value.to_string(),
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self {
            value_type: ValueType::Str,
            repr: value,
        }
    }
}

/// Optional leading `-` followed by digits only
fn parse_int(s: &str) -> Option<i32> {
    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// `YES/NO`, `Y/N`, `TRUE/FALSE`, `1/0`, in any case
fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_uppercase().as_str() {
        "YES" | "Y" | "TRUE" | "1" => Some(true),
        "NO" | "N" | "FALSE" | "0" => Some(false),
        _ => None,
    }
}
