//! Configuration options for a parameter store.
//!
//! This module defines the policies a [`ParameterStore`](crate::parameters::ParameterStore)
//! applies when parameters are re-added, when a type token is not recognised,
//! and when definitions are loaded from text.

use crate::parameters::{Category, ValueType};

/// What happens when a parameter is added under a name that already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReAddPolicy {
    /// Replace only if category and type match the existing parameter;
    /// otherwise fail with `CategoryMismatch` or `TypeMismatch`
    #[default]
    Strict,

    /// Always replace the existing parameter
    Lenient,
}

/// What happens to type tokens outside `double`, `int`, `bool` and `string`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypePolicy {
    /// Keep the value as an opaque string
    #[default]
    Opaque,

    /// Refuse the parameter with `UnsupportedType`
    Reject,
}

/// Type tokens used when writing parameter files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeTokens {
    /// `double`, `int`, `bool`, `string`
    #[default]
    Canonical,

    /// `NOMAD::Double` and `std::string` in place of `double` and `string`
    Historical,
}

/// Configuration options for a parameter store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    /// Re-add behaviour. Default: Strict
    pub readd_policy: ReAddPolicy,

    /// Handling of unknown type tokens. Default: Opaque
    pub unknown_types: TypePolicy,

    /// Categories whose definitions are loaded as const. Default: [PROBLEM]
    pub const_categories: Vec<Category>,

    /// Type tokens written to files. Default: Canonical
    pub type_tokens: TypeTokens,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            readd_policy: ReAddPolicy::default(),
            unknown_types: TypePolicy::default(),
            const_categories: vec![Category::Problem],
            type_tokens: TypeTokens::default(),
        }
    }
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_readd_policy(mut self, policy: ReAddPolicy) -> Self {
        self.readd_policy = policy;
        self
    }

    pub fn with_unknown_types(mut self, policy: TypePolicy) -> Self {
        self.unknown_types = policy;
        self
    }

    /// Set the categories loaded as const. An empty list makes every loaded
    /// definition mutable.
    pub fn with_const_categories(mut self, categories: impl IntoIterator<Item = Category>) -> Self {
        self.const_categories = categories.into_iter().collect();
        self
    }

    pub fn with_type_tokens(mut self, tokens: TypeTokens) -> Self {
        self.type_tokens = tokens;
        self
    }

    /// Whether definitions in `category` are loaded as const
    pub fn is_const_category(&self, category: Category) -> bool {
        self.const_categories.contains(&category)
    }

    /// Whether values of `value_type` may enter the store
    pub fn accepts_type(&self, value_type: &ValueType) -> bool {
        value_type.is_supported() || self.unknown_types == TypePolicy::Opaque
    }

    /// The token written for `value_type`
    pub fn type_token<'a>(&self, value_type: &'a ValueType) -> &'a str {
        match self.type_tokens {
            TypeTokens::Canonical => value_type.as_str(),
            TypeTokens::Historical => value_type.historical_str(),
        }
    }
}
