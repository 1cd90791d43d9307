//! Parameter store implementation
//!
//! This module provides the [`ParameterStore`], an ordered collection of
//! [`Parameter`] objects keyed by upper-case name. It loads parameter files
//! line by line through the [`grammar`](crate::parameters::grammar), applies the
//! policies of a [`StoreConfig`], and writes parameters back in the same format.

use crate::config::{ReAddPolicy, StoreConfig};
use crate::double::Double;
use crate::error::{ParamError, Result};
use crate::parameters::grammar::{normalize_line, parse_line, Definition, ParsedLine};
use crate::parameters::parameter::{normalize_name, Category, Parameter};
use crate::parameters::value::{Value, ValueType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// The built-in default parameter table
pub const DEFAULT_PARAMETERS: &str = include_str!("default_parameters.txt");

/// Outcome of [`ParameterStore::update`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStatus {
    /// The value was replaced
    Updated,
    /// The parameter exists but is const, or the value did not convert
    NotUpdated,
    /// No parameter with this name
    NotFound,
}

/// A line that could not be applied while loading
#[derive(Debug)]
pub struct Diagnostic {
    /// 1-based line number
    pub line_number: usize,
    /// The raw line
    pub line: String,
    /// Why the line was skipped
    pub error: ParamError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {} ({})", self.line_number, self.error, self.line)
    }
}

/// Summary of a load
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Number of lines that defined or updated a parameter
    pub applied: usize,
    /// Lines that were skipped
    pub diagnostics: Vec<Diagnostic>,
}

impl LoadReport {
    /// Whether every non-blank line was applied
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Summary of a write
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SaveReport {
    /// Number of lines written
    pub written: usize,
    /// Parameters whose value will not read back unchanged
    pub lossy: Vec<String>,
}

/// A collection of parameters, unique by name
///
/// Lookups take names in any case. Returned parameters are copies or shared
/// borrows; the store is only changed through its own methods.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParameterStore {
    /// Map of upper-case names to parameters
    params: BTreeMap<String, Parameter>,

    /// Policies applied on insertion and loading
    #[serde(skip)]
    config: StoreConfig,
}

impl ParameterStore {
    /// Create an empty store with the default configuration
    ///
    /// # Examples
    ///
    /// ```
    /// use optparams_rs::parameters::ParameterStore;
    ///
    /// let store = ParameterStore::new();
    /// assert_eq!(store.len(), 0);
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with the given configuration
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            params: BTreeMap::new(),
            config,
        }
    }

    /// Create a store seeded from a default table.
    ///
    /// `defaults` uses the parameter file format. Lines that cannot be applied
    /// are reported through `tracing` and skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use optparams_rs::config::StoreConfig;
    /// use optparams_rs::parameters::{ParameterStore, DEFAULT_PARAMETERS};
    ///
    /// let store = ParameterStore::with_defaults(DEFAULT_PARAMETERS, StoreConfig::default());
    /// assert!(store.is_defined("display_degree"));
    /// ```
    pub fn with_defaults(defaults: &str, config: StoreConfig) -> Self {
        let mut store = Self::with_config(config);
        let report = store.read_from_str(defaults);
        tracing::debug!(
            "Loaded {} default parameters ({} skipped)",
            report.applied,
            report.diagnostics.len()
        );
        store
    }

    /// Create a store seeded from [`DEFAULT_PARAMETERS`] with the default configuration
    pub fn with_builtin_defaults() -> Self {
        Self::with_defaults(DEFAULT_PARAMETERS, StoreConfig::default())
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: StoreConfig) {
        self.config = config;
    }

    /// Add a parameter, replacing any parameter with the same name.
    ///
    /// Under [`ReAddPolicy::Strict`] a replacement must keep the category and
    /// type of the existing parameter. Unknown types are refused when the
    /// configuration rejects them.
    ///
    /// The const flag guards [`update`](Self::update) only. A const parameter
    /// is still replaced by a new definition under its name.
    ///
    /// # Returns
    ///
    /// `Ok(true)` once the parameter is stored
    ///
    /// # Examples
    ///
    /// ```
    /// use optparams_rs::parameters::{Parameter, ParameterStore};
    ///
    /// let mut store = ParameterStore::new();
    /// assert!(store.add(Parameter::user("third_parameter", 3.3).unwrap()).unwrap());
    /// assert!(store.add(Parameter::user("third_parameter", 3.5).unwrap()).unwrap());
    /// assert_eq!(store.len(), 1);
    /// assert!(store.add(Parameter::user("third_parameter", "text").unwrap()).is_err());
    /// ```
    pub fn add(&mut self, param: Parameter) -> Result<bool> {
        if !self.config.accepts_type(param.value().value_type()) {
            return Err(ParamError::UnsupportedType {
                type_name: param.type_str().to_string(),
            });
        }

        if let Some(existing) = self.params.get(param.name()) {
            if self.config.readd_policy == ReAddPolicy::Strict {
                if existing.category() != param.category() {
                    return Err(ParamError::CategoryMismatch {
                        name: param.name().to_string(),
                        existing: existing.category().to_string(),
                        incoming: param.category().to_string(),
                    });
                }
                if existing.type_str() != param.type_str() {
                    return Err(ParamError::TypeMismatch {
                        expected: existing.type_str().to_string(),
                        found: param.type_str().to_string(),
                    });
                }
            }
            tracing::debug!("Replacing parameter {}", param.name());
        }

        self.params.insert(param.name().to_string(), param);
        Ok(true)
    }

    /// Update the value of a parameter from its string form.
    ///
    /// Const parameters and values that do not convert leave the store
    /// unchanged and give [`UpdateStatus::NotUpdated`].
    pub fn update(&mut self, name: &str, value_str: &str) -> UpdateStatus {
        match self.try_update(name, value_str) {
            Ok(()) => UpdateStatus::Updated,
            Err(ParamError::NotFound { .. }) => UpdateStatus::NotFound,
            Err(e) => {
                tracing::warn!("Could not update parameter {}: {}", name, e);
                UpdateStatus::NotUpdated
            }
        }
    }

    /// Update the value of a parameter, reporting why it failed
    pub fn try_update(&mut self, name: &str, value_str: &str) -> Result<()> {
        let key = normalize_name(name);
        match self.params.get_mut(&key) {
            Some(param) => param.set_value_str(value_str),
            None => Err(ParamError::NotFound { name: key }),
        }
    }

    /// Remove a parameter. Returns whether it existed.
    pub fn remove(&mut self, name: &str) -> bool {
        let removed = self.params.remove(&normalize_name(name)).is_some();
        if !removed {
            tracing::debug!("There is no parameter {} to remove", name);
        }
        removed
    }

    /// Toggle the const flag of a stored parameter
    pub fn set_const(&mut self, name: &str, is_const: bool) -> Result<()> {
        let key = normalize_name(name);
        match self.params.get_mut(&key) {
            Some(param) => {
                param.set_const(is_const);
                Ok(())
            }
            None => Err(ParamError::NotFound { name: key }),
        }
    }

    /// A copy of the named parameter
    pub fn find(&self, name: &str) -> Option<Parameter> {
        self.get(name).cloned()
    }

    /// A shared borrow of the named parameter
    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.params.get(&normalize_name(name))
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.params.contains_key(&normalize_name(name))
    }

    /// The named parameter, or `NotFound`
    pub fn require(&self, name: &str) -> Result<&Parameter> {
        self.get(name).ok_or_else(|| ParamError::NotFound {
            name: normalize_name(name),
        })
    }

    pub fn get_value_double(&self, name: &str) -> Result<Double> {
        self.require(name)?.value().get_value_double()
    }

    pub fn get_value_int(&self, name: &str) -> Result<i32> {
        self.require(name)?.value().get_value_int()
    }

    pub fn get_value_bool(&self, name: &str) -> Result<bool> {
        self.require(name)?.value().get_value_bool()
    }

    pub fn get_value_str(&self, name: &str) -> Result<&str> {
        Ok(self.require(name)?.value_str())
    }

    pub fn get_type_str(&self, name: &str) -> Result<&str> {
        Ok(self.require(name)?.type_str())
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn clear(&mut self) {
        self.params.clear();
    }

    /// Parameter names in order
    pub fn names(&self) -> Vec<String> {
        self.params.keys().cloned().collect()
    }

    /// Parameters in name order
    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.params.values()
    }

    /// Parse one line and apply it.
    ///
    /// A definition adds a parameter, const if its category is listed in the
    /// configuration. An assignment updates an existing parameter, or adds a
    /// mutable USER string parameter when the name is unknown.
    ///
    /// # Returns
    ///
    /// `Ok(false)` for blank and comment lines, `Ok(true)` once applied
    pub fn apply_line(&mut self, line: &str) -> Result<bool> {
        match parse_line(line)? {
            ParsedLine::Empty => Ok(false),
            ParsedLine::Definition(def) => self.apply_definition(def).map(|_| true),
            ParsedLine::Assignment { name, value } => {
                self.apply_assignment(&name, &value).map(|_| true)
            }
        }
    }

    fn apply_definition(&mut self, def: Definition) -> Result<()> {
        let is_const = self.config.is_const_category(def.category);
        let value = Value::from_strings(&def.type_str, def.value.as_deref().unwrap_or(""));
        let param = Parameter::with_value(&def.name, value, def.category, is_const)?;
        self.add(param)?;
        Ok(())
    }

    fn apply_assignment(&mut self, name: &str, value_str: &str) -> Result<()> {
        match self.try_update(name, value_str) {
            Err(ParamError::NotFound { name }) => {
                tracing::info!(
                    "Parameter {} does not have a default value. Adding it with category = {}, type = {}, value = \"{}\"",
                    name,
                    Category::User,
                    ValueType::Str,
                    value_str
                );
                let param = Parameter::new(&name, value_str, ValueType::Str.as_str(), Category::User, false)?;
                self.add(param)?;
                Ok(())
            }
            other => other,
        }
    }

    /// Load parameters from text in the parameter file format.
    ///
    /// Lines that fail are logged, collected in the report and skipped.
    pub fn read_from_str(&mut self, text: &str) -> LoadReport {
        let mut report = LoadReport::default();
        for (index, line) in text.lines().enumerate() {
            self.load_line(index + 1, line, &mut report);
        }
        report
    }

    /// Load parameters from a file.
    ///
    /// # Returns
    ///
    /// A report of the applied and skipped lines, or an error if the path is
    /// empty or the file cannot be read
    pub fn read_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<LoadReport> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(ParamError::EmptyPath);
        }

        let reader = BufReader::new(File::open(path)?);
        let mut report = LoadReport::default();
        for (index, bytes) in reader.split(b'\n').enumerate() {
            let line_number = index + 1;
            match String::from_utf8(bytes?) {
                Ok(line) => self.load_line(line_number, &line, &mut report),
                Err(e) => {
                    let line = String::from_utf8_lossy(e.as_bytes()).into_owned();
                    // Undecodable bytes inside a comment are harmless
                    if normalize_line(&line).is_empty() {
                        continue;
                    }
                    tracing::warn!("Skipping line {}: not valid UTF-8", line_number);
                    report.diagnostics.push(Diagnostic {
                        line_number,
                        line,
                        error: ParamError::InvalidUtf8,
                    });
                }
            }
        }

        tracing::debug!(
            "Read {}: {} lines applied, {} skipped",
            path.display(),
            report.applied,
            report.diagnostics.len()
        );
        Ok(report)
    }

    fn load_line(&mut self, line_number: usize, line: &str, report: &mut LoadReport) {
        match self.apply_line(line) {
            Ok(true) => report.applied += 1,
            Ok(false) => {}
            Err(error) => {
                tracing::warn!("Skipping line {}: {}", line_number, error);
                report.diagnostics.push(Diagnostic {
                    line_number,
                    line: line.to_string(),
                    error,
                });
            }
        }
    }

    /// `CATEGORY TYPE NAME VALUE`, without a trailing space for empty values
    fn format_line(&self, param: &Parameter) -> String {
        let head = format!(
            "{} {} {}",
            param.category(),
            self.config.type_token(param.value().value_type()),
            param.name()
        );
        if param.value_str().is_empty() {
            head
        } else {
            format!("{} {}", head, param.value_str())
        }
    }

    /// The parameters as lines of the parameter file format, in name order
    pub fn to_lines(&self) -> Vec<String> {
        self.params.values().map(|p| self.format_line(p)).collect()
    }

    /// Write the parameters to a file, replacing its content.
    ///
    /// Values holding `#`, tabs or space runs are written as-is, logged, and
    /// listed in the report. A value with a line break fails the whole write
    /// with `UnwritableValue` before the file is touched.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<SaveReport> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(ParamError::EmptyPath);
        }
        if let Some(param) = self.params.values().find(|p| p.value().has_line_break()) {
            return Err(ParamError::UnwritableValue {
                name: param.name().to_string(),
            });
        }
        if path.exists() {
            tracing::warn!("File {} will be overwritten", path.display());
        }

        let mut writer = BufWriter::new(File::create(path)?);
        let mut report = SaveReport::default();
        for param in self.params.values() {
            if param.value().has_reserved_chars() {
                tracing::warn!(
                    "Value of {} will not read back unchanged: \"{}\"",
                    param.name(),
                    param.value_str()
                );
                report.lossy.push(param.name().to_string());
            }
            writeln!(writer, "{}", self.format_line(param))?;
            report.written += 1;
        }
        writer.flush()?;

        Ok(report)
    }
}

#[cfg(feature = "json")]
impl ParameterStore {
    /// Save parameters to a JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load parameters from a JSON string.
    ///
    /// Every parameter is validated again; the configuration is the default one.
    pub fn from_json(json: &str) -> Result<Self> {
        let store: Self = serde_json::from_str(json)?;
        store.validate()?;
        Ok(store)
    }

    /// Save parameters to a JSON file
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Load parameters from a JSON file
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let store: Self = serde_json::from_reader(BufReader::new(file))?;
        store.validate()?;
        Ok(store)
    }

    fn validate(&self) -> Result<()> {
        for (key, param) in &self.params {
            param.validate()?;
            if key != param.name() {
                return Err(ParamError::InvalidName { name: key.clone() });
            }
        }
        Ok(())
    }
}

impl fmt::Display for ParameterStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for param in self.params.values() {
            writeln!(f, "{}", self.format_line(param))?;
        }
        Ok(())
    }
}
