//! # Named options
//!
//! Typed field descriptors (headers, body fields, query parameters) and the
//! ordered, name-unique sets an endpoint or a test accumulates them in.
//!
//! Set operations only report errors; surfacing them to the user is the
//! caller's job (see [`crate::notify`]).

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Declared data type of a field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    #[default]
    String,
    Number,
    File,
    Boolean,
    Object,
    Array,
    Date,
    Time,
    Enum,
}

impl ParamType {
    pub const ALL: [ParamType; 9] = [
        ParamType::String,
        ParamType::Number,
        ParamType::File,
        ParamType::Boolean,
        ParamType::Object,
        ParamType::Array,
        ParamType::Date,
        ParamType::Time,
        ParamType::Enum,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Number => "number",
            ParamType::File => "file",
            ParamType::Boolean => "boolean",
            ParamType::Object => "object",
            ParamType::Array => "array",
            ParamType::Date => "date",
            ParamType::Time => "time",
            ParamType::Enum => "enum",
        }
    }
}

impl Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ParamType {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        ParamType::ALL
            .into_iter()
            .find(|ty| ty.as_str() == raw)
            .ok_or_else(|| format!("Unknown parameter type `{raw}`"))
    }
}

/// Errors raised by [`OptionSet`] mutations. The set is left untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionError {
    #[error("Add a valid string")]
    EmptyName,

    #[error("Add a valid value")]
    EmptyValue,

    #[error("Duplicate values: `{0}` is already defined")]
    DuplicateName(String),
}

/// A single named, typed field descriptor.
///
/// `value` is only set when the option carries a value supplied for a test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedOption {
    pub name: String,
    #[serde(rename = "type", default)]
    pub param_type: ParamType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl NamedOption {
    pub fn new(name: impl Into<String>, param_type: ParamType, required: bool) -> Self {
        Self {
            name: name.into(),
            param_type,
            required,
            value: None,
        }
    }

    pub fn with_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param_type: ParamType::default(),
            required: false,
            value: Some(value.into()),
        }
    }
}

/// The not-yet-added row of an option editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionInput {
    pub name: String,
    pub param_type: ParamType,
    pub required: bool,
}

impl OptionInput {
    pub fn to_option(&self) -> NamedOption {
        NamedOption::new(self.name.trim(), self.param_type, self.required)
    }
}

/// How [`OptionSet::remove`] compares names.
///
/// Insertion is always case-insensitive; removal is exact unless the set is
/// built with [`RemovalMatch::IgnoreCase`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RemovalMatch {
    #[default]
    Exact,
    IgnoreCase,
}

/// Ordered collection of options with case-insensitively unique names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<NamedOption>", into = "Vec<NamedOption>")]
pub struct OptionSet {
    options: Vec<NamedOption>,
    removal: RemovalMatch,
}

impl OptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_removal(removal: RemovalMatch) -> Self {
        Self {
            options: Vec::new(),
            removal,
        }
    }

    /// Append a declared option. Rejects empty and duplicate names.
    pub fn add(&mut self, option: NamedOption) -> Result<(), OptionError> {
        if option.name.is_empty() {
            return Err(OptionError::EmptyName);
        }
        self.push_unique(option)
    }

    /// Append a supplied value. Rejects empty values and duplicate names.
    pub fn add_value(&mut self, option: NamedOption) -> Result<(), OptionError> {
        if option.value.as_deref().is_none_or(str::is_empty) {
            return Err(OptionError::EmptyValue);
        }
        self.push_unique(option)
    }

    /// Remove every entry matching `name`. Absent names are a no-op.
    pub fn remove(&mut self, name: &str) {
        let removal = self.removal;
        self.options.retain(|option| match removal {
            RemovalMatch::Exact => option.name != name,
            RemovalMatch::IgnoreCase => !same_name(&option.name, name),
        });
    }

    /// Case-insensitive membership, the rule used to reject duplicates.
    pub fn contains(&self, name: &str) -> bool {
        self.options.iter().any(|option| same_name(&option.name, name))
    }

    pub fn get(&self, name: &str) -> Option<&NamedOption> {
        self.options.iter().find(|option| option.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NamedOption> {
        self.options.iter()
    }

    pub fn to_list(&self) -> &[NamedOption] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn clear(&mut self) {
        self.options.clear();
    }

    fn push_unique(&mut self, option: NamedOption) -> Result<(), OptionError> {
        if self.contains(&option.name) {
            return Err(OptionError::DuplicateName(option.name));
        }
        self.options.push(option);
        Ok(())
    }
}

fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

impl From<Vec<NamedOption>> for OptionSet {
    fn from(options: Vec<NamedOption>) -> Self {
        Self {
            options,
            removal: RemovalMatch::default(),
        }
    }
}

impl From<OptionSet> for Vec<NamedOption> {
    fn from(set: OptionSet) -> Self {
        set.options
    }
}

impl<'a> IntoIterator for &'a OptionSet {
    type Item = &'a NamedOption;
    type IntoIter = std::slice::Iter<'a, NamedOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.options.iter()
    }
}
