//! Core rule contract shared by every built-in and user-defined rule

use crate::error::ConfigError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// Untyped options declared next to a rule name, decoded by each rule into its own settings
pub type RuleOptions = Map<String, Value>;

/// Stable tag identifying which check failed
///
/// The string forms (`missingValue`, `tooShort`, ...) are part of the public
/// contract: consumers match on them, so they never change.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKey {
    MissingValue,
    InvalidType,
    InvalidFormat,
    TooShort,
    TooLong,
    NotAnInteger,
    NotNumeric,
    OutOfRange,
    InvalidDate,
    ConditionNotMet,
    /// Key emitted by a user-defined rule
    Custom(String),
}

impl ErrorKey {
    /// Stable string form, e.g. `missingValue`
    pub fn as_str(&self) -> &str {
        match self {
            Self::MissingValue => "missingValue",
            Self::InvalidType => "invalidType",
            Self::InvalidFormat => "invalidFormat",
            Self::TooShort => "tooShort",
            Self::TooLong => "tooLong",
            Self::NotAnInteger => "notAnInteger",
            Self::NotNumeric => "notNumeric",
            Self::OutOfRange => "outOfRange",
            Self::InvalidDate => "invalidDate",
            Self::ConditionNotMet => "conditionNotMet",
            Self::Custom(key) => key,
        }
    }

    /// Generic message used when neither the rule nor the declaration provides one
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::MissingValue => "This field is required",
            Self::InvalidType => "This field has an invalid type",
            Self::InvalidFormat => "This field has an invalid format",
            Self::TooShort => "This field is too short",
            Self::TooLong => "This field is too long",
            Self::NotAnInteger => "This field must be an integer",
            Self::NotNumeric => "This field must be numeric",
            Self::OutOfRange => "This field is out of range",
            Self::InvalidDate => "This field is not a valid date",
            Self::ConditionNotMet => "This field does not satisfy its condition",
            Self::Custom(_) => "This field is invalid",
        }
    }
}

impl From<&str> for ErrorKey {
    fn from(key: &str) -> Self {
        match key {
            "missingValue" => Self::MissingValue,
            "invalidType" => Self::InvalidType,
            "invalidFormat" => Self::InvalidFormat,
            "tooShort" => Self::TooShort,
            "tooLong" => Self::TooLong,
            "notAnInteger" => Self::NotAnInteger,
            "notNumeric" => Self::NotNumeric,
            "outOfRange" => Self::OutOfRange,
            "invalidDate" => Self::InvalidDate,
            "conditionNotMet" => Self::ConditionNotMet,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for ErrorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ErrorKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ErrorKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        Ok(Self::from(key.as_str()))
    }
}

/// Outcome of running one rule over one value
#[derive(Debug, Clone, PartialEq)]
pub struct Checked {
    /// The value handed to the next rule in the chain (possibly coerced)
    pub value: Value,
    /// Set when the check failed
    pub error: Option<ErrorKey>,
}

impl Checked {
    /// Create a passing outcome
    pub fn valid(value: Value) -> Self {
        Self { value, error: None }
    }

    /// Create a failing outcome tagged with `key`
    pub fn invalid(value: Value, key: ErrorKey) -> Self {
        Self {
            value,
            error: Some(key),
        }
    }

    /// Check if the rule passed
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

/// A single validation concern
///
/// `check` is pure: it never mutates the rule, so a configured rule can be
/// shared freely. The stateful `process`/`reset`/`is_valid` contract lives in
/// [`Processor`](crate::processor::Processor), which wraps a rule for one run.
pub trait ValidationRule: Send + Sync {
    /// Name the rule is usually registered under
    fn rule_name(&self) -> &str;

    /// Apply declared options. Rules without settings accept only an empty map.
    fn configure(&mut self, options: &RuleOptions) -> Result<(), ConfigError> {
        reject_unknown(self.rule_name(), options, &[])
    }

    /// Run the check, returning the value for the next rule and the failure, if any
    fn check(&self, input: Value) -> Checked;

    /// Active configuration as JSON
    fn parameters(&self) -> Option<Value> {
        None
    }

    /// Message used when the field declaration does not override it
    fn default_message(&self, key: &ErrorKey) -> String {
        key.default_message().to_string()
    }
}

/// Fail with [`ConfigError::UnknownParameter`] on the first key not in `allowed`
pub(crate) fn reject_unknown(
    rule: &str,
    options: &RuleOptions,
    allowed: &[&str],
) -> Result<(), ConfigError> {
    match options.keys().find(|key| !allowed.contains(&key.as_str())) {
        Some(key) => Err(ConfigError::unknown_parameter(rule, key.as_str())),
        None => Ok(()),
    }
}

/// Decode one option into its typed form; absent and `null` both read as `None`
pub(crate) fn option<T: DeserializeOwned>(
    rule: &str,
    options: &RuleOptions,
    key: &str,
) -> Result<Option<T>, ConfigError> {
    match options.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => T::deserialize(value)
            .map(Some)
            .map_err(|e| ConfigError::invalid_parameter(rule, key, e.to_string())),
    }
}

/// Decode an option that must be present
pub(crate) fn required_option<T: DeserializeOwned>(
    rule: &str,
    options: &RuleOptions,
    key: &str,
) -> Result<T, ConfigError> {
    option(rule, options, key)?.ok_or_else(|| ConfigError::missing_parameter(rule, key))
}
