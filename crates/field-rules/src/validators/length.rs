//! Length-based validator for strings

use crate::error::ConfigError;
use crate::traits::{reject_unknown, required_option, Checked, ErrorKey, RuleOptions, ValidationRule};
use serde_json::Value;

/// Validator for string length constraints, counted in Unicode scalar values
///
/// Unconfigured, the bounds are `0..=usize::MAX`. Once options are declared
/// both `minLength` and `maxLength` must be present.
#[derive(Debug, Clone)]
pub struct LengthValidator {
    /// Minimum length (inclusive)
    pub min: usize,
    /// Maximum length (inclusive)
    pub max: usize,
}

impl LengthValidator {
    /// Create a validator for `min..=max` characters
    pub fn new(min: usize, max: usize) -> Result<Self, ConfigError> {
        if min > max {
            return Err(ConfigError::invalid_order("length", "minLength", "maxLength"));
        }
        Ok(Self { min, max })
    }

    fn length_message(&self) -> String {
        if self.min == self.max {
            format!("Must be exactly {} characters long", self.min)
        } else if self.max == usize::MAX {
            format!("Must be at least {} characters long", self.min)
        } else {
            format!("Must be between {} and {} characters long", self.min, self.max)
        }
    }
}

impl Default for LengthValidator {
    fn default() -> Self {
        Self {
            min: 0,
            max: usize::MAX,
        }
    }
}

impl ValidationRule for LengthValidator {
    fn rule_name(&self) -> &str {
        "length"
    }

    fn configure(&mut self, options: &RuleOptions) -> Result<(), ConfigError> {
        reject_unknown("length", options, &["minLength", "maxLength"])?;
        let min = required_option("length", options, "minLength")?;
        let max = required_option("length", options, "maxLength")?;
        *self = Self::new(min, max)?;
        Ok(())
    }

    fn check(&self, input: Value) -> Checked {
        let length = match &input {
            Value::String(s) => s.chars().count(),
            _ => return Checked::invalid(input, ErrorKey::InvalidType),
        };

        if length < self.min {
            Checked::invalid(input, ErrorKey::TooShort)
        } else if length > self.max {
            Checked::invalid(input, ErrorKey::TooLong)
        } else {
            Checked::valid(input)
        }
    }

    fn parameters(&self) -> Option<Value> {
        Some(serde_json::json!({
            "minLength": self.min,
            "maxLength": self.max,
        }))
    }

    fn default_message(&self, key: &ErrorKey) -> String {
        match key {
            ErrorKey::TooShort | ErrorKey::TooLong => self.length_message(),
            ErrorKey::InvalidType => "Must be a string".to_string(),
            other => other.default_message().to_string(),
        }
    }
}
