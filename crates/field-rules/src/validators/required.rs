//! Required field validator

use crate::traits::{Checked, ErrorKey, ValidationRule};
use serde_json::Value;

/// Validator that ensures a field is present and not empty
///
/// `null`, blank strings and empty arrays count as missing. Numbers
/// (including `0`), booleans (including `false`) and objects are present.
#[derive(Debug, Clone, Default)]
pub struct RequiredValidator;

impl RequiredValidator {
    /// Create a new required validator
    pub fn new() -> Self {
        Self
    }

    /// Check if a value is considered empty
    fn is_empty(&self, value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::String(s) => s.trim().is_empty(),
            Value::Array(arr) => arr.is_empty(),
            _ => false,
        }
    }
}

impl ValidationRule for RequiredValidator {
    fn rule_name(&self) -> &str {
        "required"
    }

    fn check(&self, input: Value) -> Checked {
        if self.is_empty(&input) {
            Checked::invalid(input, ErrorKey::MissingValue)
        } else {
            Checked::valid(input)
        }
    }
}
