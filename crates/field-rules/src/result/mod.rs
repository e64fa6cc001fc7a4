//! Aggregated validation results

pub mod processor;

use crate::traits::ErrorKey;
use indexmap::IndexMap;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

pub use processor::{
    DefaultResultProcessor, FailFastProcessor, FieldFailure, FieldReport, MessageListProcessor,
    ResultProcessor, RuleFailure,
};

/// A recorded failure for one field
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub error_key: ErrorKey,
    pub message: String,
}

impl FieldError {
    pub fn new(error_key: ErrorKey, message: impl Into<String>) -> Self {
        Self {
            error_key,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.error_key)
    }
}

/// Validated values and deduplicated errors, keyed by field in insertion order
///
/// A result is valid exactly when no field has an error. It serializes as
/// `{ isValid, errors, validatedData }`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    errors: IndexMap<String, Vec<FieldError>>,
    validated_data: IndexMap<String, Value>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error unless the field already has one with the same key and message
    pub fn add_error(&mut self, field: impl Into<String>, error_key: ErrorKey, message: impl Into<String>) {
        let error = FieldError::new(error_key, message);
        let field_errors = self.errors.entry(field.into()).or_default();
        if !field_errors.contains(&error) {
            field_errors.push(error);
        }
    }

    /// Set the value a field ended its chain with; the last write wins
    pub fn set_validated_data(&mut self, field: impl Into<String>, value: Value) {
        self.validated_data.insert(field.into(), value);
    }

    /// True when no field has a recorded error
    pub fn is_valid(&self) -> bool {
        self.errors.values().all(Vec::is_empty)
    }

    pub fn has_errors(&self) -> bool {
        !self.is_valid()
    }

    pub fn errors(&self) -> &IndexMap<String, Vec<FieldError>> {
        &self.errors
    }

    pub fn validated_data(&self) -> &IndexMap<String, Value> {
        &self.validated_data
    }

    /// Errors recorded for one field, empty when it passed
    pub fn field_errors(&self, field: &str) -> &[FieldError] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn has_field_errors(&self, field: &str) -> bool {
        !self.field_errors(field).is_empty()
    }

    /// Error keys for one field, in the order the rules ran
    pub fn error_keys(&self, field: &str) -> Vec<&ErrorKey> {
        self.field_errors(field).iter().map(|e| &e.error_key).collect()
    }

    /// Total number of errors across all fields
    pub fn total_errors(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    /// Structured export: `{ isValid, errors, validatedData }`
    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "isValid": self.is_valid(),
            "errors": self.errors,
            "validatedData": self.validated_data,
        })
    }

    /// Split into the error map and the validated data
    pub fn into_parts(self) -> (IndexMap<String, Vec<FieldError>>, IndexMap<String, Value>) {
        (self.errors, self.validated_data)
    }
}

impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationResult", 3)?;
        state.serialize_field("isValid", &self.is_valid())?;
        state.serialize_field("errors", &self.errors)?;
        state.serialize_field("validatedData", &self.validated_data)?;
        state.end()
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "Validation passed for {} field(s)", self.validated_data.len())
        } else {
            let failed = self.errors.values().filter(|e| !e.is_empty()).count();
            write!(f, "Validation failed for {} field(s):", failed)?;
            for (field, field_errors) in &self.errors {
                for error in field_errors {
                    write!(f, "\n  {}: {}", field, error)?;
                }
            }
            Ok(())
        }
    }
}
