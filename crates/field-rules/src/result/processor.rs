//! Strategies that turn per-field chain outcomes into a result shape

use super::ValidationResult;
use crate::traits::ErrorKey;
use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;

/// One failed rule inside a field's chain
#[derive(Debug, Clone, PartialEq)]
pub struct RuleFailure {
    pub rule: String,
    pub error_key: ErrorKey,
    pub message: String,
}

/// Raw outcome of running one field's chain
#[derive(Debug, Clone, PartialEq)]
pub struct FieldReport {
    pub field: String,
    /// Value the chain ended with, recorded whether or not it is valid
    pub value: Value,
    /// Failures in rule order
    pub failures: Vec<RuleFailure>,
}

impl FieldReport {
    pub fn new(field: impl Into<String>, value: Value) -> Self {
        Self {
            field: field.into(),
            value,
            failures: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Builds the caller-facing output from field reports in declaration order
pub trait ResultProcessor {
    type Output;

    fn process(&self, reports: Vec<FieldReport>) -> Self::Output;
}

/// Populates a [`ValidationResult`]
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultResultProcessor;

impl ResultProcessor for DefaultResultProcessor {
    type Output = ValidationResult;

    fn process(&self, reports: Vec<FieldReport>) -> ValidationResult {
        let mut result = ValidationResult::new();
        for report in reports {
            result.set_validated_data(report.field.clone(), report.value);
            for failure in report.failures {
                result.add_error(report.field.clone(), failure.error_key, failure.message);
            }
        }
        result
    }
}

/// Flattens failures into `field -> [message]`, leaving out fields that passed
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageListProcessor;

impl ResultProcessor for MessageListProcessor {
    type Output = IndexMap<String, Vec<String>>;

    fn process(&self, reports: Vec<FieldReport>) -> Self::Output {
        let mut messages = IndexMap::new();
        for report in reports.into_iter().filter(|r| !r.is_valid()) {
            let mut field_messages: Vec<String> = Vec::with_capacity(report.failures.len());
            for failure in report.failures {
                if !field_messages.contains(&failure.message) {
                    field_messages.push(failure.message);
                }
            }
            messages.insert(report.field, field_messages);
        }
        messages
    }
}

/// First failure, in field-then-rule order, reported by [`FailFastProcessor`]
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Field '{field}' failed rule '{rule}': {message}")]
pub struct FieldFailure {
    pub field: String,
    pub rule: String,
    pub error_key: ErrorKey,
    pub message: String,
}

/// Returns the validated data, or the first failure as an error
#[derive(Debug, Clone, Copy, Default)]
pub struct FailFastProcessor;

impl ResultProcessor for FailFastProcessor {
    type Output = Result<IndexMap<String, Value>, FieldFailure>;

    fn process(&self, reports: Vec<FieldReport>) -> Self::Output {
        let mut data = IndexMap::with_capacity(reports.len());
        for report in reports {
            if let Some(failure) = report.failures.into_iter().next() {
                return Err(FieldFailure {
                    field: report.field,
                    rule: failure.rule,
                    error_key: failure.error_key,
                    message: failure.message,
                });
            }
            data.insert(report.field, report.value);
        }
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn failure(rule: &str, key: ErrorKey, message: &str) -> RuleFailure {
        RuleFailure {
            rule: rule.to_string(),
            error_key: key,
            message: message.to_string(),
        }
    }

    fn reports() -> Vec<FieldReport> {
        let name = FieldReport::new("name", json!("Ada"));

        let mut email = FieldReport::new("email", json!("bad"));
        email.failures.push(failure("email", ErrorKey::InvalidFormat, "Invalid email"));
        email.failures.push(failure("email", ErrorKey::InvalidFormat, "Invalid email"));

        let mut age = FieldReport::new("age", json!(5.0));
        age.failures.push(failure("range", ErrorKey::OutOfRange, "Must be between 18 and 120"));

        vec![name, email, age]
    }

    #[test]
    fn test_default_processor_builds_validation_result() {
        let result = DefaultResultProcessor.process(reports());

        assert!(!result.is_valid());
        assert_eq!(result.field_errors("email").len(), 1);
        assert_eq!(result.error_keys("age"), vec![&ErrorKey::OutOfRange]);
        let fields: Vec<&String> = result.validated_data().keys().collect();
        assert_eq!(fields, vec!["name", "email", "age"]);
        assert_eq!(result.validated_data()["age"], json!(5.0));
    }

    #[test]
    fn test_message_list_omits_valid_fields() {
        let messages = MessageListProcessor.process(reports());

        assert_eq!(messages.len(), 2);
        assert!(!messages.contains_key("name"));
        assert_eq!(messages["email"], vec!["Invalid email".to_string()]);
        assert_eq!(messages["age"], vec!["Must be between 18 and 120".to_string()]);
    }

    #[test]
    fn test_fail_fast_reports_first_failure() {
        let error = FailFastProcessor.process(reports()).unwrap_err();
        assert_eq!(error.field, "email");
        assert_eq!(error.rule, "email");
        assert_eq!(error.error_key, ErrorKey::InvalidFormat);
        assert_eq!(error.to_string(), "Field 'email' failed rule 'email': Invalid email");
    }

    #[test]
    fn test_fail_fast_returns_data_when_valid() {
        let data = FailFastProcessor
            .process(vec![FieldReport::new("name", json!("Ada"))])
            .unwrap();
        assert_eq!(data["name"], json!("Ada"));
    }
}
