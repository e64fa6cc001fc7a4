//! Setup error types
//!
//! Rule failures are never errors: they are recorded as data in a
//! [`ValidationResult`](crate::result::ValidationResult). The types here cover
//! the fatal cases that abort a `validate()` call before any result exists.

use thiserror::Error;

/// Error raised while configuring a rule instance
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Rule '{rule}' requires the parameter '{parameter}', but it was not provided")]
    MissingParameter { rule: String, parameter: String },

    #[error("Rule '{rule}' has '{lower}' greater than '{upper}'")]
    InvalidParameterOrder {
        rule: String,
        lower: String,
        upper: String,
    },

    #[error("Invalid value for parameter '{parameter}' of rule '{rule}': {message}")]
    InvalidParameter {
        rule: String,
        parameter: String,
        message: String,
    },

    #[error("Rule '{rule}' does not accept the parameter '{parameter}'")]
    UnknownParameter { rule: String, parameter: String },
}

impl ConfigError {
    /// Create a missing parameter error
    pub fn missing_parameter(rule: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self::MissingParameter {
            rule: rule.into(),
            parameter: parameter.into(),
        }
    }

    /// Create an error for a lower bound that exceeds its upper bound
    pub fn invalid_order(
        rule: impl Into<String>,
        lower: impl Into<String>,
        upper: impl Into<String>,
    ) -> Self {
        Self::InvalidParameterOrder {
            rule: rule.into(),
            lower: lower.into(),
            upper: upper.into(),
        }
    }

    /// Create an invalid parameter value error
    pub fn invalid_parameter(
        rule: impl Into<String>,
        parameter: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            rule: rule.into(),
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Create an unknown parameter error
    pub fn unknown_parameter(rule: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self::UnknownParameter {
            rule: rule.into(),
            parameter: parameter.into(),
        }
    }

    /// Name of the rule that rejected its configuration
    pub fn rule(&self) -> &str {
        match self {
            Self::MissingParameter { rule, .. }
            | Self::InvalidParameterOrder { rule, .. }
            | Self::InvalidParameter { rule, .. }
            | Self::UnknownParameter { rule, .. } => rule,
        }
    }
}

/// Error raised when declared fields cannot be read from the target object
#[derive(Debug, Error)]
pub enum InspectionError {
    #[error("Expected an object with named fields, found {found}")]
    NotAnObject { found: &'static str },

    #[error("Failed to convert the object into inspectable fields: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl InspectionError {
    /// Create a not-an-object error describing the JSON kind that was found
    pub fn not_an_object(value: &serde_json::Value) -> Self {
        let found = match value {
            serde_json::Value::Null => "null",
            serde_json::Value::Bool(_) => "a boolean",
            serde_json::Value::Number(_) => "a number",
            serde_json::Value::String(_) => "a string",
            serde_json::Value::Array(_) => "an array",
            serde_json::Value::Object(_) => "an object",
        };
        Self::NotAnObject { found }
    }
}

/// Fatal error returned by [`Validator::validate`](crate::validator::Validator::validate)
#[derive(Debug, Error)]
pub enum ValidatorError {
    #[error("Invalid configuration for rule '{rule}' on field '{field}': {source}")]
    Config {
        field: String,
        rule: String,
        #[source]
        source: ConfigError,
    },

    #[error("Unknown rule '{rule}' in namespace '{namespace}'")]
    UnknownRule { namespace: String, rule: String },

    #[error("Inspection failed: {0}")]
    Inspection(#[from] InspectionError),
}

impl ValidatorError {
    /// Create a configuration error bound to the field that declared it
    pub fn config(field: impl Into<String>, rule: impl Into<String>, source: ConfigError) -> Self {
        Self::Config {
            field: field.into(),
            rule: rule.into(),
            source,
        }
    }

    /// Create an unknown rule error
    pub fn unknown_rule(namespace: impl Into<String>, rule: impl Into<String>) -> Self {
        Self::UnknownRule {
            namespace: namespace.into(),
            rule: rule.into(),
        }
    }

    /// Whether this error comes from the declared rule metadata rather than the object
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Config { .. } | Self::UnknownRule { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_config_error_messages() {
        let error = ConfigError::missing_parameter("length", "maxLength");
        assert_eq!(
            error.to_string(),
            "Rule 'length' requires the parameter 'maxLength', but it was not provided"
        );
        assert_eq!(error.rule(), "length");

        let error = ConfigError::invalid_order("dateRange", "minDate", "maxDate");
        assert_eq!(error.to_string(), "Rule 'dateRange' has 'minDate' greater than 'maxDate'");
    }

    #[test]
    fn test_not_an_object_describes_kind() {
        let error = InspectionError::not_an_object(&json!("text"));
        assert_eq!(
            error.to_string(),
            "Expected an object with named fields, found a string"
        );
    }

    #[test]
    fn test_validator_error_classification() {
        let error = ValidatorError::config(
            "username",
            "length",
            ConfigError::missing_parameter("length", "minLength"),
        );
        assert!(error.is_configuration());
        assert!(ValidatorError::unknown_rule("validator", "nope").is_configuration());

        let error: ValidatorError = InspectionError::not_an_object(&json!(1)).into();
        assert!(!error.is_configuration());
    }
}
