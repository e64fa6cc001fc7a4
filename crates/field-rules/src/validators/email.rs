//! Email format validator

use crate::error::ConfigError;
use crate::traits::{option, reject_unknown, Checked, ErrorKey, RuleOptions, ValidationRule};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

const ASCII_WITH_TLD: &str =
    r"^[a-zA-Z0-9]([a-zA-Z0-9._%+-]*[a-zA-Z0-9])?@[a-zA-Z0-9]([a-zA-Z0-9.-]*[a-zA-Z0-9])?\.[a-zA-Z]{2,}$";
const ASCII_WITHOUT_TLD: &str =
    r"^[a-zA-Z0-9]([a-zA-Z0-9._%+-]*[a-zA-Z0-9])?@[a-zA-Z0-9]([a-zA-Z0-9.-]*[a-zA-Z0-9])?$";
const UNICODE_WITH_TLD: &str = r"^[^\s@.]+[^\s@]*@[^\s@.]+[^\s@]*\.[^\s@]+$";
const UNICODE_WITHOUT_TLD: &str = r"^[^\s@.]+[^\s@]*@[^\s@.]+[^\s@]*$";

/// Validator for email address format
#[derive(Debug, Clone)]
pub struct EmailValidator {
    /// Allow international (non-ASCII) characters
    pub allow_unicode: bool,
    /// Require a top-level domain (e.g. `.com`)
    pub require_tld: bool,
}

impl EmailValidator {
    /// Create a new email validator with default settings
    pub fn new() -> Self {
        Self {
            allow_unicode: false,
            require_tld: true,
        }
    }

    pub fn allow_unicode(mut self, allow: bool) -> Self {
        self.allow_unicode = allow;
        self
    }

    pub fn require_tld(mut self, require: bool) -> Self {
        self.require_tld = require;
        self
    }

    /// Compiled pattern for the current settings
    fn pattern(&self) -> Option<&'static Regex> {
        static PATTERNS: OnceLock<[Option<Regex>; 4]> = OnceLock::new();
        let patterns = PATTERNS.get_or_init(|| {
            [
                Regex::new(ASCII_WITH_TLD).ok(),
                Regex::new(ASCII_WITHOUT_TLD).ok(),
                Regex::new(UNICODE_WITH_TLD).ok(),
                Regex::new(UNICODE_WITHOUT_TLD).ok(),
            ]
        });
        let index = match (self.allow_unicode, self.require_tld) {
            (false, true) => 0,
            (false, false) => 1,
            (true, true) => 2,
            (true, false) => 3,
        };
        patterns[index].as_ref()
    }

    fn is_valid_email(&self, email: &str) -> bool {
        let Some((local_part, domain_part)) = email.split_once('@') else {
            return false;
        };

        if local_part.is_empty() || domain_part.is_empty() || domain_part.contains('@') {
            return false;
        }

        // RFC 5321 limits
        if local_part.len() > 64 || domain_part.len() > 255 {
            return false;
        }

        if email.contains("..") {
            return false;
        }

        self.pattern().is_some_and(|regex| regex.is_match(email))
    }
}

impl Default for EmailValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationRule for EmailValidator {
    fn rule_name(&self) -> &str {
        "email"
    }

    fn configure(&mut self, options: &RuleOptions) -> Result<(), ConfigError> {
        reject_unknown("email", options, &["allowUnicode", "requireTld"])?;
        if let Some(allow) = option("email", options, "allowUnicode")? {
            self.allow_unicode = allow;
        }
        if let Some(require) = option("email", options, "requireTld")? {
            self.require_tld = require;
        }
        Ok(())
    }

    fn check(&self, input: Value) -> Checked {
        let valid = match input.as_str() {
            Some(email) => self.is_valid_email(email),
            None => return Checked::invalid(input, ErrorKey::InvalidType),
        };

        if valid {
            Checked::valid(input)
        } else {
            Checked::invalid(input, ErrorKey::InvalidFormat)
        }
    }

    fn parameters(&self) -> Option<Value> {
        Some(serde_json::json!({
            "allowUnicode": self.allow_unicode,
            "requireTld": self.require_tld,
        }))
    }

    fn default_message(&self, key: &ErrorKey) -> String {
        match key {
            ErrorKey::InvalidFormat => "Must be a valid email address".to_string(),
            other => other.default_message().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn error_for(validator: &EmailValidator, email: &str) -> Option<ErrorKey> {
        validator.check(json!(email)).error
    }

    #[test]
    fn test_email_validator_valid_emails() {
        let validator = EmailValidator::new();

        for email in [
            "test@example.com",
            "user.name@domain.co.uk",
            "first+last@subdomain.example.org",
            "user123@test-domain.com",
            "a@b.co",
        ] {
            assert_eq!(error_for(&validator, email), None, "'{}' should be valid", email);
        }
    }

    #[test]
    fn test_email_validator_invalid_emails() {
        let validator = EmailValidator::new();

        let too_long = format!("toolong{}@domain.com", "a".repeat(60));
        for email in [
            "",
            "bad",
            "plainaddress",
            "@missingdomain.com",
            "missing@.com",
            "double@@domain.com",
            "spaces @domain.com",
            "dots..here@domain.com",
            too_long.as_str(),
            "test@",
            "test@domain",
        ] {
            assert_eq!(
                error_for(&validator, email),
                Some(ErrorKey::InvalidFormat),
                "'{}' should be invalid",
                email
            );
        }
    }

    #[test]
    fn test_email_validator_invalid_type() {
        let validator = EmailValidator::new();
        assert_eq!(validator.check(json!(42)).error, Some(ErrorKey::InvalidType));
        assert_eq!(validator.check(Value::Null).error, Some(ErrorKey::InvalidType));
    }

    #[test]
    fn test_email_validator_configured_without_tld() {
        let mut validator = EmailValidator::new();
        let options = json!({ "requireTld": false });
        validator.configure(options.as_object().unwrap()).unwrap();

        assert_eq!(error_for(&validator, "admin@intranet"), None);
    }

    #[test]
    fn test_email_validator_unicode_domain() {
        let validator = EmailValidator::new().allow_unicode(true);
        assert_eq!(error_for(&validator, "test@тест.рф"), None);
        assert_eq!(
            error_for(&EmailValidator::new(), "test@тест.рф"),
            Some(ErrorKey::InvalidFormat)
        );
    }

    #[test]
    fn test_email_validator_rejects_ill_typed_option() {
        let mut validator = EmailValidator::new();
        let options = json!({ "requireTld": "yes" });
        let error = validator.configure(options.as_object().unwrap()).unwrap_err();
        assert!(matches!(error, ConfigError::InvalidParameter { .. }));
    }
}
