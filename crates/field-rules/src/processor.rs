//! Stateful wrapper that runs one rule instance inside a chain

use crate::error::ConfigError;
use crate::traits::{ErrorKey, RuleOptions, ValidationRule};
use serde_json::Value;

/// One rule instance plus the validity state of its latest run
///
/// A processor is created per `(field, rule)` for every validation call.
/// `process` resets the state before running, so a reused processor never
/// reports the outcome of a previous value.
pub struct Processor {
    rule: Box<dyn ValidationRule>,
    valid: bool,
    error_key: Option<ErrorKey>,
}

impl std::fmt::Debug for Processor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Processor")
            .field("rule", &self.rule.rule_name())
            .field("valid", &self.valid)
            .field("error_key", &self.error_key)
            .finish()
    }
}

impl Processor {
    /// Wrap a rule in a fresh, valid state
    pub fn new(rule: Box<dyn ValidationRule>) -> Self {
        Self {
            rule,
            valid: true,
            error_key: None,
        }
    }

    /// The wrapped rule
    pub fn rule(&self) -> &dyn ValidationRule {
        self.rule.as_ref()
    }

    /// Validate and store rule options
    pub fn configure(&mut self, options: &RuleOptions) -> Result<(), ConfigError> {
        self.rule.configure(options)
    }

    /// Run the rule over `input` and return the value for the next rule
    pub fn process(&mut self, input: Value) -> Value {
        self.reset();
        let checked = self.rule.check(input);
        if let Some(key) = checked.error {
            self.valid = false;
            self.error_key = Some(key);
        }
        checked.value
    }

    /// Restore the initial valid state
    pub fn reset(&mut self) {
        self.valid = true;
        self.error_key = None;
    }

    /// Whether the latest `process` call passed
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Key of the failed check from the latest `process` call
    pub fn error_key(&self) -> Option<&ErrorKey> {
        self.error_key.as_ref()
    }
}
