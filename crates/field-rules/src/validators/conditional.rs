//! Conditional validation through user-supplied predicates

use crate::traits::{Checked, ErrorKey, ValidationRule};
use serde_json::Value;
use std::sync::Arc;

/// Predicate over a field value
pub type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Validator that applies `validator` only when `condition` holds
///
/// Both predicates are fixed at construction, so the rule is registered under
/// its own name rather than configured through declared options.
#[derive(Clone)]
pub struct ConditionalValidator {
    name: String,
    condition: Predicate,
    validator: Predicate,
    message: Option<String>,
}

impl ConditionalValidator {
    /// Create a conditional validator from a condition and the check it guards
    pub fn new<C, V>(condition: C, validator: V) -> Self
    where
        C: Fn(&Value) -> bool + Send + Sync + 'static,
        V: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            name: "conditional".to_string(),
            condition: Arc::new(condition),
            validator: Arc::new(validator),
            message: None,
        }
    }

    /// Name reported by `rule_name`, usually the name it is registered under
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Default message for `conditionNotMet`
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl std::fmt::Debug for ConditionalValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConditionalValidator")
            .field("name", &self.name)
            .field("message", &self.message)
            .finish()
    }
}

impl ValidationRule for ConditionalValidator {
    fn rule_name(&self) -> &str {
        &self.name
    }

    fn check(&self, input: Value) -> Checked {
        if (self.condition)(&input) && !(self.validator)(&input) {
            Checked::invalid(input, ErrorKey::ConditionNotMet)
        } else {
            Checked::valid(input)
        }
    }

    fn parameters(&self) -> Option<Value> {
        Some(serde_json::json!({ "name": self.name }))
    }

    fn default_message(&self, key: &ErrorKey) -> String {
        match (key, &self.message) {
            (ErrorKey::ConditionNotMet, Some(message)) => message.clone(),
            (other, _) => other.default_message().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::RuleOptions;
    use serde_json::json;

    fn long_strings_need_digit() -> ConditionalValidator {
        ConditionalValidator::new(
            |value| value.as_str().is_some_and(|s| s.len() > 5),
            |value| value.as_str().is_some_and(|s| s.chars().any(|c| c.is_ascii_digit())),
        )
    }

    #[test]
    fn test_condition_true_and_validator_passes() {
        let rule = long_strings_need_digit();
        assert!(rule.check(json!("secret1")).is_valid());
    }

    #[test]
    fn test_condition_true_and_validator_fails() {
        let rule = long_strings_need_digit();
        let checked = rule.check(json!("secretless"));
        assert_eq!(checked.error, Some(ErrorKey::ConditionNotMet));
        assert_eq!(checked.value, json!("secretless"));
    }

    #[test]
    fn test_condition_false_passes_unconditionally() {
        let rule = long_strings_need_digit();
        assert!(rule.check(json!("abc")).is_valid());
        assert!(rule.check(json!(12)).is_valid());
        assert!(rule.check(Value::Null).is_valid());
    }

    #[test]
    fn test_named_rule_and_message() {
        let mut rule = long_strings_need_digit()
            .named("strongPassword")
            .message("Long passwords need a digit");

        assert_eq!(rule.rule_name(), "strongPassword");
        assert_eq!(
            rule.default_message(&ErrorKey::ConditionNotMet),
            "Long passwords need a digit"
        );
        assert!(rule.configure(&RuleOptions::new()).is_ok());
    }

    #[test]
    fn test_clones_share_predicates() {
        let rule = long_strings_need_digit();
        let copy = rule.clone();
        assert_eq!(
            copy.check(json!("abcdefg")).error,
            rule.check(json!("abcdefg")).error
        );
    }
}
