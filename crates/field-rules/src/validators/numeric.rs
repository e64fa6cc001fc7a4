//! Numeric value validators

use crate::error::ConfigError;
use crate::traits::{option, reject_unknown, Checked, ErrorKey, RuleOptions, ValidationRule};
use regex::Regex;
use serde_json::{Number, Value};
use std::sync::OnceLock;

fn integer_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[+-]?(0|[1-9][0-9]*)$").ok())
        .as_ref()
}

fn numeric_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?$").ok())
        .as_ref()
}

/// Parse a decimal string the way form input is usually written.
/// Surrounding whitespace is ignored; `inf`, `NaN` and hex are not numbers.
pub(crate) fn parse_numeric(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if !numeric_pattern().is_some_and(|regex| regex.is_match(trimmed)) {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Validator accepting integers and strings that spell an `i64`
///
/// Strings may carry surrounding whitespace and a sign, but no leading zeros
/// and no fractional part. The value passes through unchanged.
#[derive(Debug, Clone, Default)]
pub struct IntegerValidator;

impl IntegerValidator {
    /// Create a new integer validator
    pub fn new() -> Self {
        Self
    }

    fn is_integer(&self, value: &Value) -> bool {
        match value {
            Value::Number(num) => num.is_i64() || num.is_u64(),
            Value::String(s) => {
                let trimmed = s.trim();
                integer_pattern().is_some_and(|regex| regex.is_match(trimmed))
                    && trimmed.parse::<i64>().is_ok()
            }
            _ => false,
        }
    }
}

impl ValidationRule for IntegerValidator {
    fn rule_name(&self) -> &str {
        "integer"
    }

    fn check(&self, input: Value) -> Checked {
        if self.is_integer(&input) {
            Checked::valid(input)
        } else {
            Checked::invalid(input, ErrorKey::NotAnInteger)
        }
    }
}

/// Validator for numeric values within an inclusive range
///
/// Numbers and numeric strings are coerced to a float, which is what later
/// rules in the chain receive. Unconfigured, every finite number is in range.
#[derive(Debug, Clone)]
pub struct RangeValidator {
    /// Minimum value (inclusive)
    pub min: f64,
    /// Maximum value (inclusive)
    pub max: f64,
}

impl RangeValidator {
    /// Create a range validator, rejecting `min > max`
    pub fn new(min: f64, max: f64) -> Result<Self, ConfigError> {
        if min > max {
            return Err(ConfigError::invalid_order("range", "min", "max"));
        }
        Ok(Self { min, max })
    }

    fn numeric_value(value: &Value) -> Option<f64> {
        match value {
            Value::Number(num) => num.as_f64(),
            Value::String(s) => parse_numeric(s),
            _ => None,
        }
    }

    fn range_message(&self) -> String {
        match (self.min == f64::MIN, self.max == f64::MAX) {
            (false, false) => format!("Must be between {} and {}", self.min, self.max),
            (false, true) => format!("Must be at least {}", self.min),
            (true, false) => format!("Must be at most {}", self.max),
            (true, true) => "Must be a finite number".to_string(),
        }
    }
}

impl Default for RangeValidator {
    fn default() -> Self {
        Self {
            min: f64::MIN,
            max: f64::MAX,
        }
    }
}

impl ValidationRule for RangeValidator {
    fn rule_name(&self) -> &str {
        "range"
    }

    fn configure(&mut self, options: &RuleOptions) -> Result<(), ConfigError> {
        reject_unknown("range", options, &["min", "max"])?;
        let min = option("range", options, "min")?.unwrap_or(f64::MIN);
        let max = option("range", options, "max")?.unwrap_or(f64::MAX);
        *self = Self::new(min, max)?;
        Ok(())
    }

    fn check(&self, input: Value) -> Checked {
        let Some(number) = Self::numeric_value(&input) else {
            return Checked::invalid(input, ErrorKey::NotNumeric);
        };

        let coerced = match Number::from_f64(number) {
            Some(num) => Value::Number(num),
            None => input,
        };

        if number < self.min || number > self.max {
            Checked::invalid(coerced, ErrorKey::OutOfRange)
        } else {
            Checked::valid(coerced)
        }
    }

    fn parameters(&self) -> Option<Value> {
        Some(serde_json::json!({
            "min": self.min,
            "max": self.max,
        }))
    }

    fn default_message(&self, key: &ErrorKey) -> String {
        match key {
            ErrorKey::OutOfRange => self.range_message(),
            other => other.default_message().to_string(),
        }
    }
}
