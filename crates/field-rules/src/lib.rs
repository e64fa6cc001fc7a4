//! # field-rules
//!
//! Declarative field validation: bind fields to ordered rule chains, run
//! every rule over the field's value and collect failures as data.
//!
//! ```
//! use field_rules::{RuleRegistry, Schema, Validator};
//! use serde_json::json;
//!
//! let schema = Schema::new()
//!     .field_rules("name", &["required"])
//!     .field("age", |f| f.rule("integer").rule_with("range", json!({ "min": 18, "max": 120 })));
//!
//! let result = Validator::new(RuleRegistry::with_defaults())
//!     .validate_value(&json!({ "name": "Ada", "age": "17" }), &schema)
//!     .unwrap();
//!
//! assert!(!result.is_valid());
//! assert_eq!(result.error_keys("age")[0].as_str(), "outOfRange");
//! assert_eq!(result.validated_data()["age"], json!(17.0));
//! ```

pub mod config;
pub mod error;
pub mod inspect;
pub mod processor;
pub mod registry;
pub mod result;
pub mod rules;
pub mod traits;
pub mod validator;
pub mod validators;

// Re-exports for easy access
pub use config::ValidatorConfig;
pub use error::{ConfigError, InspectionError, ValidatorError};
pub use inspect::{FieldInspector, FieldSource, InspectedField, Validatable};
pub use processor::Processor;
pub use registry::{RuleRegistry, DEFAULT_NAMESPACE};
pub use result::{
    DefaultResultProcessor, FailFastProcessor, FieldError, FieldFailure, FieldReport,
    MessageListProcessor, ResultProcessor, RuleFailure, ValidationResult,
};
pub use rules::{FieldBuilder, FieldDeclaration, RuleSpec, Schema};
pub use traits::{Checked, ErrorKey, RuleOptions, ValidationRule};
pub use validator::{Validator, ValidatorBuilder};

// Built-in validators
pub use validators::{
    conditional::{ConditionalValidator, Predicate},
    date::{DateFormat, DateFormatValidator, DateRangeValidator, DEFAULT_DATE_FORMAT},
    email::EmailValidator,
    length::LengthValidator,
    numeric::{IntegerValidator, RangeValidator},
    required::RequiredValidator,
    url::UrlValidator,
};
