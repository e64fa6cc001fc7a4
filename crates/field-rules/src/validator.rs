//! Orchestration: resolve declared rules, run each field's chain, hand the
//! outcomes to a result processor

use crate::config::ValidatorConfig;
use crate::error::{ConfigError, InspectionError, ValidatorError};
use crate::inspect::{FieldInspector, FieldSource, InspectedField, Validatable};
use crate::processor::Processor;
use crate::registry::RuleRegistry;
use crate::result::{DefaultResultProcessor, FieldReport, ResultProcessor, RuleFailure};
use crate::rules::{RuleSpec, Schema};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Runs declared rule chains over objects
///
/// Every call resolves fresh rule instances from the registry, so a single
/// validator can be shared across threads and reused for any number of
/// objects. Rule failures end up in the output; only broken declarations
/// (unknown rules, bad options) and uninspectable objects are errors.
#[derive(Debug, Clone)]
pub struct Validator<P = DefaultResultProcessor> {
    registry: Arc<RuleRegistry>,
    config: ValidatorConfig,
    processor: P,
}

impl Validator {
    /// Validator over `registry` with the default namespace and result shape
    pub fn new(registry: impl Into<Arc<RuleRegistry>>) -> Self {
        Self {
            registry: registry.into(),
            config: ValidatorConfig::default(),
            processor: DefaultResultProcessor,
        }
    }

    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::default()
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(RuleRegistry::with_defaults())
    }
}

impl<P: ResultProcessor> Validator<P> {
    /// Swap the result processor, keeping registry and configuration
    pub fn with_processor<Q: ResultProcessor>(self, processor: Q) -> Validator<Q> {
        Validator {
            registry: self.registry,
            config: self.config,
            processor,
        }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Validate a type that declares its own schema
    pub fn validate<T: Validatable>(&self, object: &T) -> Result<P::Output, ValidatorError> {
        let schema = object.schema();
        self.validate_with(object, &schema)
    }

    /// Validate a JSON object against a schema
    pub fn validate_value(&self, object: &Value, schema: &Schema) -> Result<P::Output, ValidatorError> {
        self.validate_with(object, schema)
    }

    /// Validate any serializable type by converting it to JSON first
    pub fn validate_serialized<T: Serialize>(
        &self,
        object: &T,
        schema: &Schema,
    ) -> Result<P::Output, ValidatorError> {
        let value = serde_json::to_value(object).map_err(InspectionError::from)?;
        self.validate_with(&value, schema)
    }

    /// Validate `source` against the fields `inspector` declares for the configured marker
    pub fn validate_with(
        &self,
        source: &dyn FieldSource,
        inspector: &dyn FieldInspector,
    ) -> Result<P::Output, ValidatorError> {
        let fields = inspector.inspect(source, &self.config.marker).map_err(|e| {
            tracing::warn!("Validation aborted, object could not be inspected: {}", e);
            ValidatorError::from(e)
        })?;

        let mut reports = Vec::with_capacity(fields.len());
        for field in fields {
            match self.run_chain(field) {
                Ok(report) => reports.push(report),
                Err(e) => {
                    tracing::warn!("Validation aborted: {}", e);
                    return Err(e);
                }
            }
        }

        Ok(self.processor.process(reports))
    }

    fn run_chain(&self, field: InspectedField<'_>) -> Result<FieldReport, ValidatorError> {
        let declaration = field.declaration;
        let field_name = declaration.field_name.as_str();
        tracing::debug!(
            "Validating field '{}' with {} rule(s)",
            field_name,
            declaration.rules.len()
        );

        let mut report = FieldReport::new(field_name, Value::Null);
        let mut current = field.value;

        for spec in &declaration.rules {
            let mut processor = self.resolve(field_name, spec)?;
            processor.reset();
            current = processor.process(current);

            match processor.error_key() {
                Some(key) => {
                    let message = match declaration.message_for(&spec.name) {
                        Some(message) => message.to_string(),
                        None => processor.rule().default_message(key),
                    };
                    tracing::debug!("Field '{}' failed rule '{}' ({})", field_name, spec.name, key);
                    report.failures.push(RuleFailure {
                        rule: spec.name.clone(),
                        error_key: key.clone(),
                        message,
                    });
                }
                None => tracing::trace!("Field '{}' passed rule '{}'", field_name, spec.name),
            }
        }

        report.value = current;
        Ok(report)
    }

    fn resolve(&self, field: &str, spec: &RuleSpec) -> Result<Processor, ValidatorError> {
        let rule = self.registry.get(&self.config.namespace, &spec.name)?;
        let mut processor = Processor::new(rule);

        if spec.has_config() {
            let options = spec.config.as_object().ok_or_else(|| {
                ValidatorError::config(
                    field,
                    &spec.name,
                    ConfigError::invalid_parameter(&spec.name, "options", "expected an object of named options"),
                )
            })?;
            processor
                .configure(options)
                .map_err(|e| ValidatorError::config(field, &spec.name, e))?;
        }

        Ok(processor)
    }
}

/// Fluent construction of a [`Validator`]
#[derive(Debug, Default)]
pub struct ValidatorBuilder<P = DefaultResultProcessor> {
    registry: Option<Arc<RuleRegistry>>,
    config: ValidatorConfig,
    processor: P,
}

impl<P: ResultProcessor> ValidatorBuilder<P> {
    pub fn registry(mut self, registry: impl Into<Arc<RuleRegistry>>) -> Self {
        self.registry = Some(registry.into());
        self
    }

    pub fn config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.config.namespace = namespace.into();
        self
    }

    pub fn marker(mut self, marker: impl Into<String>) -> Self {
        self.config.marker = marker.into();
        self
    }

    pub fn processor<Q: ResultProcessor>(self, processor: Q) -> ValidatorBuilder<Q> {
        ValidatorBuilder {
            registry: self.registry,
            config: self.config,
            processor,
        }
    }

    /// Build the validator; without a registry the built-in rules are used
    pub fn build(self) -> Validator<P> {
        Validator {
            registry: self
                .registry
                .unwrap_or_else(|| Arc::new(RuleRegistry::with_defaults())),
            config: self.config,
            processor: self.processor,
        }
    }
}
