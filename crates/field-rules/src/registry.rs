//! Rule lookup by namespace and name

use crate::error::ValidatorError;
use crate::traits::ValidationRule;
use crate::validators::*;
use std::collections::HashMap;
use std::sync::Arc;

/// Namespace the built-in rules are registered under
pub const DEFAULT_NAMESPACE: &str = "validator";

type RuleFactory = Arc<dyn Fn() -> Box<dyn ValidationRule> + Send + Sync>;

/// Registry of rule prototypes
///
/// `get` builds a fresh instance on every call, so each `(field, rule)` pair
/// of a validation run owns its rule outright and no configuration or state
/// leaks between fields or runs. The registry is immutable while shared and
/// safe to read from many threads.
#[derive(Clone, Default)]
pub struct RuleRegistry {
    namespaces: HashMap<String, HashMap<String, RuleFactory>>,
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (namespace, rules) in &self.namespaces {
            let mut names: Vec<&String> = rules.keys().collect();
            names.sort();
            map.entry(namespace, &names);
        }
        map.finish()
    }
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in rule under [`DEFAULT_NAMESPACE`]
    ///
    /// Conditional rules carry closures and have to be registered by the
    /// caller under their own names.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry
            .register(DEFAULT_NAMESPACE, "required", RequiredValidator::new())
            .register(DEFAULT_NAMESPACE, "email", EmailValidator::new())
            .register(DEFAULT_NAMESPACE, "url", UrlValidator::new())
            .register(DEFAULT_NAMESPACE, "length", LengthValidator::default())
            .register(DEFAULT_NAMESPACE, "integer", IntegerValidator::new())
            .register(DEFAULT_NAMESPACE, "range", RangeValidator::default())
            .register(DEFAULT_NAMESPACE, "dateFormat", DateFormatValidator::new())
            .register(DEFAULT_NAMESPACE, "dateRange", DateRangeValidator::default());
        registry
    }

    /// Register a prototype; lookups hand out clones of it
    pub fn register<R>(
        &mut self,
        namespace: impl Into<String>,
        name: impl Into<String>,
        rule: R,
    ) -> &mut Self
    where
        R: ValidationRule + Clone + 'static,
    {
        self.register_factory(namespace, name, move || Box::new(rule.clone()))
    }

    /// Register a constructor invoked on every lookup
    pub fn register_factory<F>(
        &mut self,
        namespace: impl Into<String>,
        name: impl Into<String>,
        factory: F,
    ) -> &mut Self
    where
        F: Fn() -> Box<dyn ValidationRule> + Send + Sync + 'static,
    {
        let namespace = namespace.into();
        let name = name.into();
        tracing::debug!("Registering rule '{}' in namespace '{}'", name, namespace);

        self.namespaces
            .entry(namespace)
            .or_default()
            .insert(name, Arc::new(factory));
        self
    }

    /// Builder-style variant of [`register`](Self::register)
    pub fn with_rule<R>(mut self, namespace: impl Into<String>, name: impl Into<String>, rule: R) -> Self
    where
        R: ValidationRule + Clone + 'static,
    {
        self.register(namespace, name, rule);
        self
    }

    /// Build a fresh instance of a registered rule
    pub fn get(&self, namespace: &str, name: &str) -> Result<Box<dyn ValidationRule>, ValidatorError> {
        self.namespaces
            .get(namespace)
            .and_then(|rules| rules.get(name))
            .map(|factory| factory())
            .ok_or_else(|| ValidatorError::unknown_rule(namespace, name))
    }

    pub fn contains(&self, namespace: &str, name: &str) -> bool {
        self.namespaces
            .get(namespace)
            .is_some_and(|rules| rules.contains_key(name))
    }

    /// Sorted rule names registered in a namespace
    pub fn rule_names(&self, namespace: &str) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .namespaces
            .get(namespace)
            .map(|rules| rules.keys().map(String::as_str).collect())
            .unwrap_or_default();
        names.sort_unstable();
        names
    }

    /// Total number of registered rules across namespaces
    pub fn len(&self) -> usize {
        self.namespaces.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
