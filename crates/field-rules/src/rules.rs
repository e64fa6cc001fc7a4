//! Field declarations and the schema builder that maps fields to rule chains

use crate::registry::DEFAULT_NAMESPACE;
use serde_json::Value;
use std::collections::HashMap;

/// One rule in a field's chain
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSpec {
    /// Registered rule name
    pub name: String,
    /// Rule options: an object, or `null` when none were declared
    pub config: Value,
}

impl RuleSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: Value::Null,
        }
    }

    pub fn with_config(name: impl Into<String>, config: Value) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }

    /// Whether the declaration carries options that must be passed to `configure`
    pub fn has_config(&self) -> bool {
        match &self.config {
            Value::Null => false,
            Value::Object(map) => !map.is_empty(),
            _ => true,
        }
    }
}

/// A field bound to its ordered rule chain
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldDeclaration {
    pub field_name: String,
    /// Rules in execution order
    pub rules: Vec<RuleSpec>,
    /// Message overrides keyed by rule name
    pub messages: HashMap<String, String>,
}

impl FieldDeclaration {
    pub fn new(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            ..Self::default()
        }
    }

    /// Message declared for a rule, if any
    pub fn message_for(&self, rule: &str) -> Option<&str> {
        self.messages.get(rule).map(String::as_str)
    }

    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name.as_str()).collect()
    }

    fn merge(&mut self, other: FieldDeclaration) {
        self.rules.extend(other.rules);
        self.messages.extend(other.messages);
    }
}

/// Fluent builder for a single field declaration
#[derive(Debug)]
pub struct FieldBuilder {
    declaration: FieldDeclaration,
}

impl FieldBuilder {
    fn new(field_name: String) -> Self {
        Self {
            declaration: FieldDeclaration::new(field_name),
        }
    }

    /// Append a rule without options
    pub fn rule(mut self, name: impl Into<String>) -> Self {
        self.declaration.rules.push(RuleSpec::new(name));
        self
    }

    /// Append a rule with options, e.g. `json!({ "minLength": 3, "maxLength": 20 })`
    pub fn rule_with(mut self, name: impl Into<String>, config: Value) -> Self {
        self.declaration.rules.push(RuleSpec::with_config(name, config));
        self
    }

    /// Override the message reported when `rule` fails
    pub fn message(mut self, rule: impl Into<String>, message: impl Into<String>) -> Self {
        self.declaration.messages.insert(rule.into(), message.into());
        self
    }

    pub fn build(self) -> FieldDeclaration {
        self.declaration
    }
}

/// Ordered field declarations for one marker kind
///
/// This is the explicit replacement for annotating struct fields: a schema
/// lists the fields to validate, in the order they are validated.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    marker: String,
    fields: Vec<FieldDeclaration>,
}

impl Schema {
    /// Empty schema for the default `validator` marker
    pub fn new() -> Self {
        Self::for_marker(DEFAULT_NAMESPACE)
    }

    pub fn for_marker(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            fields: Vec::new(),
        }
    }

    /// Declare a field. Declaring the same field again appends to its chain.
    pub fn field<F>(self, field_name: impl Into<String>, build: F) -> Self
    where
        F: FnOnce(FieldBuilder) -> FieldBuilder,
    {
        let declaration = build(FieldBuilder::new(field_name.into())).build();
        self.declaration(declaration)
    }

    /// Declare a field with option-less rules
    pub fn field_rules(self, field_name: impl Into<String>, rules: &[&str]) -> Self {
        self.field(field_name, |mut field| {
            for rule in rules {
                field = field.rule(*rule);
            }
            field
        })
    }

    /// Add a prebuilt declaration
    pub fn declaration(mut self, declaration: FieldDeclaration) -> Self {
        match self
            .fields
            .iter_mut()
            .find(|existing| existing.field_name == declaration.field_name)
        {
            Some(existing) => existing.merge(declaration),
            None => self.fields.push(declaration),
        }
        self
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn declarations(&self) -> &[FieldDeclaration] {
        &self.fields
    }

    pub fn get(&self, field_name: &str) -> Option<&FieldDeclaration> {
        self.fields.iter().find(|f| f.field_name == field_name)
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.field_name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::new()
    }
}
