//! Reading declared fields out of the object under validation

use crate::error::InspectionError;
use crate::rules::{FieldDeclaration, Schema};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Access to field values by name
///
/// A declared field that the source does not have reads as `null`, so a
/// `required` rule reports it instead of the whole call failing.
pub trait FieldSource {
    fn field_value(&self, field: &str) -> Result<Value, InspectionError>;

    /// Check that the source has named fields at all
    fn ensure_inspectable(&self) -> Result<(), InspectionError> {
        Ok(())
    }
}

impl FieldSource for Value {
    fn field_value(&self, field: &str) -> Result<Value, InspectionError> {
        match self {
            Value::Object(map) => map.field_value(field),
            other => Err(InspectionError::not_an_object(other)),
        }
    }

    fn ensure_inspectable(&self) -> Result<(), InspectionError> {
        match self {
            Value::Object(_) => Ok(()),
            other => Err(InspectionError::not_an_object(other)),
        }
    }
}

impl FieldSource for Map<String, Value> {
    fn field_value(&self, field: &str) -> Result<Value, InspectionError> {
        Ok(self.get(field).cloned().unwrap_or(Value::Null))
    }
}

impl FieldSource for HashMap<String, Value> {
    fn field_value(&self, field: &str) -> Result<Value, InspectionError> {
        Ok(self.get(field).cloned().unwrap_or(Value::Null))
    }
}

impl<T: FieldSource + ?Sized> FieldSource for &T {
    fn field_value(&self, field: &str) -> Result<Value, InspectionError> {
        (**self).field_value(field)
    }

    fn ensure_inspectable(&self) -> Result<(), InspectionError> {
        (**self).ensure_inspectable()
    }
}

/// A declared field together with its current value
#[derive(Debug, Clone, PartialEq)]
pub struct InspectedField<'a> {
    pub declaration: &'a FieldDeclaration,
    pub value: Value,
}

impl InspectedField<'_> {
    pub fn field_name(&self) -> &str {
        &self.declaration.field_name
    }
}

/// Yields the fields of an object declared for a marker kind, in declaration order
pub trait FieldInspector {
    fn inspect<'a>(
        &'a self,
        source: &dyn FieldSource,
        marker: &str,
    ) -> Result<Vec<InspectedField<'a>>, InspectionError>;
}

impl FieldInspector for Schema {
    fn inspect<'a>(
        &'a self,
        source: &dyn FieldSource,
        marker: &str,
    ) -> Result<Vec<InspectedField<'a>>, InspectionError> {
        source.ensure_inspectable()?;

        if self.marker() != marker {
            return Ok(Vec::new());
        }

        self.declarations()
            .iter()
            .map(|declaration| {
                Ok(InspectedField {
                    declaration,
                    value: source.field_value(&declaration.field_name)?,
                })
            })
            .collect()
    }
}

/// A type that declares its own validation schema
///
/// ```
/// use field_rules::{FieldSource, InspectionError, Schema, Validatable};
/// use serde_json::{json, Value};
///
/// struct Signup {
///     email: String,
/// }
///
/// impl FieldSource for Signup {
///     fn field_value(&self, field: &str) -> Result<Value, InspectionError> {
///         Ok(match field {
///             "email" => json!(self.email),
///             _ => Value::Null,
///         })
///     }
/// }
///
/// impl Validatable for Signup {
///     fn schema(&self) -> Schema {
///         Schema::new().field_rules("email", &["required", "email"])
///     }
/// }
/// ```
pub trait Validatable: FieldSource {
    fn schema(&self) -> Schema;
}
