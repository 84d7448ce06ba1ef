//! Host-side hook for objects that carry a schema.
//!
//! The validator does not own attribute storage. Host objects expose their
//! schema and current attributes through [`Validated`] and get `validate` /
//! `is_valid` for free. [`Model`] is a minimal host for callers that have no
//! object type of their own.

use crate::error::ValidationResult;
use crate::schema::Schema;
use crate::snapshot::Snapshot;
use crate::validator::SchemaValidator;
use crate::value::AttributeValue;

use log::trace;
use std::sync::Arc;

/// An object whose attributes can be checked against its schema.
pub trait Validated {
    /// Schema attached to this object or its type.
    fn schema(&self) -> &Schema;

    /// Current attribute values.
    fn attributes(&self) -> &Snapshot;

    /// Validate with a default [`SchemaValidator`].
    fn validate(&self) -> ValidationResult<()> {
        self.validate_with(&SchemaValidator::new())
    }

    /// Validate with a configured validator.
    fn validate_with(&self, validator: &SchemaValidator) -> ValidationResult<()> {
        validator.validate(self.schema(), self.attributes())
    }

    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// A plain attribute bag sharing a schema with other models of its kind.
#[derive(Debug, Clone)]
pub struct Model {
    schema: Arc<Schema>,
    attributes: Snapshot,
}

impl Model {
    pub fn new(schema: Arc<Schema>) -> Self {
        Self::with_attributes(schema, Snapshot::new())
    }

    pub fn with_attributes(schema: Arc<Schema>, attributes: Snapshot) -> Self {
        Self { schema, attributes }
    }

    /// Set an attribute without validating; returns the previous value.
    pub fn set(
        &mut self,
        key: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Option<AttributeValue> {
        let key = key.into();
        trace!("Setting attribute '{}'", key);
        self.attributes.insert(key, value)
    }

    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }

    pub fn unset(&mut self, key: &str) -> Option<AttributeValue> {
        self.attributes.remove(key)
    }

    pub fn shared_schema(&self) -> &Arc<Schema> {
        &self.schema
    }
}

impl Validated for Model {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn attributes(&self) -> &Snapshot {
        &self.attributes
    }
}
