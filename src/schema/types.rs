//! Core schema type definitions.
//!
//! A [`Schema`] is an ordered list of field declarations plus the two
//! schema-wide flags. Each [`FieldSpec`] bundles the rules for one field:
//! an optional [`TypeDescriptor`], the required flag, an optional choice set
//! and any number of custom [`FieldValidator`]s.

use crate::error::SchemaError;
use crate::snapshot::Snapshot;
use crate::value::{AttributeValue, PrimitiveType, short_type_name};
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// A Rust type a field value must have been constructed as.
#[derive(Debug, Clone)]
pub struct NominalType {
    type_id: TypeId,
    name: String,
}

impl NominalType {
    /// Nominal type named after the Rust type itself.
    pub fn of<T: Any>() -> Self {
        Self::named::<T>(short_type_name::<T>())
    }

    /// Nominal type with an explicit display name, e.g. `Date` for `DateTime<Utc>`.
    pub fn named<T: Any>(name: impl Into<String>) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            name: name.into(),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for NominalType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for NominalType {}

/// Expected type of a field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescriptor {
    /// Match on the value's primitive category
    Primitive(PrimitiveType),
    /// Match on the identity of the value's constructing type
    Nominal(NominalType),
}

impl TypeDescriptor {
    pub fn primitive(primitive: PrimitiveType) -> Self {
        Self::Primitive(primitive)
    }

    pub fn nominal<T: Any>() -> Self {
        Self::Nominal(NominalType::of::<T>())
    }

    /// Check a present value against this descriptor.
    pub fn matches(&self, value: &AttributeValue) -> bool {
        match self {
            Self::Primitive(primitive) => value.primitive_type() == Some(*primitive),
            Self::Nominal(nominal) => value.is_constructed_as(nominal.type_id()),
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(primitive) => f.write_str(primitive.as_str()),
            Self::Nominal(nominal) => f.write_str(nominal.name()),
        }
    }
}

impl From<PrimitiveType> for TypeDescriptor {
    fn from(primitive: PrimitiveType) -> Self {
        Self::Primitive(primitive)
    }
}

impl From<NominalType> for TypeDescriptor {
    fn from(nominal: NominalType) -> Self {
        Self::Nominal(nominal)
    }
}

/// Custom rule for a single field.
///
/// Receives the field's present value and the whole snapshot, so rules that
/// compare sibling attributes can be expressed. Returns `Some(message)` on
/// failure. An empty message counts as a pass.
pub trait FieldValidator: Send + Sync {
    fn validate(&self, value: &AttributeValue, attributes: &Snapshot) -> Option<String>;
}

impl<F> FieldValidator for F
where
    F: Fn(&AttributeValue, &Snapshot) -> Option<String> + Send + Sync,
{
    fn validate(&self, value: &AttributeValue, attributes: &Snapshot) -> Option<String> {
        self(value, attributes)
    }
}

/// Rules for one declared field.
///
/// [`FieldSpec::shorthand`] is the bare-type form; every other rule starts
/// from [`FieldSpec::new`].
#[derive(Clone, Default)]
pub struct FieldSpec {
    type_descriptor: Option<TypeDescriptor>,
    required: bool,
    choices: Option<Vec<AttributeValue>>,
    validators: Vec<Arc<dyn FieldValidator>>,
}

impl FieldSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// A field declared by its type alone.
    pub fn shorthand(type_descriptor: impl Into<TypeDescriptor>) -> Self {
        Self::new().of_type(type_descriptor)
    }

    pub fn of_type(mut self, type_descriptor: impl Into<TypeDescriptor>) -> Self {
        self.type_descriptor = Some(type_descriptor.into());
        self
    }

    pub fn required(self) -> Self {
        self.set_required(true)
    }

    pub fn set_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn choices<I, V>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<AttributeValue>,
    {
        self.choices = Some(choices.into_iter().map(Into::into).collect());
        self
    }

    /// Append a custom validator. Validators run last-declared first.
    pub fn validator<V>(mut self, validator: V) -> Self
    where
        V: FieldValidator + 'static,
    {
        self.validators.push(Arc::new(validator));
        self
    }

    pub fn type_descriptor(&self) -> Option<&TypeDescriptor> {
        self.type_descriptor.as_ref()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn choice_values(&self) -> Option<&[AttributeValue]> {
        self.choices.as_deref()
    }

    /// Validators in declaration order.
    pub fn validators(&self) -> &[Arc<dyn FieldValidator>] {
        &self.validators
    }

    pub(crate) fn push_validator(&mut self, validator: Arc<dyn FieldValidator>) {
        self.validators.push(validator);
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("type_descriptor", &self.type_descriptor)
            .field("required", &self.required)
            .field("choices", &self.choices)
            .field("validators", &self.validators.len())
            .finish()
    }
}

impl From<PrimitiveType> for FieldSpec {
    fn from(primitive: PrimitiveType) -> Self {
        Self::shorthand(primitive)
    }
}

impl From<TypeDescriptor> for FieldSpec {
    fn from(type_descriptor: TypeDescriptor) -> Self {
        Self::shorthand(type_descriptor)
    }
}

impl From<NominalType> for FieldSpec {
    fn from(nominal: NominalType) -> Self {
        Self::shorthand(nominal)
    }
}

/// A validation schema.
///
/// Fields are kept in declaration order, which is the order they are
/// validated and reported in.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<(String, FieldSpec)>,
    strict: bool,
    collect_all_errors: bool,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Declared fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.fields.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, spec)| spec)
    }

    pub fn declares(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Whether undeclared attributes are violations.
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Whether validation accumulates every violation.
    pub fn collects_all_errors(&self) -> bool {
        self.collect_all_errors
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Attach a validator to an already declared field.
    ///
    /// Used for schemas loaded from JSON, where validators cannot be written.
    pub fn add_validator<V>(&mut self, field: &str, validator: V) -> Result<(), SchemaError>
    where
        V: FieldValidator + 'static,
    {
        let spec = self
            .fields
            .iter_mut()
            .find(|(name, _)| name == field)
            .map(|(_, spec)| spec)
            .ok_or_else(|| SchemaError::UnknownField {
                field: field.to_string(),
            })?;
        spec.push_validator(Arc::new(validator));
        Ok(())
    }

    pub(crate) fn insert_field(&mut self, name: String, spec: FieldSpec) {
        match self.fields.iter_mut().find(|(field, _)| *field == name) {
            Some((_, slot)) => *slot = spec,
            None => self.fields.push((name, spec)),
        }
    }

    pub(crate) fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    pub(crate) fn set_collect_all_errors(&mut self, collect_all_errors: bool) {
        self.collect_all_errors = collect_all_errors;
    }
}

/// Fluent builder for [`Schema`].
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    schema: Schema,
}

impl SchemaBuilder {
    /// Declare a field. Redeclaring a name replaces its rules in place.
    pub fn field(mut self, name: impl Into<String>, spec: impl Into<FieldSpec>) -> Self {
        self.schema.insert_field(name.into(), spec.into());
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.schema.set_strict(strict);
        self
    }

    pub fn collect_all_errors(mut self, collect_all_errors: bool) -> Self {
        self.schema.set_collect_all_errors(collect_all_errors);
        self
    }

    pub fn build(self) -> Schema {
        self.schema
    }
}
