//! The validation pass.
//!
//! Fields are checked in declaration order. Within a field the rules run as
//! required → choices → type → validators, and validators run last-declared
//! first. The strict check runs once, after every declared field.

use super::builder::{ErrorMode, ValidatorBuilder, ValidatorConfig};
use crate::error::{ErrorRecord, ValidationError, ValidationResult};
use crate::schema::{FieldSpec, Schema};
use crate::snapshot::Snapshot;

use log::{debug, trace};
use std::collections::HashSet;

/// Validates attribute snapshots against schemas.
///
/// Holds only configuration; every call to [`validate`](Self::validate) is
/// independent of every other.
///
/// # Examples
///
/// ```rust
/// use attr_schema::schema::{FieldSpec, Schema};
/// use attr_schema::snapshot::Snapshot;
/// use attr_schema::validator::SchemaValidator;
/// use attr_schema::value::PrimitiveType;
///
/// let schema = Schema::builder()
///     .field("name", FieldSpec::new().of_type(PrimitiveType::String).required())
///     .build();
/// let validator = SchemaValidator::new();
///
/// assert!(validator.validate(&schema, &Snapshot::new().with("name", "Ada")).is_ok());
///
/// let error = validator.validate(&schema, &Snapshot::new()).unwrap_err();
/// assert_eq!(error.to_string(), "\"name\" is required.");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SchemaValidator {
    config: ValidatorConfig,
}

impl SchemaValidator {
    /// Create a validator that follows each schema's own flags.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::new()
    }

    pub fn with_config(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate `attributes` against `schema`.
    ///
    /// Returns `Ok(())` when there is no violation. Otherwise returns the first
    /// violation's message in short-circuit mode, or every violation in
    /// traversal order in collect-all mode. The snapshot is never modified.
    pub fn validate(&self, schema: &Schema, attributes: &Snapshot) -> ValidationResult<()> {
        let mut violations = Violations::new(self.config.error_mode_for(schema));
        let mut covered = HashSet::with_capacity(schema.len());

        for (key, field) in schema.fields() {
            trace!("Checking field '{}'", key);
            self.check_field(key, field, attributes, &mut violations)?;
            covered.insert(key);
        }

        if self.config.strict_for(schema) {
            let extra: Vec<String> = attributes
                .keys()
                .filter(|key| !covered.contains(key))
                .map(str::to_string)
                .collect();

            if !extra.is_empty() {
                violations.record(ErrorRecord::strict(extra))?;
            }
        }

        let outcome = violations.finish();
        debug!(
            "Validated {} attributes against {} fields: {}",
            attributes.len(),
            schema.len(),
            match &outcome {
                Ok(()) => "valid".to_string(),
                Err(error) => format!("{} violation(s)", error.len()),
            }
        );
        outcome
    }

    /// Run every rule for one field.
    fn check_field(
        &self,
        key: &str,
        field: &FieldSpec,
        attributes: &Snapshot,
        violations: &mut Violations,
    ) -> ValidationResult<()> {
        // Null and missing are the same; nothing but `required` applies to them.
        let Some(value) = attributes.get_present(key) else {
            if field.is_required() {
                violations.record(ErrorRecord::required(key))?;
            }
            return Ok(());
        };

        if let Some(choices) = field.choice_values() {
            if !choices.iter().any(|choice| choice == value) {
                violations.record(ErrorRecord::choices(key, choices))?;
            }
        }

        if let Some(expected) = field.type_descriptor() {
            if !expected.matches(value) {
                violations.record(ErrorRecord::wrong_type(key, expected))?;
            }
        }

        for validator in field.validators().iter().rev() {
            if let Some(message) = validator.validate(value, attributes) {
                if !message.is_empty() {
                    violations.record(ErrorRecord::validator(key, message))?;
                }
            }
        }

        Ok(())
    }
}

/// Violations gathered during one validation pass.
struct Violations {
    mode: ErrorMode,
    records: Vec<ErrorRecord>,
}

impl Violations {
    fn new(mode: ErrorMode) -> Self {
        Self {
            mode,
            records: Vec::new(),
        }
    }

    /// Record a violation. In short-circuit mode this is the result of the
    /// whole pass, returned as `Err` so callers stop with `?`.
    fn record(&mut self, record: ErrorRecord) -> ValidationResult<()> {
        debug!("{} violation on '{}': {}", record.err_type, record.key, record.message);
        match self.mode {
            ErrorMode::ShortCircuit => Err(ValidationError::Message(record.message)),
            ErrorMode::CollectAll => {
                self.records.push(record);
                Ok(())
            }
        }
    }

    fn finish(self) -> ValidationResult<()> {
        if self.records.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::Errors(self.records))
        }
    }
}
