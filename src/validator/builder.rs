//! Builder pattern for configuring validator instances.
//!
//! A validator normally takes its error mode and strict flag from the schema
//! it is handed. Hosts that need a different policy (a bulk importer that
//! wants every error, a form that refuses unknown fields) override those
//! flags here instead of rewriting their schemas.

use super::core::SchemaValidator;
use crate::schema::Schema;
use serde::{Deserialize, Serialize};

/// How many violations a validation run reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorMode {
    /// Stop at the first violation and report its message.
    ShortCircuit,
    /// Report every violation as a structured record.
    CollectAll,
}

impl ErrorMode {
    pub fn from_collect_all(collect_all: bool) -> Self {
        if collect_all {
            Self::CollectAll
        } else {
            Self::ShortCircuit
        }
    }
}

/// Overrides applied on top of a schema's own flags.
///
/// The default configuration overrides nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidatorConfig {
    /// Error mode to use regardless of the schema's `collectAllErrors` flag.
    pub error_mode: Option<ErrorMode>,

    /// Treat every schema as strict.
    pub force_strict: bool,
}

impl ValidatorConfig {
    /// The error mode in effect for `schema`.
    pub fn error_mode_for(&self, schema: &Schema) -> ErrorMode {
        self.error_mode
            .unwrap_or_else(|| ErrorMode::from_collect_all(schema.collects_all_errors()))
    }

    /// Whether undeclared attributes are violations for `schema`.
    pub fn strict_for(&self, schema: &Schema) -> bool {
        self.force_strict || schema.is_strict()
    }
}

/// Builder for [`SchemaValidator`].
///
/// # Examples
///
/// ```rust
/// use attr_schema::validator::{ErrorMode, SchemaValidator};
///
/// let validator = SchemaValidator::builder()
///     .error_mode(ErrorMode::CollectAll)
///     .force_strict(true)
///     .build();
///
/// assert_eq!(validator.config().error_mode, Some(ErrorMode::CollectAll));
/// ```
#[derive(Debug, Default)]
pub struct ValidatorBuilder {
    config: ValidatorConfig,
}

impl ValidatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the schema's error mode.
    pub fn error_mode(mut self, mode: ErrorMode) -> Self {
        self.config.error_mode = Some(mode);
        self
    }

    pub fn collect_all_errors(self) -> Self {
        self.error_mode(ErrorMode::CollectAll)
    }

    pub fn short_circuit(self) -> Self {
        self.error_mode(ErrorMode::ShortCircuit)
    }

    pub fn force_strict(mut self, strict: bool) -> Self {
        self.config.force_strict = strict;
        self
    }

    pub fn build(self) -> SchemaValidator {
        SchemaValidator::with_config(self.config)
    }
}
