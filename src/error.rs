//! Error types for attribute validation and schema loading.
//!
//! Violations found while validating a snapshot are *returned* as a
//! [`ValidationError`], never raised. In short-circuit mode the error carries
//! the first rendered message; in accumulate mode it carries every
//! [`ErrorRecord`] in traversal order.

use crate::value::AttributeValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The five kinds of rule a snapshot can violate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// A required field is missing or null
    Required,
    /// A value is not one of the declared choices
    Choices,
    /// A value has the wrong primitive category or nominal type
    Type,
    /// A custom validator returned a message
    Validator,
    /// Strict mode found attributes the schema does not declare
    Strict,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Choices => "choices",
            Self::Type => "type",
            Self::Validator => "validator",
            Self::Strict => "strict",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The attribute(s) an [`ErrorRecord`] refers to.
///
/// Strict-mode violations name every undeclared key at once; all other
/// violations name a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorKey {
    Field(String),
    Fields(Vec<String>),
}

impl ErrorKey {
    /// Whether this key names (or includes) the given attribute.
    pub fn contains(&self, name: &str) -> bool {
        match self {
            Self::Field(field) => field == name,
            Self::Fields(fields) => fields.iter().any(|field| field == name),
        }
    }
}

impl fmt::Display for ErrorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(field) => f.write_str(field),
            Self::Fields(fields) => f.write_str(&fields.join(", ")),
        }
    }
}

/// A single structured violation.
///
/// Serializes as `{"key": ..., "errType": ..., "message": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
    pub key: ErrorKey,
    pub err_type: ErrorKind,
    pub message: String,
}

impl ErrorRecord {
    /// Create a required-field violation.
    pub fn required(key: &str) -> Self {
        Self {
            key: ErrorKey::Field(key.to_string()),
            err_type: ErrorKind::Required,
            message: format!("\"{}\" is required.", key),
        }
    }

    /// Create a choices violation listing every allowed value.
    pub fn choices(key: &str, choices: &[AttributeValue]) -> Self {
        let allowed = choices
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            key: ErrorKey::Field(key.to_string()),
            err_type: ErrorKind::Choices,
            message: format!("\"{}\" must be one of {}", key, allowed),
        }
    }

    /// Create a type violation naming the expected type.
    pub fn wrong_type(key: &str, expected: impl fmt::Display) -> Self {
        Self {
            key: ErrorKey::Field(key.to_string()),
            err_type: ErrorKind::Type,
            message: format!("\"{}\" must be a {}", key, expected),
        }
    }

    /// Create a custom validator violation; the message is kept verbatim.
    pub fn validator(key: &str, message: impl Into<String>) -> Self {
        Self {
            key: ErrorKey::Field(key.to_string()),
            err_type: ErrorKind::Validator,
            message: message.into(),
        }
    }

    /// Create a strict-mode violation for the undeclared keys.
    pub fn strict(keys: Vec<String>) -> Self {
        let message = format!("{} are not in the schema", keys.join(", "));
        Self {
            key: ErrorKey::Fields(keys),
            err_type: ErrorKind::Strict,
            message,
        }
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// The outcome of a failed validation.
///
/// Which variant is produced depends on the error mode: short-circuit mode
/// yields [`ValidationError::Message`], accumulate mode yields a non-empty
/// [`ValidationError::Errors`]. A valid snapshot yields `Ok(())` in both.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The first violation found, rendered as text
    #[error("{0}")]
    Message(String),

    /// Every violation found, in traversal order
    #[error("{}", join_messages(.0))]
    Errors(Vec<ErrorRecord>),
}

impl ValidationError {
    /// The structured records, empty for a short-circuit message.
    pub fn records(&self) -> &[ErrorRecord] {
        match self {
            Self::Message(_) => &[],
            Self::Errors(records) => records,
        }
    }

    /// Every violation message in order.
    pub fn messages(&self) -> Vec<&str> {
        match self {
            Self::Message(message) => vec![message.as_str()],
            Self::Errors(records) => records.iter().map(|r| r.message.as_str()).collect(),
        }
    }

    /// The kinds of the structured records, in order.
    pub fn kinds(&self) -> Vec<ErrorKind> {
        self.records().iter().map(|r| r.err_type).collect()
    }

    /// Number of violations carried; always at least one.
    ///
    /// The validator never builds an empty [`ValidationError::Errors`], so a
    /// failed validation has no `is_empty` state to ask about.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        match self {
            Self::Message(_) => 1,
            Self::Errors(records) => records.len(),
        }
    }
}

fn join_messages(records: &[ErrorRecord]) -> String {
    records
        .iter()
        .map(|r| r.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors raised while building a [`Schema`](crate::schema::Schema) from JSON
/// or attaching rules to it.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Schema document is not a JSON object
    #[error("Schema must be a JSON object, got {actual}")]
    NotAnObject { actual: &'static str },

    /// Reserved flag with a non-boolean value
    #[error("Schema flag '{flag}' must be a boolean, got {actual}")]
    InvalidFlag { flag: String, actual: &'static str },

    /// Field spec that is neither a type name nor an object
    #[error("Field '{field}' must be a type name or an object, got {actual}")]
    InvalidFieldSpec { field: String, actual: &'static str },

    /// `type` entry that is not a string
    #[error("Field '{field}' has a 'type' that is not a type name, got {actual}")]
    InvalidTypeDescriptor { field: String, actual: &'static str },

    /// Type name that is neither primitive nor registered
    #[error("Field '{field}' declares unknown type '{type_name}'")]
    UnknownType { field: String, type_name: String },

    /// `required` entry that is not a boolean
    #[error("Field '{field}' has a 'required' flag that is not a boolean")]
    InvalidRequired { field: String },

    /// `choices` entry that is not an array
    #[error("Field '{field}' has 'choices' that is not an array")]
    InvalidChoices { field: String },

    /// Rule attached to a field the schema does not declare
    #[error("Field '{field}' is not declared in the schema")]
    UnknownField { field: String },

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Schema file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while building a [`Snapshot`](crate::snapshot::Snapshot)
/// from JSON.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// Attribute document is not a JSON object
    #[error("Attributes must be a JSON object, got {actual}")]
    NotAnObject { actual: &'static str },

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
