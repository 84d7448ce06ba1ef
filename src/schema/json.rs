//! Loading schemas from JSON documents.
//!
//! A schema document is a JSON object whose keys are field names, except for
//! the reserved flags `strict` / `collectAllErrors` (and their legacy
//! spellings `_isStrict` / `_allErrors`). A field is either a type name
//! (`"string"`, `"String"`, `"Date"`) or an object with optional `type`, `required` and
//! `choices` entries:
//!
//! ```json
//! {
//!   "strict": true,
//!   "name": { "type": "string", "required": true },
//!   "status": { "choices": ["online", "offline", "away"] },
//!   "createdAt": "Date"
//! }
//! ```

use super::registry::TypeRegistry;
use super::types::{FieldSpec, Schema, TypeDescriptor};
use crate::error::SchemaError;
use crate::value::{AttributeValue, json_type_name};

use log::debug;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

const STRICT_FLAGS: [&str; 2] = ["strict", "_isStrict"];
const COLLECT_ALL_FLAGS: [&str; 2] = ["collectAllErrors", "_allErrors"];

impl Schema {
    /// Load a schema resolving type names against the default registry.
    pub fn from_json(value: &Value) -> Result<Self, SchemaError> {
        Self::from_json_with(value, &TypeRegistry::with_defaults())
    }

    /// Load a schema resolving type names against `types`.
    pub fn from_json_with(value: &Value, types: &TypeRegistry) -> Result<Self, SchemaError> {
        let document = value.as_object().ok_or_else(|| SchemaError::NotAnObject {
            actual: json_type_name(value),
        })?;

        let mut schema = Schema::default();
        for (key, entry) in document {
            if STRICT_FLAGS.contains(&key.as_str()) {
                schema.set_strict(parse_flag(key, entry)?);
            } else if COLLECT_ALL_FLAGS.contains(&key.as_str()) {
                schema.set_collect_all_errors(parse_flag(key, entry)?);
            } else {
                schema.insert_field(key.clone(), parse_field(key, entry, types)?);
            }
        }

        debug!(
            "Loaded schema with {} fields (strict: {}, collect all errors: {})",
            schema.len(),
            schema.is_strict(),
            schema.collects_all_errors()
        );
        Ok(schema)
    }

    /// Parse and load a schema using the default registry.
    pub fn from_json_str(content: &str) -> Result<Self, SchemaError> {
        Self::from_json_str_with(content, &TypeRegistry::with_defaults())
    }

    pub fn from_json_str_with(content: &str, types: &TypeRegistry) -> Result<Self, SchemaError> {
        let value: Value = serde_json::from_str(content)?;
        Self::from_json_with(&value, types)
    }

    /// Load a schema from a JSON file using the default registry.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        Self::from_json_file_with(path, &TypeRegistry::with_defaults())
    }

    /// Load a schema from a JSON file resolving type names against `types`.
    pub fn from_json_file_with<P: AsRef<Path>>(
        path: P,
        types: &TypeRegistry,
    ) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(&path)?;
        Self::from_json_str_with(&content, types)
    }
}

fn parse_flag(flag: &str, value: &Value) -> Result<bool, SchemaError> {
    value.as_bool().ok_or_else(|| SchemaError::InvalidFlag {
        flag: flag.to_string(),
        actual: json_type_name(value),
    })
}

fn parse_field(name: &str, entry: &Value, types: &TypeRegistry) -> Result<FieldSpec, SchemaError> {
    match entry {
        Value::String(type_name) => Ok(FieldSpec::shorthand(resolve_type(name, type_name, types)?)),
        Value::Object(rules) => parse_rules(name, rules, types),
        other => Err(SchemaError::InvalidFieldSpec {
            field: name.to_string(),
            actual: json_type_name(other),
        }),
    }
}

fn parse_rules(
    name: &str,
    rules: &Map<String, Value>,
    types: &TypeRegistry,
) -> Result<FieldSpec, SchemaError> {
    let mut spec = FieldSpec::new();

    for (rule, value) in rules {
        match (rule.as_str(), value) {
            (_, Value::Null) => {}
            ("type", Value::String(type_name)) => {
                spec = spec.of_type(resolve_type(name, type_name, types)?);
            }
            ("type", other) => {
                return Err(SchemaError::InvalidTypeDescriptor {
                    field: name.to_string(),
                    actual: json_type_name(other),
                });
            }
            ("required", Value::Bool(required)) => spec = spec.set_required(*required),
            ("required", _) => {
                return Err(SchemaError::InvalidRequired {
                    field: name.to_string(),
                });
            }
            ("choices", Value::Array(choices)) => {
                spec = spec.choices(choices.iter().cloned().map(AttributeValue::Json));
            }
            ("choices", _) => {
                return Err(SchemaError::InvalidChoices {
                    field: name.to_string(),
                });
            }
            (unsupported, _) => {
                debug!("Ignoring unsupported rule '{}' on field '{}'", unsupported, name);
            }
        }
    }

    Ok(spec)
}

fn resolve_type(
    field: &str,
    type_name: &str,
    types: &TypeRegistry,
) -> Result<TypeDescriptor, SchemaError> {
    types
        .resolve(type_name)
        .ok_or_else(|| SchemaError::UnknownType {
            field: field.to_string(),
            type_name: type_name.to_string(),
        })
}
