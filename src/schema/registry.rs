//! Registry of nominal types that JSON schemas may refer to by name.
//!
//! JSON has no way to name a Rust type, so a schema file writes `"Date"` and
//! the registry resolves that name to the `TypeId` of `DateTime<Utc>`.
//! Capitalised names are constructor types; lowercase ones are primitive
//! categories.

use super::types::{NominalType, TypeDescriptor};
use crate::value::PrimitiveType;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::any::Any;
use std::collections::HashMap;

/// Name → nominal type lookup used when loading schemas from JSON.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: HashMap<String, NominalType>,
}

impl TypeRegistry {
    /// Create an empty registry; only primitive names resolve.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in nominal types.
    ///
    /// `Date` resolves to `chrono::DateTime<Utc>`. `String`, `Number`,
    /// `Boolean`, `Array` and `Object` resolve to the Rust types plain JSON
    /// values are built from, so they accept JSON strings, numbers and so on.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry
            .register::<DateTime<Utc>>("Date")
            .register::<String>("String")
            .register::<f64>("Number")
            .register::<bool>("Boolean")
            .register::<Vec<Value>>("Array")
            .register::<Map<String, Value>>("Object");
        registry
    }

    /// Register `T` under `name`, replacing any earlier registration.
    pub fn register<T: Any>(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        self.types.insert(name.clone(), NominalType::named::<T>(name));
        self
    }

    pub fn get(&self, name: &str) -> Option<&NominalType> {
        self.types.get(name)
    }

    /// Resolve a type name, preferring primitive categories over registered types.
    pub fn resolve(&self, name: &str) -> Option<TypeDescriptor> {
        if let Some(primitive) = PrimitiveType::from_name(name) {
            return Some(TypeDescriptor::Primitive(primitive));
        }

        self.get(name).cloned().map(TypeDescriptor::Nominal)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
