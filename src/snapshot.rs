//! Read-only view of an object's current attributes.

use crate::error::SnapshotError;
use crate::value::{AttributeValue, json_type_name};
use serde_json::{Map, Value};

/// An insertion-ordered mapping from attribute name to current value.
///
/// Order matters only for reporting: strict-mode violations list undeclared
/// keys in the order they were set. Re-inserting a key replaces its value
/// without moving it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    entries: Vec<(String, AttributeValue)>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set an attribute, returning the previous value if there was one.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Option<AttributeValue> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<AttributeValue> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// The raw value for `key`, including explicit nulls.
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// The value for `key` unless it is missing or null.
    pub fn get_present(&self, key: &str) -> Option<&AttributeValue> {
        self.get(key).filter(|value| !value.is_absent())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build a snapshot from a JSON object, keeping document order.
    pub fn from_json(value: Value) -> Result<Self, SnapshotError> {
        match value {
            Value::Object(map) => Ok(Self::from(map)),
            other => Err(SnapshotError::NotAnObject {
                actual: json_type_name(&other),
            }),
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self, SnapshotError> {
        Self::from_json(serde_json::from_str(content)?)
    }
}

impl From<Map<String, Value>> for Snapshot {
    fn from(map: Map<String, Value>) -> Self {
        map.into_iter().collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Snapshot
where
    K: Into<String>,
    V: Into<AttributeValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut snapshot = Self::new();
        for (key, value) in iter {
            snapshot.insert(key, value);
        }
        snapshot
    }
}
