//! Record type stored in every collection and singleton domain

use crate::core::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field holding a record's unique identifier
pub const ID_FIELD: &str = "id";
/// Creation timestamp field, set once by the store
pub const CREATED_AT_FIELD: &str = "createdAt";
/// Last modification timestamp field
pub const UPDATED_AT_FIELD: &str = "updatedAt";

/// A JSON object keyed by field name.
///
/// Records serialize as plain objects. Cloning a record copies every nested
/// value, so a clone never shares state with the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// The record's `id`, when it holds a string
    pub fn id(&self) -> Option<&str> {
        self.get_str(ID_FIELD)
    }

    /// Raw value of `field`
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Value of `field` when it is a string
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    /// Mutable access to the value of `field`
    pub fn get_mut(&mut self, field: &str) -> Option<&mut Value> {
        self.0.get_mut(field)
    }

    /// Set `field`, returning the previous value
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(field.into(), value.into())
    }

    /// Remove `field`, returning its value
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.remove(field)
    }

    /// Whether `field` is present (a JSON `null` counts as present)
    pub fn contains_key(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Shallow merge: every top-level field of `patch` replaces the field of
    /// the same name. Nested objects are replaced whole, not merged.
    pub fn merge(&mut self, patch: Record) {
        for (field, value) in patch.0 {
            self.0.insert(field, value);
        }
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Object(record.0)
    }
}

impl TryFrom<Value> for Record {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(Error::bad_request("Request body must be a JSON object")),
        }
    }
}
