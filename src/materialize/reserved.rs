// Fri Jan 16 2026 - Alex

use crate::materialize::{MaterializeError, Value};
use indexmap::IndexMap;

/// Attribute names the caller may inject into any instance that declares them.
pub const RESERVED_ATTRIBUTES: &[&str] = &["object_reader"];

pub fn is_reserved(name: &str) -> bool {
    RESERVED_ATTRIBUTES.contains(&name)
}

#[derive(Debug, Clone, Default)]
pub struct ReservedValues {
    values: IndexMap<String, Value>,
}

impl ReservedValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, value: Value) -> Result<(), MaterializeError> {
        if !is_reserved(name) {
            return Err(MaterializeError::UnknownReserved(name.to_string()));
        }
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    pub fn with(mut self, name: &str, value: Value) -> Result<Self, MaterializeError> {
        self.insert(name, value)?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
