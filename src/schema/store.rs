// Tue Jan 13 2026 - Alex

use crate::schema::{ClassSchema, FieldDescriptor, NamespaceIndex, SchemaError};
use indexmap::IndexMap;
use serde_json::Value;

const NAME_KEYS: &[&str] = &["m_Name", "name"];
const TYPE_KEYS: &[&str] = &["m_Type", "type"];
const LEVEL_KEYS: &[&str] = &["m_Level", "level"];

/// Every class of a schema dump, keyed by fully-qualified name in dump order.
#[derive(Debug, Clone, Default)]
pub struct SchemaStore {
    classes: IndexMap<String, ClassSchema>,
}

impl SchemaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(raw: &str) -> Result<Self, SchemaError> {
        let dump: IndexMap<String, Vec<Value>> = serde_json::from_str(raw)?;
        Self::from_records(dump)
    }

    pub fn from_value(value: Value) -> Result<Self, SchemaError> {
        let dump: IndexMap<String, Vec<Value>> = serde_json::from_value(value)?;
        Self::from_records(dump)
    }

    fn from_records(dump: IndexMap<String, Vec<Value>>) -> Result<Self, SchemaError> {
        let mut store = Self::new();
        for (fqn, records) in dump {
            let fields = records
                .iter()
                .enumerate()
                .map(|(index, record)| parse_record(&fqn, index, record))
                .collect::<Result<Vec<_>, _>>()?;
            store.insert(ClassSchema::new(&fqn, fields));
        }
        Ok(store)
    }

    pub fn insert(&mut self, schema: ClassSchema) {
        self.classes.insert(schema.fqn().to_string(), schema);
    }

    pub fn get(&self, fqn: &str) -> Option<&ClassSchema> {
        self.classes.get(fqn)
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassSchema> {
        self.classes.values()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn group_by_namespace(&self) -> NamespaceIndex {
        NamespaceIndex::build(self)
    }
}

fn lookup<'a>(record: &'a serde_json::Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| record.get(*k))
}

fn parse_record(class: &str, index: usize, record: &Value) -> Result<FieldDescriptor, SchemaError> {
    let invalid = |reason: &str| SchemaError::InvalidRecord {
        class: class.to_string(),
        index,
        reason: reason.to_string(),
    };
    let missing = |attribute: &'static str| SchemaError::MissingAttribute {
        class: class.to_string(),
        index,
        attribute,
    };

    let record = record.as_object().ok_or_else(|| invalid("not an object"))?;

    let name = lookup(record, NAME_KEYS)
        .ok_or_else(|| missing("name"))?
        .as_str()
        .ok_or_else(|| invalid("name is not a string"))?;
    let type_token = lookup(record, TYPE_KEYS)
        .ok_or_else(|| missing("type"))?
        .as_str()
        .ok_or_else(|| invalid("type is not a string"))?;
    let level = lookup(record, LEVEL_KEYS)
        .ok_or_else(|| missing("level"))?
        .as_u64()
        .ok_or_else(|| invalid("level is not a non-negative integer"))?;
    let level = u32::try_from(level).map_err(|_| invalid("level out of range"))?;

    Ok(FieldDescriptor::new(name, type_token, level))
}
