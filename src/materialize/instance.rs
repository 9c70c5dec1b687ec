// Fri Jan 16 2026 - Alex

use crate::materialize::Value;
use indexmap::IndexMap;
use std::fmt;

/// Unresolved pointer to another object, as stored in the asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    pub target: String,
    pub file_id: i64,
    pub path_id: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    List(Vec<FieldValue>),
    Object(Box<Instance>),
    Reference(ObjectRef),
    /// Fallback, external and reserved values, kept as decoded.
    Raw(Value),
}

impl FieldValue {
    pub fn as_object(&self) -> Option<&Instance> {
        match self {
            Self::Object(instance) => Some(instance),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

/// A typed object: the flattened fields of a class and all its ancestors.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    class: String,
    fields: IndexMap<String, FieldValue>,
}

impl Instance {
    pub fn new(class: &str) -> Self {
        Self {
            class: class.to_string(),
            fields: IndexMap::new(),
        }
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn set(&mut self, name: &str, value: FieldValue) {
        self.fields.insert(name.to_string(), value);
    }

    pub fn has(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (_, short) = crate::schema::split_fqn(&self.class);
        write!(f, "{}(", short)?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", name, value)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            Self::UInt(u) => write!(f, "{}", u),
            Self::Float(v) => write!(f, "{}", v),
            Self::String(s) => write!(f, "{:?}", s),
            Self::Bytes(bytes) => write!(f, "<{} bytes>", bytes.len()),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Self::Object(instance) => write!(f, "{}", instance),
            Self::Reference(r) => write!(f, "PPtr<{}>({}, {})", r.target, r.file_id, r.path_id),
            Self::Raw(value) => write!(f, "{}", value),
        }
    }
}
