// Thu Jan 15 2026 - Alex

use crate::types::TypeResolution;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: String,
    pub raw_type: String,
    pub resolution: TypeResolution,
    pub is_fallback: bool,
}

impl FieldSpec {
    pub fn new(name: &str, raw_type: &str, resolution: TypeResolution) -> Self {
        let is_fallback = resolution.is_fallback();
        Self {
            name: name.to_string(),
            raw_type: raw_type.to_string(),
            resolution,
            is_fallback,
        }
    }
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {}", self.name, self.resolution)?;
        if self.is_fallback {
            write!(f, " # XXX: Fallback of {}", self.raw_type)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "origin", content = "name", rename_all = "snake_case")]
pub enum ParentRef {
    /// A class emitted from the same dump, by fully-qualified name.
    Local(String),
    /// A base-library class known only through the config.
    External(String),
}

impl ParentRef {
    pub fn name(&self) -> &str {
        match self {
            Self::Local(name) | Self::External(name) => name,
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, Self::External(_))
    }
}

/// Final shape of one class.
///
/// `fields` are the class's own members after inheritance splitting.
/// `base_fields` carries the members contributed by an external parent, which
/// has no descriptor of its own; it is empty for local parents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedClassDescriptor {
    pub name: String,
    pub ident: String,
    pub namespace: Option<String>,
    pub parent: Option<ParentRef>,
    pub fields: Vec<FieldSpec>,
    pub base_fields: Vec<FieldSpec>,
    pub direct_field_count: usize,
}

impl GeneratedClassDescriptor {
    pub fn has_own_fields(&self) -> bool {
        !self.fields.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.base_fields
            .iter()
            .chain(self.fields.iter())
            .find(|f| f.name == name)
    }

    pub fn fallback_count(&self) -> usize {
        self.fields.iter().filter(|f| f.is_fallback).count()
    }
}

impl fmt::Display for GeneratedClassDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.parent {
            Some(parent) => {
                let (_, short) = crate::schema::split_fqn(parent.name());
                writeln!(f, "class {}({}):", self.ident, crate::types::translate_name(short))?;
            }
            None => writeln!(f, "class {}:", self.ident)?,
        }
        if self.fields.is_empty() {
            writeln!(f, "\tpass")?;
        }
        for field in &self.fields {
            writeln!(f, "\t{}", field)?;
        }
        Ok(())
    }
}
