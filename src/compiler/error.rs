// Thu Jan 15 2026 - Alex

use crate::schema::SchemaError;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompileError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("Circular dependency detected: {}", .0.join(" -> "))]
    CircularDependency(Vec<String>),
}

/// Why a single class could not be split from its parent. The class is left
/// out of the registry; the rest of the pass carries on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InheritanceError {
    #[error("{class}: no field count known for parent {parent}")]
    UnknownParentFieldCount { class: String, parent: String },
    #[error("{class}: parent {parent} was skipped")]
    ParentSkipped { class: String, parent: String },
    #[error("{class}: lists {found} direct fields but parent {parent} accounts for {expected}")]
    TooFewFields {
        class: String,
        parent: String,
        expected: usize,
        found: usize,
    },
    #[error("{class}: base type {token} is not a class")]
    NotAClass { class: String, token: String },
    #[error("{class}: inherited field #{position} is '{found}' but parent {parent} declares '{expected}'")]
    InheritedFieldMismatch {
        class: String,
        parent: String,
        position: usize,
        expected: String,
        found: String,
    },
}

impl InheritanceError {
    pub fn class(&self) -> &str {
        match self {
            Self::UnknownParentFieldCount { class, .. }
            | Self::ParentSkipped { class, .. }
            | Self::TooFewFields { class, .. }
            | Self::NotAClass { class, .. }
            | Self::InheritedFieldMismatch { class, .. } => class,
        }
    }
}

/// Non-fatal findings of the compile pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileWarning {
    UnresolvedType {
        class: String,
        field: String,
        token: String,
    },
    InheritedFieldMismatch(InheritanceError),
}

impl fmt::Display for CompileWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnresolvedType { class, field, token } => {
                write!(f, "Unknown type {} for {}.{}, using fallback", token, class, field)
            }
            Self::InheritedFieldMismatch(err) => write!(f, "{}", err),
        }
    }
}
