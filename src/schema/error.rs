// Tue Jan 13 2026 - Alex

use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Malformed schema dump: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Class {class}: field record #{index} is missing '{attribute}'")]
    MissingAttribute {
        class: String,
        index: usize,
        attribute: &'static str,
    },
    #[error("Class {class}: field record #{index} is invalid: {reason}")]
    InvalidRecord {
        class: String,
        index: usize,
        reason: String,
    },
}

/// Non-fatal findings of the schema grouping step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaWarning {
    DuplicateClassName {
        name: String,
        kept: Option<String>,
        ignored: Option<String>,
    },
}

impl fmt::Display for SchemaWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateClassName { name, kept, ignored } => write!(
                f,
                "Class {} already defined in {} but found again in {}",
                name,
                kept.as_deref().unwrap_or("<default namespace>"),
                ignored.as_deref().unwrap_or("<default namespace>"),
            ),
        }
    }
}
