// Fri Jan 16 2026 - Alex

use thiserror::Error;

/// Failure to materialize one object. Scoped to that object only.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MaterializeError {
    #[error("No generated definition for class {0}")]
    UnknownClass(String),
    #[error("{class}: input has no value for field '{field}'")]
    MissingField { class: String, field: String },
    #[error("{class}.{field}: expected a mapping, found {found}")]
    ExpectedMapping {
        class: String,
        field: String,
        found: &'static str,
    },
    #[error("{class}.{field}: expected a list, found {found}")]
    ExpectedList {
        class: String,
        field: String,
        found: &'static str,
    },
    #[error("{class}.{field}: cannot convert {found} to {target}")]
    Coercion {
        class: String,
        field: String,
        found: String,
        target: String,
    },
    #[error("'{0}' is not a reserved attribute")]
    UnknownReserved(String),
}
