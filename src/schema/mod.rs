// Tue Jan 13 2026 - Alex

pub mod error;
pub mod field;
pub mod class;
pub mod store;
pub mod namespace;

pub use error::{SchemaError, SchemaWarning};
pub use field::FieldDescriptor;
pub use class::{ClassSchema, split_fqn};
pub use store::SchemaStore;
pub use namespace::{Namespace, NamespaceIndex};
