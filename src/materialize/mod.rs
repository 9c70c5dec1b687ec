// Fri Jan 16 2026 - Alex

pub mod error;
pub mod value;
pub mod instance;
pub mod coerce;
pub mod reserved;
pub mod materializer;

pub use error::MaterializeError;
pub use value::Value;
pub use instance::{FieldValue, Instance, ObjectRef};
pub use reserved::{ReservedValues, RESERVED_ATTRIBUTES};
pub use materializer::Materializer;
