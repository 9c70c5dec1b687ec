// Thu Jan 15 2026 - Alex

pub mod descriptor;
pub mod table;

pub use descriptor::{FieldSpec, GeneratedClassDescriptor, ParentRef};
pub use table::{Registry, RegistryError};
