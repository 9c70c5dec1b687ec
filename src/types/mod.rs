// Wed Jan 14 2026 - Alex

pub mod type_info;
pub mod primitives;
pub mod resolver;

pub use type_info::{PrimitiveKind, TypeResolution};
pub use primitives::{primitive_kind, alias_target, translate_name};
pub use resolver::TypeResolver;
