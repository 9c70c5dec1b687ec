// Wed Jan 14 2026 - Alex

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Bool,
    Char,
    String,
    Bytes,
}

impl PrimitiveKind {
    pub fn is_signed(self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::I64)
    }

    pub fn is_unsigned(self) -> bool {
        matches!(self, Self::U8 | Self::U16 | Self::U32 | Self::U64)
    }

    pub fn is_integer(self) -> bool {
        self.is_signed() || self.is_unsigned()
    }

    pub fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    pub fn is_text(self) -> bool {
        matches!(self, Self::Char | Self::String)
    }

    /// Inclusive value range of the integer kinds.
    pub fn integer_bounds(self) -> Option<(i128, i128)> {
        match self {
            Self::I8 => Some((i8::MIN as i128, i8::MAX as i128)),
            Self::I16 => Some((i16::MIN as i128, i16::MAX as i128)),
            Self::I32 => Some((i32::MIN as i128, i32::MAX as i128)),
            Self::I64 => Some((i64::MIN as i128, i64::MAX as i128)),
            Self::U8 => Some((0, u8::MAX as i128)),
            Self::U16 => Some((0, u16::MAX as i128)),
            Self::U32 => Some((0, u32::MAX as i128)),
            Self::U64 => Some((0, u64::MAX as i128)),
            _ => None,
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Bool => "bool",
            Self::Char => "char",
            Self::String => "string",
            Self::Bytes => "bytes",
        };
        write!(f, "{}", name)
    }
}

/// What a declared type token turned out to be.
///
/// `Named` holds the fully-qualified name of a class defined in the same dump;
/// it never embeds the target, so a class may name itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum TypeResolution {
    Primitive(PrimitiveKind),
    External(String),
    List(Box<TypeResolution>),
    Reference(Box<TypeResolution>),
    Named(String),
    Fallback(String),
}

impl TypeResolution {
    pub fn list(inner: TypeResolution) -> Self {
        Self::List(Box::new(inner))
    }

    pub fn reference(inner: TypeResolution) -> Self {
        Self::Reference(Box::new(inner))
    }

    /// The type with list and reference wrappers removed.
    pub fn element(&self) -> &TypeResolution {
        match self {
            Self::List(inner) | Self::Reference(inner) => inner.element(),
            other => other,
        }
    }

    /// Class of the dump this type depends on, if any.
    pub fn referenced_class(&self) -> Option<&str> {
        match self.element() {
            Self::Named(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.element(), Self::Fallback(_))
    }
}

impl fmt::Display for TypeResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(kind) => write!(f, "{}", kind),
            Self::External(name) | Self::Named(name) => write!(f, "{}", name),
            Self::List(inner) => write!(f, "List[{}]", inner),
            Self::Reference(inner) => write!(f, "PPtr[{}]", inner),
            Self::Fallback(_) => write!(f, "object"),
        }
    }
}
