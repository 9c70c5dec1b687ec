// Wed Jan 14 2026 - Alex

use crate::types::PrimitiveKind;

const PRIMITIVE_TYPES: &[(&str, PrimitiveKind)] = &[
    ("char", PrimitiveKind::Char),
    ("short", PrimitiveKind::I16),
    ("int", PrimitiveKind::I32),
    ("long long", PrimitiveKind::I64),
    ("unsigned short", PrimitiveKind::U16),
    ("unsigned int", PrimitiveKind::U32),
    ("unsigned long long", PrimitiveKind::U64),
    ("UInt8", PrimitiveKind::U8),
    ("UInt16", PrimitiveKind::U16),
    ("UInt32", PrimitiveKind::U32),
    ("UInt64", PrimitiveKind::U64),
    ("SInt8", PrimitiveKind::I8),
    ("SInt16", PrimitiveKind::I16),
    ("SInt32", PrimitiveKind::I32),
    ("SInt64", PrimitiveKind::I64),
    ("Type*", PrimitiveKind::I64),
    ("FileSize", PrimitiveKind::U64),
    ("float", PrimitiveKind::F32),
    ("double", PrimitiveKind::F64),
    ("bool", PrimitiveKind::Bool),
    ("string", PrimitiveKind::String),
    ("TypelessData", PrimitiveKind::Bytes),
    // managed type names
    ("Byte[]", PrimitiveKind::Bytes),
    ("Byte", PrimitiveKind::U8),
    ("SByte", PrimitiveKind::I8),
    ("Int16", PrimitiveKind::I16),
    ("Int32", PrimitiveKind::I32),
    ("Int64", PrimitiveKind::I64),
    ("UInt16", PrimitiveKind::U16),
    ("Single", PrimitiveKind::F32),
    ("Double", PrimitiveKind::F64),
    ("Boolean", PrimitiveKind::Bool),
    ("String", PrimitiveKind::String),
];

const TYPE_ALIASES: &[(&str, &str)] = &[
    ("Color", "ColorRGBA"),
    ("Vector2", "Vector2f"),
    ("Vector3", "Vector3f"),
    ("Vector4", "Vector4f"),
    ("Quaternion", "Quaternionf"),
    ("Matrix4x4", "Matrix4x4f"),
    ("Rect", "Rectf"),
];

pub fn primitive_kind(token: &str) -> Option<PrimitiveKind> {
    PRIMITIVE_TYPES
        .iter()
        .find(|(name, _)| *name == token)
        .map(|(_, kind)| *kind)
}

/// Base-library class a managed type token stands for.
pub fn alias_target(token: &str) -> Option<&'static str> {
    TYPE_ALIASES
        .iter()
        .find(|(name, _)| *name == token)
        .map(|(_, target)| *target)
}

/// Turns a dump class name into an identifier.
pub fn translate_name(name: &str) -> String {
    name.replace("<>", "__generic_")
        .replace(['<', '>'], "_")
        .replace('=', "_")
}
