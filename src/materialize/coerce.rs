// Fri Jan 16 2026 - Alex

use crate::materialize::{FieldValue, Value};
use crate::types::PrimitiveKind;

/// Converts a decoded scalar into the primitive kind a field declares.
///
/// Integers are range-checked against the declared width; floats truncate
/// toward zero when an integer is expected.
pub fn coerce(kind: PrimitiveKind, value: &Value) -> Option<FieldValue> {
    match kind {
        k if k.is_integer() => coerce_integer(k, value),
        k if k.is_float() => as_float(value).map(FieldValue::Float),
        PrimitiveKind::Bool => as_bool(value).map(FieldValue::Bool),
        k if k.is_text() => as_text(value).map(FieldValue::String),
        PrimitiveKind::Bytes => as_bytes(value).map(FieldValue::Bytes),
        _ => None,
    }
}

fn as_integer(value: &Value) -> Option<i128> {
    match value {
        Value::Int(i) => Some(*i as i128),
        Value::UInt(u) => Some(*u as i128),
        Value::Bool(b) => Some(*b as i128),
        Value::Float(f) if f.is_finite() => Some(f.trunc() as i128),
        Value::String(s) => s.trim().parse::<i128>().ok(),
        _ => None,
    }
}

fn coerce_integer(kind: PrimitiveKind, value: &Value) -> Option<FieldValue> {
    let (min, max) = kind.integer_bounds()?;
    let n = as_integer(value).filter(|n| (min..=max).contains(n))?;
    if kind.is_signed() {
        i64::try_from(n).ok().map(FieldValue::Int)
    } else {
        u64::try_from(n).ok().map(FieldValue::UInt)
    }
}

fn as_float(value: &Value) -> Option<f64> {
    match value {
        Value::Float(f) => Some(*f),
        Value::Int(i) => Some(*i as f64),
        Value::UInt(u) => Some(*u as f64),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Int(i) => Some(*i != 0),
        Value::UInt(u) => Some(*u != 0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Int(i) => Some(i.to_string()),
        Value::UInt(u) => Some(u.to_string()),
        Value::Float(f) => Some(f.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Bytes(bytes) => String::from_utf8(bytes.clone()).ok(),
        _ => None,
    }
}

fn as_bytes(value: &Value) -> Option<Vec<u8>> {
    match value {
        Value::Bytes(bytes) => Some(bytes.clone()),
        Value::String(s) => Some(s.as_bytes().to_vec()),
        Value::List(items) => items
            .iter()
            .map(|item| match item {
                Value::Int(i) => u8::try_from(*i).ok(),
                Value::UInt(u) => u8::try_from(*u).ok(),
                _ => None,
            })
            .collect(),
        _ => None,
    }
}
