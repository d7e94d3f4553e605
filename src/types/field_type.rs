//! Wire field type definitions

use serde::{Deserialize, Serialize};

/// Primitive field types found in the telemetry wire format.
///
/// All multi-byte scalars are little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum FieldType {
    /// 8-bit unsigned integer
    UInt8,
    /// 8-bit signed integer
    Int8,
    /// 16-bit unsigned integer
    UInt16,
    /// 16-bit signed integer
    Int16,
    /// 32-bit unsigned integer
    UInt32,
    /// 64-bit unsigned integer
    UInt64,
    /// 32-bit floating point
    Float32,
    /// 64-bit floating point
    Float64,
    /// NUL-padded UTF-8 text of a fixed width in bytes
    Text(usize),
}

impl FieldType {
    /// Returns the size in bytes of this field on the wire.
    pub const fn size(&self) -> usize {
        match self {
            FieldType::UInt8 | FieldType::Int8 => 1,
            FieldType::UInt16 | FieldType::Int16 => 2,
            FieldType::UInt32 | FieldType::Float32 => 4,
            FieldType::UInt64 | FieldType::Float64 => 8,
            FieldType::Text(width) => *width,
        }
    }
}

/// Runtime scalar value decoded from the wire.
///
/// There is no array variant: projection expands arrays into named scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum Value {
    UInt8(u8),
    Int8(i8),
    UInt16(u16),
    Int16(i16),
    UInt32(u32),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    Text(String),
}

impl Value {
    /// Numeric view of the value; `None` for text.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::UInt8(v) => Some(*v as f64),
            Value::Int8(v) => Some(*v as f64),
            Value::UInt16(v) => Some(*v as f64),
            Value::Int16(v) => Some(*v as f64),
            Value::UInt32(v) => Some(*v as f64),
            Value::UInt64(v) => Some(*v as f64),
            Value::Float32(v) => Some(*v as f64),
            Value::Float64(v) => Some(*v),
            Value::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The wire type this value was decoded as.
    pub fn field_type(&self) -> FieldType {
        match self {
            Value::UInt8(_) => FieldType::UInt8,
            Value::Int8(_) => FieldType::Int8,
            Value::UInt16(_) => FieldType::UInt16,
            Value::Int16(_) => FieldType::Int16,
            Value::UInt32(_) => FieldType::UInt32,
            Value::UInt64(_) => FieldType::UInt64,
            Value::Float32(_) => FieldType::Float32,
            Value::Float64(_) => FieldType::Float64,
            Value::Text(s) => FieldType::Text(s.len()),
        }
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

value_from! {
    u8 => UInt8,
    i8 => Int8,
    u16 => UInt16,
    i16 => Int16,
    u32 => UInt32,
    u64 => UInt64,
    f32 => Float32,
    f64 => Float64,
    String => Text,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}
