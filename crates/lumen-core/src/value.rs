//! Typed values
//!
//! A [`Value`] is a closed tagged union over the primitive kinds a tag or
//! measurement can carry. Narrow integer and float widths are stored
//! widened; the variant alone records the declared width, and downstream
//! serializers pick their wire width from [`Value::value_type`].

use std::fmt;

use bytes::Bytes;

use crate::{LumenError, LumenResult};

/// Rendering for any tag without a defined payload
pub const UNKNOWN_VALUE: &str = "unknown";

/// Value kind tag
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum ValueType {
    /// Never a valid payload
    #[default]
    Invalid = 0,
    Bool = 1,
    Int32 = 2,
    Int64 = 3,
    Uint32 = 4,
    Uint64 = 5,
    Float32 = 6,
    Float64 = 7,
    String = 8,
    Bytes = 9,
}

impl ValueType {
    /// Parse from a decoded byte
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0 => Some(ValueType::Invalid),
            1 => Some(ValueType::Bool),
            2 => Some(ValueType::Int32),
            3 => Some(ValueType::Int64),
            4 => Some(ValueType::Uint32),
            5 => Some(ValueType::Uint64),
            6 => Some(ValueType::Float32),
            7 => Some(ValueType::Float64),
            8 => Some(ValueType::String),
            9 => Some(ValueType::Bytes),
            _ => None,
        }
    }

    #[inline]
    pub fn to_byte(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self != ValueType::Invalid
    }

    pub fn is_integer(self) -> bool {
        matches!(
            self,
            ValueType::Int32 | ValueType::Int64 | ValueType::Uint32 | ValueType::Uint64
        )
    }

    pub fn is_float(self) -> bool {
        matches!(self, ValueType::Float32 | ValueType::Float64)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::Invalid => "INVALID",
            ValueType::Bool => "BOOL",
            ValueType::Int32 => "INT32",
            ValueType::Int64 => "INT64",
            ValueType::Uint32 => "UINT32",
            ValueType::Uint64 => "UINT64",
            ValueType::Float32 => "FLOAT32",
            ValueType::Float64 => "FLOAT64",
            ValueType::String => "STRING",
            ValueType::Bytes => "BYTES",
        }
    }
}

impl TryFrom<u8> for ValueType {
    type Error = LumenError;

    fn try_from(b: u8) -> LumenResult<Self> {
        ValueType::from_byte(b).ok_or(LumenError::UnknownValueType(b))
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tagged value. Exactly one payload per tag.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Invalid,
    Bool(bool),
    Int32(i64),
    Int64(i64),
    Uint32(u64),
    Uint64(u64),
    Float32(f64),
    Float64(f64),
    String(String),
    Bytes(Bytes),
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Invalid => ValueType::Invalid,
            Value::Bool(_) => ValueType::Bool,
            Value::Int32(_) => ValueType::Int32,
            Value::Int64(_) => ValueType::Int64,
            Value::Uint32(_) => ValueType::Uint32,
            Value::Uint64(_) => ValueType::Uint64,
            Value::Float32(_) => ValueType::Float32,
            Value::Float64(_) => ValueType::Float64,
            Value::String(_) => ValueType::String,
            Value::Bytes(_) => ValueType::Bytes,
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        !matches!(self, Value::Invalid)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int32(v) | Value::Int64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Uint32(v) | Value::Uint64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float32(v) | Value::Float64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(v) => Some(v.as_ref()),
            _ => None,
        }
    }

    /// Canonical display rendering. Total: never fails, never panics.
    pub fn emit(&self) -> String {
        match self {
            Value::Bool(v) => v.to_string(),
            Value::Int32(v) | Value::Int64(v) => v.to_string(),
            Value::Uint32(v) | Value::Uint64(v) => v.to_string(),
            Value::Float32(v) | Value::Float64(v) => format_float(*v),
            Value::String(v) => v.clone(),
            Value::Bytes(v) => String::from_utf8_lossy(v).into_owned(),
            Value::Invalid => UNKNOWN_VALUE.to_string(),
        }
    }
}

/// Shortest float rendering, switching to an exponent form with a signed,
/// two-digit exponent below 1e-4 and from 1e21 up.
fn format_float(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }

    let sci = format!("{:e}", v);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return v.to_string();
    };
    match exp.parse::<i32>() {
        Ok(exp) if !(-4..21).contains(&exp) => {
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exp.abs())
        }
        _ => v.to_string(),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.emit())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int32(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Uint32(v as u64)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Uint64(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float32(v as f64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Bytes> for Value {
    fn from(v: Bytes) -> Self {
        Value::Bytes(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(Bytes::from(v))
    }
}
