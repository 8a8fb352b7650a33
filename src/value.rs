//! Scalar values accepted by the cache.

use std::fmt;

use crate::advice::args::{format_float, CallArgs, Repr};

/// A scalar value stored under a generated key.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Bytes(Vec<u8>),
    Integer(i64),
    Float(f64),
}

impl Value {
    /// Encode the value to the bytes written to the store.
    ///
    /// Numbers are written as base-10 text so the store's own numeric
    /// commands and the text decoders can read them back.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Value::Text(s) => s.as_bytes().to_vec(),
            Value::Bytes(b) => b.clone(),
            Value::Integer(i) => i.to_string().into_bytes(),
            Value::Float(f) => format_float(*f).into_bytes(),
        }
    }
}

impl Repr for Value {
    fn repr(&self) -> String {
        match self {
            Value::Text(s) => s.repr(),
            Value::Bytes(b) => b.repr(),
            Value::Integer(i) => i.repr(),
            Value::Float(f) => f.repr(),
        }
    }
}

/// A `Value` is the sole positional argument of `Cache::store`.
impl CallArgs for Value {
    fn args_repr(&self) -> String {
        format!("({},)", self.repr())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Bytes(b) => f.write_str(&String::from_utf8_lossy(b)),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(v) => f.write_str(&format_float(*v)),
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(value)
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Bytes(value.to_vec())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}
