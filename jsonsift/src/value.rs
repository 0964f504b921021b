// SPDX-License-Identifier: Apache-2.0

//! The default host value representation.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Write};

use crate::error::ResourceError;
use crate::number::HostInt;
use crate::sink::{try_to_owned, ValueSink};

/// Object members, ordered by key.
pub type Map = BTreeMap<String, Value>;

/// A decoded JSON value.
///
/// `Display` writes compact JSON that decodes back to an equal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(HostInt),
    Float(f64),
    String(String),
    Array(Vec<Value>),
    Object(Map),
}

impl Value {
    /// Looks up an object member. `None` for missing keys and non-objects.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<HostInt> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// The value as a float, converting integers.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(d) => Some(*d),
            Value::Integer(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }
}

fn write_json_string(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_char('"')?;
    for ch in s.chars() {
        match ch {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            '\u{08}' => f.write_str("\\b")?,
            '\u{0C}' => f.write_str("\\f")?,
            c if (c as u32) < 0x20 => write!(f, "\\u{:04x}", c as u32)?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(n) => write!(f, "{n}"),
            // Debug keeps a fraction or exponent, so the text reads back as a float.
            Value::Float(d) if d.is_finite() => write!(f, "{d:?}"),
            Value::Float(_) => f.write_str("null"),
            Value::String(s) => write_json_string(f, s),
            Value::Array(items) => {
                f.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_char(']')
            }
            Value::Object(map) => {
                f.write_char('{')?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write_json_string(f, key)?;
                    write!(f, ":{value}")?;
                }
                f.write_char('}')
            }
        }
    }
}

/// Builds [`Value`] trees.
#[derive(Debug, Default, Clone, Copy)]
pub struct ValueBuilder;

impl ValueSink for ValueBuilder {
    type Value = Value;
    type Object = Map;
    type Array = Vec<Value>;

    fn null(&mut self) -> Value {
        Value::Null
    }

    fn boolean(&mut self, value: bool) -> Value {
        Value::Bool(value)
    }

    fn integer(&mut self, value: HostInt) -> Value {
        Value::Integer(value)
    }

    fn float(&mut self, value: f64) -> Value {
        Value::Float(value)
    }

    fn string(&mut self, value: &str) -> Result<Value, ResourceError> {
        try_to_owned(value).map(Value::String)
    }

    fn new_object(&mut self, _size_hint: usize) -> Result<Map, ResourceError> {
        Ok(Map::new())
    }

    fn new_array(&mut self) -> Result<Vec<Value>, ResourceError> {
        Ok(Vec::new())
    }

    fn insert(&mut self, object: &mut Map, key: String, value: Value) -> Result<(), ResourceError> {
        object.insert(key, value);
        Ok(())
    }

    fn append(
        &mut self,
        array: &mut Vec<Value>,
        index: usize,
        value: Value,
    ) -> Result<(), ResourceError> {
        debug_assert_eq!(index, array.len());
        array.try_reserve(1)?;
        array.push(value);
        Ok(())
    }

    fn finish_object(&mut self, object: Map) -> Value {
        Value::Object(object)
    }

    fn finish_array(&mut self, array: Vec<Value>) -> Value {
        Value::Array(array)
    }
}
