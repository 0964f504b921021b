// SPDX-License-Identifier: Apache-2.0

//! The host side of the decoder: how produced values are represented.

use alloc::string::String;

use crate::error::ResourceError;
use crate::number::{HostInt, HostNumber};

/// The two kinds of container a record is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Object,
    Array,
}

impl core::fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            ContainerKind::Object => "object",
            ContainerKind::Array => "array",
        })
    }
}

/// Construction and append primitives of a host value representation.
///
/// The decoder never inspects values: it creates them through these methods
/// and hands them back to the sink to be placed in their parent. Containers
/// under construction are owned by the decoder until they are finished and
/// submitted to their parent.
///
/// `finish_object` and `finish_array` are where a host that cannot tell
/// objects from arrays by shape alone tags the completed container.
pub trait ValueSink {
    type Value;
    type Object;
    type Array;

    fn null(&mut self) -> Self::Value;
    fn boolean(&mut self, value: bool) -> Self::Value;
    fn integer(&mut self, value: HostInt) -> Self::Value;
    fn float(&mut self, value: f64) -> Self::Value;
    fn string(&mut self, value: &str) -> Result<Self::Value, ResourceError>;

    fn number(&mut self, value: HostNumber) -> Self::Value {
        match value {
            HostNumber::Integer(n) => self.integer(n),
            HostNumber::Float(d) => self.float(d),
        }
    }

    /// Converts the literal text of a number. The default parses it like a
    /// scripting host's `tonumber` and keeps unparseable text as a string.
    fn raw_number(&mut self, text: &str) -> Result<Self::Value, ResourceError> {
        match HostNumber::parse(text) {
            Some(n) => Ok(self.number(n)),
            None => self.string(text),
        }
    }

    /// Creates an empty object. `size_hint` is the expected member count.
    fn new_object(&mut self, size_hint: usize) -> Result<Self::Object, ResourceError>;
    fn new_array(&mut self) -> Result<Self::Array, ResourceError>;

    /// Associates `value` with `key`. A repeated key replaces the earlier
    /// value.
    fn insert(
        &mut self,
        object: &mut Self::Object,
        key: String,
        value: Self::Value,
    ) -> Result<(), ResourceError>;

    /// Stores `value` at the zero-based `index`, which is always the current
    /// length of `array`.
    fn append(
        &mut self,
        array: &mut Self::Array,
        index: usize,
        value: Self::Value,
    ) -> Result<(), ResourceError>;

    fn finish_object(&mut self, object: Self::Object) -> Self::Value;
    fn finish_array(&mut self, array: Self::Array) -> Self::Value;
}

impl<S: ValueSink + ?Sized> ValueSink for &mut S {
    type Value = S::Value;
    type Object = S::Object;
    type Array = S::Array;

    fn null(&mut self) -> Self::Value {
        (**self).null()
    }
    fn boolean(&mut self, value: bool) -> Self::Value {
        (**self).boolean(value)
    }
    fn integer(&mut self, value: HostInt) -> Self::Value {
        (**self).integer(value)
    }
    fn float(&mut self, value: f64) -> Self::Value {
        (**self).float(value)
    }
    fn string(&mut self, value: &str) -> Result<Self::Value, ResourceError> {
        (**self).string(value)
    }
    fn number(&mut self, value: HostNumber) -> Self::Value {
        (**self).number(value)
    }
    fn raw_number(&mut self, text: &str) -> Result<Self::Value, ResourceError> {
        (**self).raw_number(text)
    }
    fn new_object(&mut self, size_hint: usize) -> Result<Self::Object, ResourceError> {
        (**self).new_object(size_hint)
    }
    fn new_array(&mut self) -> Result<Self::Array, ResourceError> {
        (**self).new_array()
    }
    fn insert(
        &mut self,
        object: &mut Self::Object,
        key: String,
        value: Self::Value,
    ) -> Result<(), ResourceError> {
        (**self).insert(object, key, value)
    }
    fn append(
        &mut self,
        array: &mut Self::Array,
        index: usize,
        value: Self::Value,
    ) -> Result<(), ResourceError> {
        (**self).append(array, index, value)
    }
    fn finish_object(&mut self, object: Self::Object) -> Self::Value {
        (**self).finish_object(object)
    }
    fn finish_array(&mut self, array: Self::Array) -> Self::Value {
        (**self).finish_array(array)
    }
}

/// Copies `text` into a new string, reporting allocation failure instead of
/// aborting.
pub(crate) fn try_to_owned(text: &str) -> Result<String, ResourceError> {
    let mut owned = String::new();
    owned.try_reserve_exact(text.len())?;
    owned.push_str(text);
    Ok(owned)
}
