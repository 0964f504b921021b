// SPDX-License-Identifier: Apache-2.0

/// Events produced by the [`Reader`](crate::Reader) and consumed by a
/// [`SaxHandler`](crate::SaxHandler).
///
/// Text payloads borrow from the reader's scratch buffer and are only valid
/// for the duration of the handler call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event<'a> {
    /// A null value (`null`).
    Null,
    /// A boolean value (`true` or `false`).
    Bool(bool),
    /// A negative integer that fits in 32 bits.
    Int(i32),
    /// A non-negative integer that fits in 32 bits.
    Uint(u32),
    /// A negative integer that fits in 64 bits but not in 32.
    Int64(i64),
    /// A non-negative integer that fits in 64 bits but not in 32.
    Uint64(u64),
    /// A number with a fraction or exponent, or an integer outside the 64-bit
    /// ranges.
    Double(f64),
    /// The literal text of a number, emitted instead of the typed variants
    /// when the reader is configured with raw numbers.
    RawNumber(&'a str),
    /// A string value with escapes resolved.
    String(&'a str),
    /// The start of an object (`{`).
    StartObject,
    /// An object member name with escapes resolved.
    Key(&'a str),
    /// The end of an object (`}`), carrying its member count.
    EndObject(usize),
    /// The start of an array (`[`).
    StartArray,
    /// The end of an array (`]`), carrying its element count.
    EndArray(usize),
}

impl Event<'_> {
    /// True for events that produce a complete value on their own.
    pub fn is_scalar(&self) -> bool {
        !matches!(
            self,
            Event::StartObject
                | Event::Key(_)
                | Event::EndObject(_)
                | Event::StartArray
                | Event::EndArray(_)
        )
    }
}
