// SPDX-License-Identifier: Apache-2.0

//! Selective streaming JSON decoding.
//!
//! A push [`Reader`] turns bytes into SAX [`Event`]s; a [`SelectiveDecoder`]
//! consumes them and builds a record from only the allow-listed fields of the
//! root object. Values of other fields are skipped without being built, no
//! matter how deeply they nest.
//!
//! ```
//! use jsonsift::{decode, FieldFilter};
//!
//! let filter = FieldFilter::new(["title", "tags"]);
//! let record = decode(br#"{"title":"A","skip":{"a":[1]},"tags":["x"]}"#, &filter).unwrap();
//! assert_eq!(record.to_string(), r#"{"tags":["x"],"title":"A"}"#);
//! ```

#![cfg_attr(not(test), no_std)]

extern crate alloc;

// Compile-time configuration validation
mod config_check;

mod context;
mod decoder;
mod depth;
mod error;
mod event;
mod filter;
mod number;
mod parse_error;
mod reader;
mod sink;
mod trace;
mod value;

use alloc::borrow::Cow;
use alloc::string::{String, ToString};

pub use context::{Context, ContextStack};
pub use decoder::{SelectiveDecoder, DEFAULT_MAX_DEPTH};
pub use depth::DepthTracker;
pub use error::{DecodeError, InvariantViolation, ResourceError};
pub use event::Event;
pub use filter::{FieldFilter, DEFAULT_FIELDS};
pub use number::{HostInt, HostNumber};
pub use parse_error::{ErrorCode, ParseError};
pub use reader::{NumberMode, ReadError, Reader, SaxHandler};
pub use sink::{ContainerKind, ValueSink};
pub use trace::EventTrace;
pub use value::{Map, Value, ValueBuilder};

/// Configures and runs decodes.
///
/// One `Decoder` can run any number of decodes; each gets fresh state.
pub struct Decoder<'a> {
    filter: Cow<'a, FieldFilter>,
    max_depth: usize,
    numbers: NumberMode,
    trace: Option<&'a mut dyn EventTrace>,
}

impl Default for Decoder<'_> {
    /// A decoder using the default allow-list.
    fn default() -> Self {
        Self::with_filter(Cow::Owned(FieldFilter::default()))
    }
}

impl<'a> Decoder<'a> {
    pub fn new(filter: &'a FieldFilter) -> Self {
        Self::with_filter(Cow::Borrowed(filter))
    }

    fn with_filter(filter: Cow<'a, FieldFilter>) -> Self {
        Self {
            filter,
            max_depth: DEFAULT_MAX_DEPTH,
            numbers: NumberMode::Typed,
            trace: None,
        }
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Delivers numbers to the sink as text instead of typed values.
    pub fn raw_numbers(mut self, raw: bool) -> Self {
        self.numbers = if raw {
            NumberMode::Raw
        } else {
            NumberMode::Typed
        };
        self
    }

    pub fn trace(mut self, trace: &'a mut dyn EventTrace) -> Self {
        self.trace = Some(trace);
        self
    }

    pub fn filter(&self) -> &FieldFilter {
        &self.filter
    }

    /// Starts a chunked decode into `sink`.
    pub fn stream<S: ValueSink>(&mut self, sink: S) -> Stream<'_, S> {
        let mut decoder =
            SelectiveDecoder::new(sink, &self.filter).with_max_depth(self.max_depth);
        if let Some(trace) = self.trace.as_mut() {
            decoder = decoder.with_trace(&mut **trace as &mut dyn EventTrace);
        }
        Stream {
            reader: Reader::with_number_mode(decoder, self.numbers),
        }
    }

    /// Decodes a complete document into `sink`.
    pub fn decode_with<S: ValueSink>(
        &mut self,
        sink: S,
        input: &[u8],
    ) -> Result<S::Value, DecodeError> {
        let mut stream = self.stream(sink);
        stream.write(input)?;
        stream.finish()
    }

    /// Decodes a complete document into a [`Value`].
    pub fn decode(&mut self, input: &[u8]) -> Result<Value, DecodeError> {
        self.decode_with(ValueBuilder, input)
    }
}

/// A decode in progress, fed one chunk at a time.
///
/// Dropping it before [`finish`](Stream::finish) discards everything built
/// so far.
pub struct Stream<'d, S: ValueSink> {
    reader: Reader<SelectiveDecoder<'d, S>>,
}

impl<S: ValueSink> Stream<'_, S> {
    pub fn write(&mut self, chunk: &[u8]) -> Result<(), DecodeError> {
        self.reader
            .write::<DecodeError>(chunk)
            .map_err(DecodeError::from)
    }

    /// Ends the input and returns the record.
    pub fn finish(mut self) -> Result<S::Value, DecodeError> {
        self.reader
            .finish::<DecodeError>()
            .map_err(DecodeError::from)?;
        self.reader.into_handler().into_record()
    }

    /// Bytes accepted so far.
    pub fn offset(&self) -> usize {
        self.reader.offset()
    }
}

/// Decodes `input`, keeping the fields named by `filter`.
pub fn decode(input: &[u8], filter: &FieldFilter) -> Result<Value, DecodeError> {
    Decoder::new(filter).decode(input)
}

/// Decodes `input` into a caller-supplied host representation.
pub fn decode_with<S: ValueSink>(
    input: &[u8],
    filter: &FieldFilter,
    sink: S,
) -> Result<S::Value, DecodeError> {
    Decoder::new(filter).decode_with(sink, input)
}

/// Decodes `input` and reports failure as a message instead of an error
/// value: `(Some(record), None)` on success, `(None, Some(message))`
/// otherwise. Syntax errors read `"<description> (<offset>)"`.
pub fn decode_to_message(input: &[u8], filter: &FieldFilter) -> (Option<Value>, Option<String>) {
    match decode(input, filter) {
        Ok(record) => (Some(record), None),
        Err(e) => (None, Some(e.to_string())),
    }
}
