// SPDX-License-Identifier: Apache-2.0

//! The event dispatcher: decides per event whether it builds part of the
//! record or is skipped.

use crate::context::{Context, ContextStack};
use crate::depth::DepthTracker;
use crate::error::{DecodeError, InvariantViolation, ResourceError};
use crate::filter::FieldFilter;
use crate::number::HostNumber;
use crate::reader::SaxHandler;
use crate::sink::{ContainerKind, ValueSink};
use crate::trace::EventTrace;
use crate::Event;

/// Default limit on retained container nesting.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// A [`SaxHandler`] that builds the record from the allow-listed fields of
/// the root object.
///
/// Retention is decided once, at the record's own keys: a wanted field keeps
/// its entire subtree, an unwanted one is skipped without creating anything.
/// Skipped containers are only counted, so their nesting never grows the
/// context stack.
pub struct SelectiveDecoder<'a, S: ValueSink> {
    sink: S,
    filter: &'a FieldFilter,
    depth: DepthTracker,
    /// Filter result for the most recent record-level key.
    wanted: bool,
    /// Containers open inside a skipped subtree.
    skipping: usize,
    contexts: ContextStack<S::Object, S::Array>,
    record: Option<S::Value>,
    max_depth: usize,
    trace: Option<&'a mut dyn EventTrace>,
}

impl<'a, S: ValueSink> SelectiveDecoder<'a, S> {
    pub fn new(sink: S, filter: &'a FieldFilter) -> Self {
        Self {
            sink,
            filter,
            depth: DepthTracker::new(),
            wanted: false,
            skipping: 0,
            contexts: ContextStack::new(),
            record: None,
            max_depth: DEFAULT_MAX_DEPTH,
            trace: None,
        }
    }

    /// Limits how deeply retained containers may nest, the record included.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_trace(mut self, trace: &'a mut dyn EventTrace) -> Self {
        self.trace = Some(trace);
        self
    }

    /// Number of currently open objects, retained or not.
    pub fn depth(&self) -> usize {
        self.depth.get()
    }

    /// The record, once its closing brace has been seen.
    pub fn record(&self) -> Option<&S::Value> {
        self.record.as_ref()
    }

    /// Hands over the completed record.
    pub fn into_record(self) -> Result<S::Value, DecodeError> {
        self.record.ok_or(DecodeError::NotAnObject)
    }

    /// Whether a value starting now belongs to the record.
    fn retains_value(&self) -> bool {
        if self.skipping > 0 || self.record.is_some() {
            return false;
        }
        match self.contexts.open() {
            0 => false,
            // Directly inside the record: the last key decides.
            1 => self.wanted,
            // Inside a retained field: everything is kept.
            _ => true,
        }
    }

    fn enter(&mut self, context: Context<S::Object, S::Array>) -> Result<(), DecodeError> {
        if self.contexts.open() >= self.max_depth {
            return Err(ResourceError::DepthLimit {
                limit: self.max_depth,
            }
            .into());
        }
        self.contexts.push(context)?;
        Ok(())
    }

    fn skip_open(&mut self) {
        if self.skipping == 0 {
            log::debug!("skipping subtree at depth {}", self.depth.get());
        }
        self.skipping += 1;
    }

    fn skip_close(&mut self) {
        self.skipping -= 1;
        if self.skipping == 0 {
            log::debug!("skipped subtree closed at depth {}", self.depth.get());
        }
    }

    /// Applies one event and reports whether it contributed to the record.
    fn dispatch(&mut self, event: &Event<'_>) -> Result<bool, DecodeError> {
        if event.is_scalar() {
            if !self.retains_value() {
                return Ok(false);
            }
            let value = self.produce(event)?;
            self.contexts.submit(&mut self.sink, value)?;
            return Ok(true);
        }
        match *event {
            Event::StartObject => {
                let before = self.depth.on_object_start();
                if before == 0 && self.skipping == 0 && self.contexts.open() == 0 {
                    if self.record.is_some() {
                        return Err(InvariantViolation::ValueOutsideContainer.into());
                    }
                    let object = self.sink.new_object(self.filter.len())?;
                    self.enter(Context::object(object))?;
                    log::debug!("record started");
                    Ok(true)
                } else if self.retains_value() {
                    let object = self.sink.new_object(0)?;
                    self.enter(Context::object(object))?;
                    Ok(true)
                } else {
                    self.skip_open();
                    Ok(false)
                }
            }
            Event::StartArray => {
                if self.retains_value() {
                    let array = self.sink.new_array()?;
                    self.enter(Context::array(array))?;
                    Ok(true)
                } else {
                    self.skip_open();
                    Ok(false)
                }
            }
            Event::Key(key) => {
                if self.skipping > 0 {
                    Ok(false)
                } else if self.depth.get() == 1 && self.contexts.open() == 1 {
                    self.wanted = self.filter.test(key);
                    if self.wanted {
                        self.contexts.set_key(key)?;
                    } else {
                        self.contexts.skip_key()?;
                    }
                    Ok(self.wanted)
                } else if self.contexts.open() > 1 {
                    self.contexts.set_key(key)?;
                    Ok(true)
                } else {
                    Ok(false)
                }
            }
            Event::EndObject(count) => {
                let after = self.depth.on_object_end();
                if self.skipping > 0 {
                    self.skip_close();
                    return Ok(false);
                }
                let value = self
                    .contexts
                    .close(&mut self.sink, ContainerKind::Object, count)?;
                if after == 0 {
                    if self.contexts.open() != 0 {
                        return Err(InvariantViolation::UnbalancedEnd {
                            expected: self.contexts.current().kind(),
                        }
                        .into());
                    }
                    log::debug!("record complete with {} members seen", count);
                    self.record = Some(value);
                } else {
                    self.contexts.submit(&mut self.sink, value)?;
                }
                Ok(true)
            }
            Event::EndArray(count) => {
                if self.skipping > 0 {
                    self.skip_close();
                    return Ok(false);
                }
                let value = self
                    .contexts
                    .close(&mut self.sink, ContainerKind::Array, count)?;
                self.contexts.submit(&mut self.sink, value)?;
                Ok(true)
            }
            // Scalars were handled above.
            _ => Ok(false),
        }
    }

    /// Builds the host value of a scalar event.
    fn produce(&mut self, event: &Event<'_>) -> Result<S::Value, ResourceError> {
        if let Some(number) = HostNumber::from_event(event) {
            return Ok(self.sink.number(number));
        }
        Ok(match *event {
            Event::Bool(b) => self.sink.boolean(b),
            Event::RawNumber(text) => self.sink.raw_number(text)?,
            Event::String(text) => self.sink.string(text)?,
            _ => self.sink.null(),
        })
    }
}

impl<S: ValueSink> SaxHandler<DecodeError> for SelectiveDecoder<'_, S> {
    fn handle_event(&mut self, event: Event<'_>) -> Result<(), DecodeError> {
        let retained = self.dispatch(&event)?;
        log::trace!(
            "{:?} depth={} retained={}",
            event,
            self.depth.get(),
            retained
        );
        if let Some(trace) = self.trace.as_mut() {
            trace.on_event(&event, self.depth.get(), retained);
        }
        Ok(())
    }
}
