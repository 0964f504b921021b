// SPDX-License-Identifier: Apache-2.0

//! Composition contexts: which retained container the next value goes into.

use alloc::string::String;
use alloc::vec::Vec;
use core::mem;

use crate::error::{DecodeError, InvariantViolation, ResourceError};
use crate::sink::{try_to_owned, ContainerKind, ValueSink};

/// The container currently being filled.
///
/// `O` and `A` are the sink's object and array types; an open context owns
/// its container until it is closed and submitted to its parent.
#[derive(Debug)]
pub enum Context<O, A> {
    /// Outside every retained container.
    Top,
    Object {
        object: O,
        /// Key waiting for its value.
        pending: Option<String>,
        /// Key events seen, including keys whose values were skipped.
        members: usize,
    },
    Array {
        array: A,
        /// Where the next element goes.
        index: usize,
    },
}

impl<O, A> Context<O, A> {
    pub fn object(object: O) -> Self {
        Context::Object {
            object,
            pending: None,
            members: 0,
        }
    }

    pub fn array(array: A) -> Self {
        Context::Array { array, index: 0 }
    }

    pub fn kind(&self) -> Option<ContainerKind> {
        match self {
            Context::Top => None,
            Context::Object { .. } => Some(ContainerKind::Object),
            Context::Array { .. } => Some(ContainerKind::Array),
        }
    }
}

/// The current context plus the saved contexts of its ancestors.
#[derive(Debug)]
pub struct ContextStack<O, A> {
    current: Context<O, A>,
    saved: Vec<Context<O, A>>,
}

impl<O, A> Default for ContextStack<O, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O, A> ContextStack<O, A> {
    pub fn new() -> Self {
        Self {
            current: Context::Top,
            saved: Vec::new(),
        }
    }

    /// Number of open retained containers.
    pub fn open(&self) -> usize {
        self.saved.len()
    }

    pub fn current(&self) -> &Context<O, A> {
        &self.current
    }

    /// Saves the current context and makes `context` current.
    pub fn push(&mut self, context: Context<O, A>) -> Result<(), ResourceError> {
        self.saved.try_reserve(1)?;
        let parent = mem::replace(&mut self.current, context);
        self.saved.push(parent);
        Ok(())
    }

    /// Restores the parent context and returns the one that was current.
    pub fn pop(&mut self) -> Option<Context<O, A>> {
        let parent = self.saved.pop()?;
        Some(mem::replace(&mut self.current, parent))
    }

    /// Records a key of the current object; its value must be submitted next.
    pub fn set_key(&mut self, key: &str) -> Result<(), DecodeError> {
        match &mut self.current {
            Context::Object {
                pending, members, ..
            } => {
                if pending.is_some() {
                    return Err(InvariantViolation::DanglingKey.into());
                }
                *pending = Some(try_to_owned(key)?);
                *members += 1;
                Ok(())
            }
            _ => Err(InvariantViolation::MissingKey.into()),
        }
    }

    /// Counts a key of the current object whose value will be skipped.
    pub fn skip_key(&mut self) -> Result<(), DecodeError> {
        match &mut self.current {
            Context::Object {
                pending: None,
                members,
                ..
            } => {
                *members += 1;
                Ok(())
            }
            Context::Object { .. } => Err(InvariantViolation::DanglingKey.into()),
            _ => Err(InvariantViolation::MissingKey.into()),
        }
    }

    /// Places `value` in the current container.
    pub fn submit<S>(&mut self, sink: &mut S, value: S::Value) -> Result<(), DecodeError>
    where
        S: ValueSink<Object = O, Array = A>,
    {
        match &mut self.current {
            Context::Top => Err(InvariantViolation::ValueOutsideContainer.into()),
            Context::Object {
                object, pending, ..
            } => {
                let key = pending.take().ok_or(InvariantViolation::MissingKey)?;
                sink.insert(object, key, value)?;
                Ok(())
            }
            Context::Array { array, index } => {
                sink.append(array, *index, value)?;
                *index += 1;
                Ok(())
            }
        }
    }

    /// Closes the current container and returns it as a finished value.
    ///
    /// `reported` is the member or element count carried by the end event;
    /// it must equal the count tracked by the context.
    pub fn close<S>(
        &mut self,
        sink: &mut S,
        kind: ContainerKind,
        reported: usize,
    ) -> Result<S::Value, DecodeError>
    where
        S: ValueSink<Object = O, Array = A>,
    {
        let expected = self.current.kind();
        if expected != Some(kind) {
            return Err(InvariantViolation::UnbalancedEnd { expected }.into());
        }
        let (tracked, value) = match self.pop() {
            Some(Context::Object {
                pending: Some(_), ..
            }) => return Err(InvariantViolation::DanglingKey.into()),
            Some(Context::Object {
                object, members, ..
            }) => (members, sink.finish_object(object)),
            Some(Context::Array { array, index }) => (index, sink.finish_array(array)),
            Some(Context::Top) | None => {
                return Err(InvariantViolation::UnbalancedEnd { expected: None }.into())
            }
        };
        if tracked != reported {
            log::error!(
                "{} closed with {} entries reported, {} tracked",
                kind,
                reported,
                tracked
            );
            return Err(InvariantViolation::CountMismatch {
                kind,
                reported,
                tracked,
            }
            .into());
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Map, Value, ValueBuilder};

    type Stack = ContextStack<Map, Vec<Value>>;

    #[test]
    fn test_push_pop_restores_parent() {
        let mut stack = Stack::new();
        assert_eq!(stack.open(), 0);
        stack.push(Context::object(Map::new())).unwrap();
        stack.push(Context::array(Vec::new())).unwrap();
        assert_eq!(stack.open(), 2);
        assert_eq!(stack.current().kind(), Some(ContainerKind::Array));
        assert!(matches!(stack.pop(), Some(Context::Array { index: 0, .. })));
        assert_eq!(stack.current().kind(), Some(ContainerKind::Object));
        assert!(stack.pop().is_some());
        assert!(stack.pop().is_none());
        assert_eq!(stack.current().kind(), None);
    }

    #[test]
    fn test_submit_into_object_consumes_key() {
        let mut sink = ValueBuilder;
        let mut stack = Stack::new();
        stack.push(Context::object(Map::new())).unwrap();
        stack.set_key("title").unwrap();
        stack.submit(&mut sink, Value::Bool(true)).unwrap();
        assert_eq!(
            stack.submit(&mut sink, Value::Null),
            Err(InvariantViolation::MissingKey.into())
        );
        let value = stack.close(&mut sink, ContainerKind::Object, 1).unwrap();
        assert_eq!(value.get("title"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_submit_into_array_advances_index() {
        let mut sink = ValueBuilder;
        let mut stack = Stack::new();
        stack.push(Context::array(Vec::new())).unwrap();
        stack.submit(&mut sink, Value::Integer(1)).unwrap();
        stack.submit(&mut sink, Value::Integer(2)).unwrap();
        assert!(matches!(stack.current(), Context::Array { index: 2, .. }));
        let value = stack.close(&mut sink, ContainerKind::Array, 2).unwrap();
        assert_eq!(
            value,
            Value::Array(vec![Value::Integer(1), Value::Integer(2)])
        );
    }

    #[test]
    fn test_submit_at_top_is_invariant_failure() {
        let mut stack = Stack::new();
        assert_eq!(
            stack.submit(&mut ValueBuilder, Value::Null),
            Err(InvariantViolation::ValueOutsideContainer.into())
        );
    }

    #[test]
    fn test_close_checks_counts() {
        let mut sink = ValueBuilder;
        let mut stack = Stack::new();
        stack.push(Context::array(Vec::new())).unwrap();
        stack.submit(&mut sink, Value::Null).unwrap();
        assert_eq!(
            stack.close(&mut sink, ContainerKind::Array, 2),
            Err(InvariantViolation::CountMismatch {
                kind: ContainerKind::Array,
                reported: 2,
                tracked: 1
            }
            .into())
        );
    }

    #[test]
    fn test_skipped_keys_count_as_members() {
        let mut sink = ValueBuilder;
        let mut stack = Stack::new();
        stack.push(Context::object(Map::new())).unwrap();
        stack.skip_key().unwrap();
        stack.set_key("kept").unwrap();
        stack.submit(&mut sink, Value::Integer(7)).unwrap();
        stack.skip_key().unwrap();
        let value = stack.close(&mut sink, ContainerKind::Object, 3).unwrap();
        assert_eq!(value.as_object().map(Map::len), Some(1));
    }

    #[test]
    fn test_close_rejects_wrong_kind_and_dangling_key() {
        let mut sink = ValueBuilder;
        let mut stack = Stack::new();
        assert_eq!(
            stack.close(&mut sink, ContainerKind::Object, 0),
            Err(InvariantViolation::UnbalancedEnd { expected: None }.into())
        );
        stack.push(Context::object(Map::new())).unwrap();
        assert_eq!(
            stack.close(&mut sink, ContainerKind::Array, 0),
            Err(InvariantViolation::UnbalancedEnd {
                expected: Some(ContainerKind::Object)
            }
            .into())
        );
        stack.set_key("k").unwrap();
        assert_eq!(
            stack.set_key("again"),
            Err(InvariantViolation::DanglingKey.into())
        );
        assert_eq!(
            stack.close(&mut sink, ContainerKind::Object, 1),
            Err(InvariantViolation::DanglingKey.into())
        );
    }
}
