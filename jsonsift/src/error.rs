// SPDX-License-Identifier: Apache-2.0

use alloc::collections::TryReserveError;

use crate::parse_error::ParseError;
use crate::reader::ReadError;
use crate::sink::ContainerKind;

/// The host could not provide room for the record being built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    /// Growing a container or the context stack failed.
    Alloc,
    /// Retained containers nest deeper than the configured limit.
    DepthLimit { limit: usize },
}

impl From<TryReserveError> for ResourceError {
    fn from(_: TryReserveError) -> Self {
        ResourceError::Alloc
    }
}

impl core::fmt::Display for ResourceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ResourceError::Alloc => write!(f, "out of memory while growing a container"),
            ResourceError::DepthLimit { limit } => {
                write!(f, "retained nesting exceeds the limit of {limit}")
            }
        }
    }
}

/// The event stream broke a rule a conformant tokenizer never breaks.
///
/// These indicate a defect in the event source or in the decoder's own
/// bookkeeping, never a problem with the JSON text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// An end event reported a different member/element count than the
    /// decoder tracked for that container.
    CountMismatch {
        kind: ContainerKind,
        reported: usize,
        tracked: usize,
    },
    /// A value reached the top context, outside every retained container.
    ValueOutsideContainer,
    /// A value was submitted to an object with no pending key.
    MissingKey,
    /// A key arrived while the previous key still waited for its value.
    DanglingKey,
    /// An end event did not match the innermost retained container.
    UnbalancedEnd { expected: Option<ContainerKind> },
}

impl core::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InvariantViolation::CountMismatch {
                kind,
                reported,
                tracked,
            } => write!(
                f,
                "{kind} end reported {reported} entries but {tracked} were tracked"
            ),
            InvariantViolation::ValueOutsideContainer => {
                write!(f, "value submitted outside any container")
            }
            InvariantViolation::MissingKey => write!(f, "object value without a key"),
            InvariantViolation::DanglingKey => write!(f, "object key without a value"),
            InvariantViolation::UnbalancedEnd { expected: Some(kind) } => {
                write!(f, "end event does not close the open {kind}")
            }
            InvariantViolation::UnbalancedEnd { expected: None } => {
                write!(f, "end event with no open container")
            }
        }
    }
}

/// Errors returned by the decode entry points.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// The input is not well-formed JSON.
    Syntax(ParseError),
    /// The host ran out of room for the record.
    Resource(ResourceError),
    /// The event stream was inconsistent.
    Invariant(InvariantViolation),
    /// The document root is not an object, so there is no record.
    NotAnObject,
}

impl From<ParseError> for DecodeError {
    fn from(e: ParseError) -> Self {
        DecodeError::Syntax(e)
    }
}

impl From<ResourceError> for DecodeError {
    fn from(e: ResourceError) -> Self {
        DecodeError::Resource(e)
    }
}

impl From<InvariantViolation> for DecodeError {
    fn from(e: InvariantViolation) -> Self {
        DecodeError::Invariant(e)
    }
}

impl From<ReadError<DecodeError>> for DecodeError {
    fn from(e: ReadError<DecodeError>) -> Self {
        match e {
            ReadError::Parse(e) => DecodeError::Syntax(e),
            ReadError::Handler(e) => e,
        }
    }
}

impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DecodeError::Syntax(e) => write!(f, "{e}"),
            DecodeError::Resource(e) => write!(f, "{e}"),
            DecodeError::Invariant(e) => write!(f, "internal error: {e}"),
            DecodeError::NotAnObject => write!(f, "the document root is not an object"),
        }
    }
}
