// SPDX-License-Identifier: Apache-2.0

//! Number handling on both sides of the decoder.
//!
//! The reader side turns the text of a number token into the narrowest
//! [`Event`] that holds it. The host side widens integer events into the
//! configured [`HostInt`], falling back to `f64` when the value is out of
//! range.

use crate::parse_error::{ErrorCode, ParseError};
use crate::Event;

/// The host integer type, selected with the `int32` / `int64` features.
#[cfg(feature = "int32")]
pub type HostInt = i32;
/// The host integer type, selected with the `int32` / `int64` features.
#[cfg(feature = "int64")]
pub type HostInt = i64;

/// A number as the host stores it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostNumber {
    Integer(HostInt),
    Float(f64),
}

impl HostNumber {
    pub fn from_i32(n: i32) -> Self {
        HostInt::try_from(n).map_or(HostNumber::Float(f64::from(n)), HostNumber::Integer)
    }

    pub fn from_u32(n: u32) -> Self {
        HostInt::try_from(n).map_or(HostNumber::Float(f64::from(n)), HostNumber::Integer)
    }

    pub fn from_i64(n: i64) -> Self {
        HostInt::try_from(n).map_or(HostNumber::Float(n as f64), HostNumber::Integer)
    }

    pub fn from_u64(n: u64) -> Self {
        HostInt::try_from(n).map_or(HostNumber::Float(n as f64), HostNumber::Integer)
    }

    /// Widens a numeric event. Returns `None` for anything that is not a
    /// typed number.
    pub fn from_event(event: &Event<'_>) -> Option<Self> {
        match *event {
            Event::Int(n) => Some(Self::from_i32(n)),
            Event::Uint(n) => Some(Self::from_u32(n)),
            Event::Int64(n) => Some(Self::from_i64(n)),
            Event::Uint64(n) => Some(Self::from_u64(n)),
            Event::Double(d) => Some(HostNumber::Float(d)),
            _ => None,
        }
    }

    /// Parses number text the way a scripting host's `tonumber` would:
    /// integer text that fits stays integral, everything else is a float.
    pub fn parse(text: &str) -> Option<Self> {
        if is_integer(text.as_bytes()) {
            if let Ok(n) = text.parse::<HostInt>() {
                return Some(HostNumber::Integer(n));
            }
        }
        text.parse::<f64>().ok().map(HostNumber::Float)
    }
}

/// True when the token has no fraction or exponent part.
fn is_integer(bytes: &[u8]) -> bool {
    !bytes.iter().any(|&b| matches!(b, b'.' | b'e' | b'E'))
}

/// Classifies a complete, grammatically valid number token.
///
/// `offset` is where the token started and is reported when the value does
/// not fit a finite `f64`.
pub(crate) fn classify(text: &str, offset: usize) -> Result<Event<'_>, ParseError> {
    if is_integer(text.as_bytes()) {
        if let Some(digits) = text.strip_prefix('-') {
            if let Ok(n) = text.parse::<i64>() {
                return Ok(match i32::try_from(n) {
                    Ok(small) => Event::Int(small),
                    Err(_) => Event::Int64(n),
                });
            }
            log::trace!("integer -{} overflows i64, using double", digits);
        } else if let Ok(n) = text.parse::<u64>() {
            return Ok(match u32::try_from(n) {
                Ok(small) => Event::Uint(small),
                Err(_) => Event::Uint64(n),
            });
        }
    }
    match text.parse::<f64>() {
        Ok(d) if d.is_finite() => Ok(Event::Double(d)),
        _ => ParseError::new(ErrorCode::NumberTooBig, offset),
    }
}
