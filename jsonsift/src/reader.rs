// SPDX-License-Identifier: Apache-2.0

//! A SAX-style JSON push reader.
//!
//! Input arrives in arbitrary chunks through [`Reader::write`]; every complete
//! token is reported to the [`SaxHandler`] immediately. Only the token that is
//! currently open (a string, key or number) is buffered.

use alloc::vec::Vec;

use crate::number::classify;
use crate::parse_error::{ErrorCode, ParseError};
use crate::Event;

/// A trait for handling events from the push reader.
///
/// `E` is the error type the handler may return to abort parsing.
pub trait SaxHandler<E> {
    /// Handles a single, complete JSON event.
    fn handle_event(&mut self, event: Event<'_>) -> Result<(), E>;
}

/// An error that can occur during push-based reading.
#[derive(Debug, PartialEq)]
pub enum ReadError<E> {
    /// The input is not well-formed JSON.
    Parse(ParseError),
    /// An error was returned by the handler.
    Handler(E),
}

impl<E> From<ParseError> for ReadError<E> {
    fn from(e: ParseError) -> Self {
        ReadError::Parse(e)
    }
}

/// How number tokens are reported.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum NumberMode {
    /// Classified into `Int`, `Uint`, `Int64`, `Uint64` or `Double`.
    #[default]
    Typed,
    /// Reported verbatim as `RawNumber`.
    Raw,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    /// Before the root value.
    Start,
    /// After a colon or an array comma.
    Value,
    /// After `[`: a value or `]`.
    ArrayFirst,
    /// After `{`: a key or `}`.
    ObjectFirst,
    /// After an object comma: a key.
    ObjectKey,
    Colon,
    /// After a value inside a container: a comma or the closing bracket.
    AfterValue,
    String { key: bool, escape: Escape },
    Number(Num),
    Literal { text: &'static [u8], matched: usize },
    /// The root value is complete.
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Escape {
    None,
    Backslash,
    Hex { digits: u8, unit: u32 },
    /// A high surrogate was decoded, its low half must follow.
    LowSurrogate,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Num {
    Minus,
    Zero,
    Integer,
    Point,
    Fraction,
    Exponent,
    ExponentSign,
    ExponentDigits,
}

impl Num {
    /// `Ok(None)` means the byte is not part of the number, which ends it.
    fn accept(self, byte: u8) -> Result<Option<Num>, ErrorCode> {
        match (self, byte) {
            (Num::Minus, b'0') => Ok(Some(Num::Zero)),
            (Num::Minus, b'1'..=b'9') => Ok(Some(Num::Integer)),
            (Num::Minus, _) => Err(ErrorCode::ValueInvalid),
            (Num::Integer, b'0'..=b'9') => Ok(Some(Num::Integer)),
            (Num::Zero | Num::Integer, b'.') => Ok(Some(Num::Point)),
            (Num::Point | Num::Fraction, b'0'..=b'9') => Ok(Some(Num::Fraction)),
            (Num::Point, _) => Err(ErrorCode::NumberMissFraction),
            (Num::Zero | Num::Integer | Num::Fraction, b'e' | b'E') => Ok(Some(Num::Exponent)),
            (Num::Exponent, b'+' | b'-') => Ok(Some(Num::ExponentSign)),
            (Num::Exponent | Num::ExponentSign | Num::ExponentDigits, b'0'..=b'9') => {
                Ok(Some(Num::ExponentDigits))
            }
            (Num::Exponent | Num::ExponentSign, _) => Err(ErrorCode::NumberMissExponent),
            _ => Ok(None),
        }
    }

    /// The error for input that ends while the number is in this state.
    fn unfinished(self) -> Option<ErrorCode> {
        match self {
            Num::Minus => Some(ErrorCode::ValueInvalid),
            Num::Point => Some(ErrorCode::NumberMissFraction),
            Num::Exponent | Num::ExponentSign => Some(ErrorCode::NumberMissExponent),
            Num::Zero | Num::Integer | Num::Fraction | Num::ExponentDigits => None,
        }
    }
}

#[derive(Debug)]
struct Frame {
    object: bool,
    count: usize,
}

const fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

const fn hex_value(byte: u8) -> Option<u32> {
    match byte {
        b'0'..=b'9' => Some((byte - b'0') as u32),
        b'a'..=b'f' => Some((byte - b'a' + 10) as u32),
        b'A'..=b'F' => Some((byte - b'A' + 10) as u32),
        _ => None,
    }
}

/// A SAX-style JSON push reader driving a [`SaxHandler`].
///
/// Any JSON value is accepted as the document root. After an error the
/// reader is in an unspecified state and should be dropped.
pub struct Reader<H> {
    handler: H,
    state: State,
    /// Open containers with the number of values completed in each.
    frames: Vec<Frame>,
    /// Bytes of the string, key or number currently being read.
    scratch: Vec<u8>,
    token_start: usize,
    high_surrogate: Option<u32>,
    /// Offset of the backslash opening the current escape sequence. A
    /// surrogate pair counts as one sequence.
    escape_start: usize,
    /// Absolute offset of the first byte of the next chunk.
    consumed: usize,
    numbers: NumberMode,
}

impl<H> Reader<H> {
    /// Creates a reader that reports typed numbers.
    pub fn new(handler: H) -> Self {
        Self::with_number_mode(handler, NumberMode::Typed)
    }

    pub fn with_number_mode(handler: H, numbers: NumberMode) -> Self {
        Self {
            handler,
            state: State::Start,
            frames: Vec::new(),
            scratch: Vec::new(),
            token_start: 0,
            high_surrogate: None,
            escape_start: 0,
            consumed: 0,
            numbers,
        }
    }

    /// Number of bytes accepted so far.
    pub fn offset(&self) -> usize {
        self.consumed
    }

    /// Destroys the reader and returns the handler.
    pub fn into_handler(self) -> H {
        self.handler
    }

    /// Processes a chunk of input data.
    pub fn write<E>(&mut self, data: &[u8]) -> Result<(), ReadError<E>>
    where
        H: SaxHandler<E>,
    {
        for (local_pos, &byte) in data.iter().enumerate() {
            self.feed(byte, self.consumed + local_pos)?;
        }
        self.consumed += data.len();
        Ok(())
    }

    /// Signals the end of input. Fails unless exactly one complete root value
    /// was read.
    pub fn finish<E>(&mut self) -> Result<(), ReadError<E>>
    where
        H: SaxHandler<E>,
    {
        let end = self.consumed;
        if let State::Number(num) = self.state {
            if let Some(code) = num.unfinished() {
                return Err(ParseError { code, offset: end }.into());
            }
            self.end_number()?;
        }
        let code = match self.state {
            State::Done => return Ok(()),
            State::Start => ErrorCode::DocumentEmpty,
            State::ObjectFirst | State::ObjectKey => ErrorCode::ObjectMissName,
            State::Colon => ErrorCode::ObjectMissColon,
            State::AfterValue => self.missing_separator(),
            State::String { .. } => ErrorCode::StringMissQuotationMark,
            State::Value | State::ArrayFirst | State::Literal { .. } | State::Number(_) => {
                ErrorCode::ValueInvalid
            }
        };
        Err(ParseError { code, offset: end }.into())
    }

    /// Writes the whole document and finishes it.
    pub fn parse<E>(&mut self, data: &[u8]) -> Result<(), ReadError<E>>
    where
        H: SaxHandler<E>,
    {
        self.write(data)?;
        self.finish()
    }

    fn feed<E>(&mut self, byte: u8, pos: usize) -> Result<(), ReadError<E>>
    where
        H: SaxHandler<E>,
    {
        if let State::Number(num) = self.state {
            match num.accept(byte) {
                Ok(Some(next)) => {
                    self.scratch.push(byte);
                    self.state = State::Number(next);
                    return Ok(());
                }
                // The byte terminates the number and is then read on its own.
                Ok(None) => self.end_number()?,
                Err(code) => return ParseError::new(code, pos).map_err(ReadError::Parse),
            }
        }

        match self.state {
            State::Start | State::Value | State::ArrayFirst => self.begin_value(byte, pos),
            State::ObjectFirst | State::ObjectKey => match byte {
                b'"' => {
                    self.begin_string(true, pos);
                    Ok(())
                }
                b'}' if self.state == State::ObjectFirst => self.close(pos),
                _ if is_whitespace(byte) => Ok(()),
                _ => ParseError::new(ErrorCode::ObjectMissName, pos).map_err(ReadError::Parse),
            },
            State::Colon => match byte {
                b':' => {
                    self.state = State::Value;
                    Ok(())
                }
                _ if is_whitespace(byte) => Ok(()),
                _ => ParseError::new(ErrorCode::ObjectMissColon, pos).map_err(ReadError::Parse),
            },
            State::AfterValue => self.after_value(byte, pos),
            State::String { key, escape } => self.string_byte(key, escape, byte, pos),
            State::Literal { text, matched } => {
                if text.get(matched) != Some(&byte) {
                    return ParseError::new(ErrorCode::ValueInvalid, pos).map_err(ReadError::Parse);
                }
                if matched + 1 < text.len() {
                    self.state = State::Literal {
                        text,
                        matched: matched + 1,
                    };
                    return Ok(());
                }
                let event = match text {
                    b"true" => Event::Bool(true),
                    b"false" => Event::Bool(false),
                    _ => Event::Null,
                };
                self.handler.handle_event(event).map_err(ReadError::Handler)?;
                self.complete_value();
                Ok(())
            }
            State::Done if is_whitespace(byte) => Ok(()),
            State::Done => {
                ParseError::new(ErrorCode::DocumentRootNotSingular, pos).map_err(ReadError::Parse)
            }
            State::Number(_) => Ok(()),
        }
    }

    fn begin_value<E>(&mut self, byte: u8, pos: usize) -> Result<(), ReadError<E>>
    where
        H: SaxHandler<E>,
    {
        match byte {
            b'{' | b'[' => {
                let object = byte == b'{';
                self.frames.push(Frame { object, count: 0 });
                log::trace!("open {} at {}", if object { "object" } else { "array" }, pos);
                let (event, state) = if object {
                    (Event::StartObject, State::ObjectFirst)
                } else {
                    (Event::StartArray, State::ArrayFirst)
                };
                self.state = state;
                self.handler.handle_event(event).map_err(ReadError::Handler)
            }
            b']' if self.state == State::ArrayFirst => self.close(pos),
            b'"' => {
                self.begin_string(false, pos);
                Ok(())
            }
            b'-' | b'0'..=b'9' => {
                self.scratch.clear();
                self.scratch.push(byte);
                self.token_start = pos;
                self.state = State::Number(match byte {
                    b'-' => Num::Minus,
                    b'0' => Num::Zero,
                    _ => Num::Integer,
                });
                Ok(())
            }
            b't' | b'f' | b'n' => {
                let text: &'static [u8] = match byte {
                    b't' => b"true",
                    b'f' => b"false",
                    _ => b"null",
                };
                self.state = State::Literal { text, matched: 1 };
                Ok(())
            }
            _ if is_whitespace(byte) => Ok(()),
            _ => ParseError::new(ErrorCode::ValueInvalid, pos).map_err(ReadError::Parse),
        }
    }

    fn after_value<E>(&mut self, byte: u8, pos: usize) -> Result<(), ReadError<E>>
    where
        H: SaxHandler<E>,
    {
        let object = self.frames.last().is_some_and(|frame| frame.object);
        match byte {
            b',' => {
                self.state = if object {
                    State::ObjectKey
                } else {
                    State::Value
                };
                Ok(())
            }
            b'}' if object => self.close(pos),
            b']' if !object => self.close(pos),
            _ if is_whitespace(byte) => Ok(()),
            _ => ParseError::new(self.missing_separator(), pos).map_err(ReadError::Parse),
        }
    }

    fn missing_separator(&self) -> ErrorCode {
        if self.frames.last().is_some_and(|frame| frame.object) {
            ErrorCode::ObjectMissCommaOrCurlyBracket
        } else {
            ErrorCode::ArrayMissCommaOrSquareBracket
        }
    }

    /// Closes the innermost container. Callers have checked the bracket
    /// matches it.
    fn close<E>(&mut self, pos: usize) -> Result<(), ReadError<E>>
    where
        H: SaxHandler<E>,
    {
        let event = match self.frames.pop() {
            Some(Frame {
                object: true,
                count,
            }) => Event::EndObject(count),
            Some(Frame {
                object: false,
                count,
            }) => Event::EndArray(count),
            None => return ParseError::new(ErrorCode::ValueInvalid, pos).map_err(ReadError::Parse),
        };
        log::trace!("close {:?} at {}", event, pos);
        self.handler.handle_event(event).map_err(ReadError::Handler)?;
        self.complete_value();
        Ok(())
    }

    /// A value finished: count it in its container, or end the document.
    fn complete_value(&mut self) {
        self.state = match self.frames.last_mut() {
            Some(frame) => {
                frame.count += 1;
                State::AfterValue
            }
            None => State::Done,
        };
    }

    fn begin_string(&mut self, key: bool, pos: usize) {
        self.scratch.clear();
        self.token_start = pos;
        self.high_surrogate = None;
        self.state = State::String {
            key,
            escape: Escape::None,
        };
    }

    fn string_byte<E>(
        &mut self,
        key: bool,
        escape: Escape,
        byte: u8,
        pos: usize,
    ) -> Result<(), ReadError<E>>
    where
        H: SaxHandler<E>,
    {
        let escape = match escape {
            Escape::None => match byte {
                b'"' => return self.end_string(key, pos),
                b'\\' => {
                    self.escape_start = pos;
                    Escape::Backslash
                }
                0x00..=0x1F => {
                    return ParseError::new(ErrorCode::StringInvalidEncoding, pos)
                        .map_err(ReadError::Parse)
                }
                _ => {
                    self.scratch.push(byte);
                    Escape::None
                }
            },
            Escape::Backslash if self.high_surrogate.is_some() && byte != b'u' => {
                return ParseError::new(ErrorCode::StringUnicodeSurrogateInvalid, self.escape_start)
                    .map_err(ReadError::Parse)
            }
            Escape::Backslash => {
                let unescaped = match byte {
                    b'"' => b'"',
                    b'\\' => b'\\',
                    b'/' => b'/',
                    b'b' => 0x08,
                    b'f' => 0x0C,
                    b'n' => b'\n',
                    b'r' => b'\r',
                    b't' => b'\t',
                    b'u' => {
                        self.state = State::String {
                            key,
                            escape: Escape::Hex { digits: 0, unit: 0 },
                        };
                        return Ok(());
                    }
                    _ => {
                        return ParseError::new(ErrorCode::StringEscapeInvalid, self.escape_start)
                            .map_err(ReadError::Parse)
                    }
                };
                self.scratch.push(unescaped);
                Escape::None
            }
            Escape::Hex { digits, unit } => {
                let Some(value) = hex_value(byte) else {
                    return ParseError::new(
                        ErrorCode::StringUnicodeEscapeInvalidHex,
                        self.escape_start,
                    )
                    .map_err(ReadError::Parse);
                };
                let unit = unit * 16 + value;
                if digits < 3 {
                    Escape::Hex {
                        digits: digits + 1,
                        unit,
                    }
                } else {
                    self.push_code_unit(unit)?
                }
            }
            Escape::LowSurrogate if byte == b'\\' => Escape::Backslash,
            Escape::LowSurrogate => {
                return ParseError::new(ErrorCode::StringUnicodeSurrogateInvalid, self.escape_start)
                    .map_err(ReadError::Parse)
            }
        };
        self.state = State::String { key, escape };
        Ok(())
    }

    /// Appends a decoded `\uXXXX` unit, pairing surrogates. Errors are
    /// reported at the backslash that opened the sequence.
    fn push_code_unit(&mut self, unit: u32) -> Result<Escape, ParseError> {
        let code_point = match (self.high_surrogate.take(), unit) {
            (None, 0xD800..=0xDBFF) => {
                self.high_surrogate = Some(unit);
                return Ok(Escape::LowSurrogate);
            }
            (Some(high), 0xDC00..=0xDFFF) => 0x10000 + ((high - 0xD800) << 10) + (unit - 0xDC00),
            (Some(_), _) | (None, 0xDC00..=0xDFFF) => {
                return ParseError::new(ErrorCode::StringUnicodeSurrogateInvalid, self.escape_start)
            }
            (None, _) => unit,
        };
        let Some(ch) = char::from_u32(code_point) else {
            return ParseError::new(ErrorCode::StringUnicodeSurrogateInvalid, self.escape_start);
        };
        let mut utf8 = [0u8; 4];
        self.scratch
            .extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
        Ok(Escape::None)
    }

    fn end_string<E>(&mut self, key: bool, pos: usize) -> Result<(), ReadError<E>>
    where
        H: SaxHandler<E>,
    {
        let Ok(text) = core::str::from_utf8(&self.scratch) else {
            return ParseError::new(ErrorCode::StringInvalidEncoding, pos).map_err(ReadError::Parse);
        };
        if key {
            self.handler
                .handle_event(Event::Key(text))
                .map_err(ReadError::Handler)?;
            self.state = State::Colon;
        } else {
            self.handler
                .handle_event(Event::String(text))
                .map_err(ReadError::Handler)?;
            self.complete_value();
        }
        Ok(())
    }

    fn end_number<E>(&mut self) -> Result<(), ReadError<E>>
    where
        H: SaxHandler<E>,
    {
        // Number tokens only ever contain ASCII.
        let Ok(text) = core::str::from_utf8(&self.scratch) else {
            return ParseError::new(ErrorCode::ValueInvalid, self.token_start)
                .map_err(ReadError::Parse);
        };
        let event = match self.numbers {
            NumberMode::Raw => Event::RawNumber(text),
            NumberMode::Typed => classify(text, self.token_start)?,
        };
        self.handler.handle_event(event).map_err(ReadError::Handler)?;
        self.complete_value();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    /// Records every event as a string for easy comparison.
    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl SaxHandler<()> for Recorder {
        fn handle_event(&mut self, event: Event<'_>) -> Result<(), ()> {
            self.events.push(format!("{:?}", event));
            Ok(())
        }
    }

    fn events(input: &[u8]) -> Result<Vec<String>, ReadError<()>> {
        let mut reader = Reader::new(Recorder::default());
        reader.parse(input)?;
        Ok(reader.into_handler().events)
    }

    fn parse_error(input: &[u8]) -> ParseError {
        match events(input) {
            Err(ReadError::Parse(e)) => e,
            other => panic!("expected parse error for {:?}, got {:?}", input, other),
        }
    }

    #[test]
    fn test_object_with_counts() {
        let got = events(br#"{"a": [1, -2, true], "b": {}, "c": null}"#).unwrap();
        assert_eq!(
            got,
            [
                "StartObject",
                "Key(\"a\")",
                "StartArray",
                "Uint(1)",
                "Int(-2)",
                "Bool(true)",
                "EndArray(3)",
                "Key(\"b\")",
                "StartObject",
                "EndObject(0)",
                "Key(\"c\")",
                "Null",
                "EndObject(3)",
            ]
        );
    }

    #[test]
    fn test_scalar_roots() {
        assert_eq!(events(b"  false ").unwrap(), ["Bool(false)"]);
        assert_eq!(events(b"12").unwrap(), ["Uint(12)"]);
        assert_eq!(events(b"\"x\"").unwrap(), ["String(\"x\")"]);
        assert_eq!(events(b"[]").unwrap(), ["StartArray", "EndArray(0)"]);
    }

    #[test]
    fn test_numbers_terminated_by_brackets() {
        let got = events(b"[0,1.5e3,-0.25]").unwrap();
        assert_eq!(
            got,
            [
                "StartArray",
                "Uint(0)",
                "Double(1500.0)",
                "Double(-0.25)",
                "EndArray(3)"
            ]
        );
        let got = events(br#"{"n":7}"#).unwrap();
        assert_eq!(got, ["StartObject", "Key(\"n\")", "Uint(7)", "EndObject(1)"]);
    }

    #[test]
    fn test_raw_numbers() {
        let mut reader = Reader::with_number_mode(Recorder::default(), NumberMode::Raw);
        reader.parse::<()>(b"[1, -2.50, 3E+2]").unwrap();
        assert_eq!(
            reader.into_handler().events,
            [
                "StartArray",
                "RawNumber(\"1\")",
                "RawNumber(\"-2.50\")",
                "RawNumber(\"3E+2\")",
                "EndArray(3)"
            ]
        );
    }

    #[test]
    fn test_escapes_and_surrogates() {
        let input = r#"["a\"b\\c\/\n\t", "é\ud83d\ude00\u00E9"]"#;
        let got = events(input.as_bytes()).unwrap();
        assert_eq!(got[1], "String(\"a\\\"b\\\\c/\\n\\t\")");
        assert_eq!(got[2], format!("String({:?})", "\u{e9}\u{1F600}\u{e9}"));
    }

    #[test]
    fn test_multibyte_utf8_passthrough() {
        let input = "{\"k\u{f6}\":\"\u{4e2d}\u{6587}\"}".to_string();
        let got = events(input.as_bytes()).unwrap();
        assert_eq!(got[1], format!("Key({:?})", "k\u{f6}"));
        assert_eq!(got[2], format!("String({:?})", "\u{4e2d}\u{6587}"));
    }

    #[test]
    fn test_chunked_input_matches_whole_input() {
        let input = br#"{"title": "chunkA", "n": [12345, 6.5e-1], "t": true}"#;
        let whole = events(input).unwrap();
        for size in 1..input.len() {
            let mut reader = Reader::new(Recorder::default());
            for chunk in input.chunks(size) {
                reader.write::<()>(chunk).unwrap();
            }
            reader.finish::<()>().unwrap();
            assert_eq!(reader.into_handler().events, whole, "chunk size {}", size);
        }
    }

    #[test]
    fn test_error_offsets() {
        assert_eq!(
            parse_error(br#"{"title":"#),
            ParseError {
                code: ErrorCode::ValueInvalid,
                offset: 9
            }
        );
        assert_eq!(parse_error(b"   ").code, ErrorCode::DocumentEmpty);
        assert_eq!(
            parse_error(b"{1}"),
            ParseError {
                code: ErrorCode::ObjectMissName,
                offset: 1
            }
        );
        assert_eq!(
            parse_error(br#"{"a" 1}"#),
            ParseError {
                code: ErrorCode::ObjectMissColon,
                offset: 5
            }
        );
        assert_eq!(
            parse_error(b"[1 2]"),
            ParseError {
                code: ErrorCode::ArrayMissCommaOrSquareBracket,
                offset: 3
            }
        );
        assert_eq!(
            parse_error(b"{} x"),
            ParseError {
                code: ErrorCode::DocumentRootNotSingular,
                offset: 3
            }
        );
    }

    #[test]
    fn test_number_errors() {
        assert_eq!(parse_error(b"[1.]").code, ErrorCode::NumberMissFraction);
        assert_eq!(parse_error(b"[1e]").code, ErrorCode::NumberMissExponent);
        assert_eq!(parse_error(b"-").code, ErrorCode::ValueInvalid);
        assert_eq!(parse_error(b"[-x]").code, ErrorCode::ValueInvalid);
        assert_eq!(parse_error(b"[01]").code, ErrorCode::ArrayMissCommaOrSquareBracket);
        assert_eq!(
            parse_error(b"1e999"),
            ParseError {
                code: ErrorCode::NumberTooBig,
                offset: 0
            }
        );
    }

    #[test]
    fn test_string_errors() {
        assert_eq!(parse_error(br#""abc"#).code, ErrorCode::StringMissQuotationMark);
        assert_eq!(parse_error(br#""\x""#).code, ErrorCode::StringEscapeInvalid);
        assert_eq!(
            parse_error(br#""\u12G4""#).code,
            ErrorCode::StringUnicodeEscapeInvalidHex
        );
        assert_eq!(
            parse_error(br#""\uD800x""#).code,
            ErrorCode::StringUnicodeSurrogateInvalid
        );
        assert_eq!(
            parse_error(br#""\uDC00""#).code,
            ErrorCode::StringUnicodeSurrogateInvalid
        );
        assert_eq!(parse_error(b"\"a\x01\"").code, ErrorCode::StringInvalidEncoding);
        assert_eq!(parse_error(b"\"\xff\"").code, ErrorCode::StringInvalidEncoding);
    }

    #[test]
    fn test_escape_errors_point_at_backslash() {
        let cases: [(&[u8], ErrorCode, usize); 6] = [
            (br#"["\q"]"#, ErrorCode::StringEscapeInvalid, 2),
            (br#"["ab\u00G0"]"#, ErrorCode::StringUnicodeEscapeInvalidHex, 4),
            (br#"["\uDFFF"]"#, ErrorCode::StringUnicodeSurrogateInvalid, 2),
            // Unpaired high surrogates report the first escape.
            (br#"["x\uD800y"]"#, ErrorCode::StringUnicodeSurrogateInvalid, 3),
            (br#"["\uD800\n"]"#, ErrorCode::StringUnicodeSurrogateInvalid, 2),
            (br#"["\uD800A"]"#, ErrorCode::StringUnicodeSurrogateInvalid, 2),
        ];
        for (input, code, offset) in cases {
            assert_eq!(
                parse_error(input),
                ParseError { code, offset },
                "input {:?}",
                core::str::from_utf8(input)
            );
        }
    }

    #[test]
    fn test_escape_offset_survives_chunk_boundaries() {
        let mut reader = Reader::new(Recorder::default());
        reader.write::<()>(br#"{"k": "abc\uD8"#).unwrap();
        reader.write::<()>(br#"3D\u0"#).unwrap();
        assert_eq!(
            reader.write::<()>(b"0G"),
            Err(ReadError::Parse(ParseError {
                code: ErrorCode::StringUnicodeEscapeInvalidHex,
                offset: 10
            }))
        );
    }

    #[test]
    fn test_trailing_commas_rejected() {
        assert_eq!(parse_error(b"[1,]").code, ErrorCode::ValueInvalid);
        assert_eq!(parse_error(br#"{"a":1,}"#).code, ErrorCode::ObjectMissName);
    }

    #[test]
    fn test_handler_error_aborts() {
        struct Stop;
        impl SaxHandler<&'static str> for Stop {
            fn handle_event(&mut self, event: Event<'_>) -> Result<(), &'static str> {
                match event {
                    Event::Key(_) => Err("stop"),
                    _ => Ok(()),
                }
            }
        }
        let mut reader = Reader::new(Stop);
        assert_eq!(
            reader.parse(br#"{"a":1}"#),
            Err(ReadError::Handler("stop"))
        );
    }
}
