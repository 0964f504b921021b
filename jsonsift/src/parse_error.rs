// SPDX-License-Identifier: Apache-2.0

/// Kinds of malformed input detected by the [`Reader`](crate::Reader).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// The input contained nothing but whitespace.
    DocumentEmpty,
    /// Non-whitespace content followed the root value.
    DocumentRootNotSingular,
    /// A value was expected but something else was found.
    ValueInvalid,
    /// An object member name was expected.
    ObjectMissName,
    /// A colon was expected after an object member name.
    ObjectMissColon,
    /// A comma or `}` was expected after an object member.
    ObjectMissCommaOrCurlyBracket,
    /// A comma or `]` was expected after an array element.
    ArrayMissCommaOrSquareBracket,
    /// A `\u` escape contained something other than four hex digits.
    StringUnicodeEscapeInvalidHex,
    /// A `\u` escape produced an unpaired or misordered UTF-16 surrogate.
    StringUnicodeSurrogateInvalid,
    /// An unknown character followed a backslash.
    StringEscapeInvalid,
    /// The input ended inside a string.
    StringMissQuotationMark,
    /// A string contained invalid UTF-8 or an unescaped control character.
    StringInvalidEncoding,
    /// A number does not fit in a finite `f64`.
    NumberTooBig,
    /// A decimal point was not followed by a digit.
    NumberMissFraction,
    /// An exponent marker was not followed by a digit.
    NumberMissExponent,
}

impl ErrorCode {
    /// English description of the error.
    pub const fn description(&self) -> &'static str {
        match self {
            ErrorCode::DocumentEmpty => "The document is empty.",
            ErrorCode::DocumentRootNotSingular => {
                "The document root must not be followed by other values."
            }
            ErrorCode::ValueInvalid => "Invalid value.",
            ErrorCode::ObjectMissName => "Missing a name for object member.",
            ErrorCode::ObjectMissColon => "Missing a colon after a name of object member.",
            ErrorCode::ObjectMissCommaOrCurlyBracket => {
                "Missing a comma or '}' after an object member."
            }
            ErrorCode::ArrayMissCommaOrSquareBracket => {
                "Missing a comma or ']' after an array element."
            }
            ErrorCode::StringUnicodeEscapeInvalidHex => {
                "Incorrect hex digit after \\u escape in string."
            }
            ErrorCode::StringUnicodeSurrogateInvalid => "The surrogate pair in string is invalid.",
            ErrorCode::StringEscapeInvalid => "Invalid escape character in string.",
            ErrorCode::StringMissQuotationMark => "Missing a closing quotation mark in string.",
            ErrorCode::StringInvalidEncoding => "Invalid encoding in string.",
            ErrorCode::NumberTooBig => "Number too big to be stored in double.",
            ErrorCode::NumberMissFraction => "Miss fraction part in number.",
            ErrorCode::NumberMissExponent => "Miss exponent in number.",
        }
    }
}

/// A syntax error: what went wrong and the byte offset where it was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseError {
    pub code: ErrorCode,
    pub offset: usize,
}

impl ParseError {
    pub fn new<T>(code: ErrorCode, offset: usize) -> Result<T, Self> {
        Err(Self { code, offset })
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ({})", self.code.description(), self.offset)
    }
}
