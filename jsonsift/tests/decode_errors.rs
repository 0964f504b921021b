// SPDX-License-Identifier: Apache-2.0

// Failure reporting of the decode entry points
use jsonsift::{
    decode, decode_to_message, decode_with, DecodeError, Decoder, ErrorCode, FieldFilter,
    HostInt, ParseError, ResourceError, ValueSink,
};
use test_log::test;

fn syntax_error(input: &[u8]) -> ParseError {
    match decode(input, &FieldFilter::new(["a", "title"])) {
        Err(DecodeError::Syntax(e)) => e,
        other => panic!("expected a syntax error for {:?}, got {:?}", input, other),
    }
}

mod malformed {
    use super::*;
    use test_log::test;

    macro_rules! generate_malformed_tests {
        ($($name:ident: $input:expr => $code:ident @ $offset:expr),* $(,)?) => {
            $(
                paste::paste! {
                    #[test]
                    fn [<test_malformed_ $name>]() {
                        assert_eq!(
                            syntax_error($input),
                            ParseError { code: ErrorCode::$code, offset: $offset },
                            "input {:?}",
                            core::str::from_utf8($input)
                        );
                    }
                }
            )*
        };
    }

    generate_malformed_tests!(
        empty: b"" => DocumentEmpty @ 0,
        whitespace_only: b" \n\t" => DocumentEmpty @ 3,
        truncated_value: br#"{"title":"# => ValueInvalid @ 9,
        missing_colon: br#"{"title" "A"}"# => ObjectMissColon @ 9,
        missing_comma: br#"{"a":1 "b":2}"# => ObjectMissCommaOrCurlyBracket @ 7,
        wrong_close: br#"{"a":[1,2}"# => ArrayMissCommaOrSquareBracket @ 9,
        bad_literal: br#"{"a":tru}"# => ValueInvalid @ 8,
        bad_escape: br#"{"a":"\q"}"# => StringEscapeInvalid @ 6,
        bad_hex: br#"{"a":"\u00G0"}"# => StringUnicodeEscapeInvalidHex @ 6,
        lone_low_surrogate: br#"{"a":"\uDFFF"}"# => StringUnicodeSurrogateInvalid @ 6,
        unpaired_high_surrogate: br#"{"a":"\uD800\u0041"}"# => StringUnicodeSurrogateInvalid @ 6,
        missing_fraction: br#"{"a":1.}"# => NumberMissFraction @ 7,
        missing_exponent: br#"{"a":1e+}"# => NumberMissExponent @ 8,
        number_too_big: br#"{"a":1e400}"# => NumberTooBig @ 5,
        unterminated_string: br#"{"a":"x"# => StringMissQuotationMark @ 7,
        second_root: br#"{"a":1}{}"# => DocumentRootNotSingular @ 7,
        missing_name: br#"{,}"# => ObjectMissName @ 1,
        error_in_skipped_field: br#"{"skip":{"a" 1},"title":"x"}"# => ObjectMissColon @ 13,
        invalid_utf8_in_skipped_field: b"{\"skip\":\"\xff\",\"a\":1}" => StringInvalidEncoding @ 10,
    );
}

#[test]
fn test_truncated_document_message() {
    let filter = FieldFilter::default();
    let (record, message) = decode_to_message(br#"{"title":"#, &filter);
    assert!(record.is_none());
    assert_eq!(message.as_deref(), Some("Invalid value. (9)"));
}

#[test]
fn test_escape_error_message_points_at_backslash() {
    let filter = FieldFilter::new(["a"]);
    let (record, message) = decode_to_message(br#"{"a":"ok\q"}"#, &filter);
    assert!(record.is_none());
    assert_eq!(
        message.as_deref(),
        Some("Invalid escape character in string. (8)")
    );
}

#[test]
fn test_message_on_success_is_none() {
    let filter = FieldFilter::default();
    let (record, message) = decode_to_message(br#"{"title":"A","x":1}"#, &filter);
    assert!(message.is_none());
    assert_eq!(record.map(|r| r.to_string()).as_deref(), Some(r#"{"title":"A"}"#));
}

#[test]
fn test_non_object_roots_have_no_record() {
    let filter = FieldFilter::new(["title"]);
    for input in [
        &br#"[{"title":"A"}]"#[..],
        br#""title""#,
        b"42",
        b"null",
        b"[]",
    ] {
        assert_eq!(
            decode(input, &filter),
            Err(DecodeError::NotAnObject),
            "input {:?}",
            core::str::from_utf8(input)
        );
    }
    let (_, message) = decode_to_message(b"[1]", &filter);
    assert_eq!(
        message.as_deref(),
        Some("the document root is not an object")
    );
}

#[test]
fn test_trailing_garbage_discards_record() {
    let filter = FieldFilter::new(["title"]);
    let (record, message) = decode_to_message(br#"{"title":"A"} x"#, &filter);
    assert!(record.is_none());
    assert_eq!(
        message.as_deref(),
        Some("The document root must not be followed by other values. (14)")
    );
}

#[test]
fn test_retained_depth_limit() {
    let filter = FieldFilter::new(["tags"]);
    let result = Decoder::new(&filter)
        .max_depth(2)
        .decode(br#"{"tags":[[1]]}"#);
    assert_eq!(
        result,
        Err(DecodeError::Resource(ResourceError::DepthLimit { limit: 2 }))
    );
}

#[test]
fn test_skipped_nesting_ignores_depth_limit() {
    let filter = FieldFilter::new(["tags"]);
    let record = Decoder::new(&filter)
        .max_depth(2)
        .decode(br#"{"other":[[[[{"deep":[1]}]]]],"tags":[1]}"#)
        .unwrap();
    assert_eq!(record.to_string(), r#"{"tags":[1]}"#);
}

#[test]
fn test_stream_error_offset_is_absolute() {
    let filter = FieldFilter::new(["title"]);
    let mut decoder = Decoder::new(&filter);
    let mut stream = decoder.stream(jsonsift::ValueBuilder);
    stream.write(br#"{"title":"#).unwrap();
    assert_eq!(
        stream.write(br#""A" "B"}"#),
        Err(DecodeError::Syntax(ParseError {
            code: ErrorCode::ObjectMissCommaOrCurlyBracket,
            offset: 13
        }))
    );
}

#[test]
fn test_truncated_stream_fails_at_finish() {
    let filter = FieldFilter::new(["title"]);
    let mut decoder = Decoder::new(&filter);
    let mut stream = decoder.stream(jsonsift::ValueBuilder);
    stream.write(br#"{"title":"A""#).unwrap();
    assert_eq!(
        stream.finish(),
        Err(DecodeError::Syntax(ParseError {
            code: ErrorCode::ObjectMissCommaOrCurlyBracket,
            offset: 12
        }))
    );
}

/// A sink with no room for arrays.
struct NoArrays;

impl ValueSink for NoArrays {
    type Value = ();
    type Object = ();
    type Array = ();

    fn null(&mut self) {}
    fn boolean(&mut self, _: bool) {}
    fn integer(&mut self, _: HostInt) {}
    fn float(&mut self, _: f64) {}
    fn string(&mut self, _: &str) -> Result<(), ResourceError> {
        Ok(())
    }
    fn new_object(&mut self, _: usize) -> Result<(), ResourceError> {
        Ok(())
    }
    fn new_array(&mut self) -> Result<(), ResourceError> {
        Err(ResourceError::Alloc)
    }
    fn insert(&mut self, _: &mut (), _: String, _: ()) -> Result<(), ResourceError> {
        Ok(())
    }
    fn append(&mut self, _: &mut (), _: usize, _: ()) -> Result<(), ResourceError> {
        Ok(())
    }
    fn finish_object(&mut self, _: ()) {}
    fn finish_array(&mut self, _: ()) {}
}

#[test]
fn test_sink_allocation_failure_is_resource_error() {
    let filter = FieldFilter::new(["tags"]);
    assert_eq!(
        decode_with(br#"{"skip":[1],"title":"A"}"#, &filter, NoArrays),
        Ok(())
    );
    assert_eq!(
        decode_with(br#"{"tags":["x"]}"#, &filter, NoArrays),
        Err(DecodeError::Resource(ResourceError::Alloc))
    );
}
