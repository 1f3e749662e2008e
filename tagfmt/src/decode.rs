use nom::number::complete::{be_i32, be_u16};

use crate::error::DecodeError;
use crate::value::Value;

const TAG_NULL: u8 = b'N';
const TAG_INTEGER: u8 = b'I';
const TAG_STRING_FINAL: u8 = b'S';
const TAG_STRING_CHUNK: u8 = b's';
const TAG_LIST_START: u8 = b'V';
const TAG_LIST_LENGTH: u8 = b'l';
const TAG_MAP_START: u8 = b'M';
const TAG_REFERENCE: u8 = b'R';
const TAG_CONTAINER_END: u8 = b'z';

/// Mirrors the `Decoder` trait pattern used by this codec's IMAP
/// counterpart: implementors consume a prefix of `input` and return
/// the unconsumed remainder alongside the parsed value, so a caller
/// streaming multiple values off one connection can feed the
/// remainder back in on the next read.
pub trait Decoder {
    type Output;

    fn decode<'a>(&self, input: &'a [u8]) -> Result<(&'a [u8], Self::Output), DecodeError>;
}

/// The only [`Decoder`] this crate ships: decodes one [`Value`] of any
/// shape from the front of the input.
#[derive(Debug, Default, Clone, Copy)]
pub struct ValueCodec;

impl Decoder for ValueCodec {
    type Output = Value;

    fn decode<'a>(&self, input: &'a [u8]) -> Result<(&'a [u8], Value), DecodeError> {
        decode_value(input)
    }
}

/// Decodes a single [`Value`] and asserts no trailing bytes remain.
/// The convenience entry point for decoding one complete message body.
pub fn decode_complete(input: &[u8]) -> Result<Value, DecodeError> {
    let (rest, value) = decode_value(input)?;
    if !rest.is_empty() {
        return Err(DecodeError::TrailingData(rest.len()));
    }
    Ok(value)
}

fn next_byte(input: &[u8]) -> Result<(u8, &[u8]), DecodeError> {
    input
        .split_first()
        .map(|(b, rest)| (*b, rest))
        .ok_or(DecodeError::Incomplete)
}

fn expect_be_i32(input: &[u8]) -> Result<(&[u8], i32), DecodeError> {
    let (rest, v) = be_i32::<_, nom::error::Error<&[u8]>>(input).map_err(|_| DecodeError::Incomplete)?;
    Ok((rest, v))
}

fn expect_be_u16(input: &[u8]) -> Result<(&[u8], u16), DecodeError> {
    let (rest, v) = be_u16::<_, nom::error::Error<&[u8]>>(input).map_err(|_| DecodeError::Incomplete)?;
    Ok((rest, v))
}

fn decode_value(input: &[u8]) -> Result<(&[u8], Value), DecodeError> {
    let (tag, rest) = next_byte(input)?;
    match tag {
        TAG_NULL => Ok((rest, Value::Null)),
        TAG_INTEGER => {
            let (rest, v) = expect_be_i32(rest)?;
            Ok((rest, Value::Integer(v)))
        }
        TAG_STRING_FINAL | TAG_STRING_CHUNK => decode_string(input),
        TAG_LIST_START => decode_list(rest),
        TAG_MAP_START => decode_map(rest),
        TAG_REFERENCE => Err(DecodeError::UnsupportedReference),
        other => Err(DecodeError::UnknownTag(other)),
    }
}

/// Decodes a (possibly chunked) string starting at the first `S`/`s` tag.
fn decode_string(input: &[u8]) -> Result<(&[u8], Value), DecodeError> {
    let mut input = input;
    let mut out = String::new();
    loop {
        let (tag, rest) = next_byte(input)?;
        if tag != TAG_STRING_FINAL && tag != TAG_STRING_CHUNK {
            return Err(DecodeError::UnknownTag(tag));
        }
        let (rest, unit_count) = expect_be_u16(rest)?;
        let (rest, consumed) = take_utf16_units(rest, unit_count)?;
        out.push_str(consumed);
        input = rest;
        if tag == TAG_STRING_FINAL {
            return Ok((input, Value::String(out)));
        }
    }
}

/// Consumes exactly `units` UTF-16 code units worth of characters from
/// the front of `input`, returning the decoded `&str` slice and the
/// remaining bytes. `input` must be a valid UTF-8 prefix at each
/// character boundary; this holds because this codec only ever writes
/// well-formed UTF-8 chunks.
fn take_utf16_units(input: &[u8], units: u16) -> Result<(&[u8], &str), DecodeError> {
    let mut consumed_bytes = 0usize;
    let mut consumed_units = 0u32;
    let target = units as u32;

    while consumed_units < target {
        let first = *input.get(consumed_bytes).ok_or(DecodeError::Incomplete)?;
        let char_len = utf8_char_len(first);
        let end = consumed_bytes + char_len;
        let slice = input.get(consumed_bytes..end).ok_or(DecodeError::Incomplete)?;
        let s = std::str::from_utf8(slice).map_err(|_| DecodeError::InvalidUtf8)?;
        let ch = s.chars().next().ok_or(DecodeError::InvalidUtf8)?;
        consumed_units += ch.len_utf16() as u32;
        consumed_bytes = end;
    }

    if consumed_units != target {
        // A character straddled the requested unit count; the chunk
        // boundary chosen by the encoder never splits a surrogate pair,
        // so this indicates a malformed stream.
        return Err(DecodeError::InvalidUtf8);
    }

    let text = std::str::from_utf8(&input[..consumed_bytes]).map_err(|_| DecodeError::InvalidUtf8)?;
    Ok((&input[consumed_bytes..], text))
}

fn utf8_char_len(first_byte: u8) -> usize {
    if first_byte & 0x80 == 0 {
        1
    } else if first_byte & 0xE0 == 0xC0 {
        2
    } else if first_byte & 0xF0 == 0xE0 {
        3
    } else if first_byte & 0xF8 == 0xF0 {
        4
    } else {
        1
    }
}

/// Decodes a list body (`input` positioned right after the `V` tag).
///
/// This decoder does not support the element-type header Hessian-family
/// formats allow on typed lists: neither this codec's own marshaller
/// nor the original PEP client/server pair this wire format mirrors
/// ever emits one, and a generic decoder cannot otherwise distinguish
/// a type header from a first string element. See `DESIGN.md`.
fn decode_list(mut input: &[u8]) -> Result<(&[u8], Value), DecodeError> {
    let mut length_hint = None;
    if let Ok((tag, rest)) = next_byte(input) {
        if tag == TAG_LIST_LENGTH {
            let (rest, len) = expect_be_i32(rest)?;
            length_hint = Some(len);
            input = rest;
        }
    }

    let mut items = Vec::new();
    loop {
        let (tag, _) = next_byte(input)?;
        if tag == TAG_CONTAINER_END {
            let (_, rest) = next_byte(input)?;
            input = rest;
            break;
        }
        let (rest, item) = decode_value(input)?;
        items.push(item);
        input = rest;
    }

    Ok((input, Value::List { length_hint, items }))
}

/// Decodes a map body (`input` positioned right after the `M` tag).
///
/// A type header, when present, is an ordinary TagFmt string
/// immediately following the `M` tag. Every map this protocol carries
/// is typed, so this decoder always treats a leading string as the
/// type header; see `DESIGN.md` for the same ambiguity noted on lists.
fn decode_map(mut input: &[u8]) -> Result<(&[u8], Value), DecodeError> {
    let mut type_tag = None;
    if let Ok((tag, _)) = next_byte(input) {
        if tag == TAG_STRING_FINAL || tag == TAG_STRING_CHUNK {
            let (rest, value) = decode_string(input)?;
            if let Value::String(s) = value {
                type_tag = Some(s);
            }
            input = rest;
        }
    }

    let mut entries = Vec::new();
    loop {
        let (tag, _) = next_byte(input)?;
        if tag == TAG_CONTAINER_END {
            let (_, rest) = next_byte(input)?;
            input = rest;
            break;
        }
        let (rest, key) = decode_value(input)?;
        let (rest, value) = decode_value(rest)?;
        entries.push((key, value));
        input = rest;
    }

    Ok((input, Value::Map { type_tag, entries }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::Encode;

    fn roundtrip(v: Value) {
        let bytes = v.encode_detached();
        let decoded = decode_complete(&bytes).expect("decode");
        assert_eq!(decoded, v);
    }

    #[test]
    fn roundtrips_primitives() {
        roundtrip(Value::Null);
        roundtrip(Value::Integer(42));
        roundtrip(Value::Integer(-7));
        roundtrip(Value::string(""));
        roundtrip(Value::string("hello, world"));
    }

    #[test]
    fn roundtrips_nested_structures() {
        roundtrip(Value::list(vec![Value::string("a"), Value::string("b")]));
        roundtrip(Value::typed_map(
            "org.glite.authz.xacml.ctx.Attribute",
            vec![
                (Value::string("id"), Value::string("role")),
                (Value::string("value"), Value::Null),
            ],
        ));
    }

    #[test]
    fn roundtrips_multibyte_utf8() {
        roundtrip(Value::string("héllo \u{1F600} wörld"));
    }

    #[test]
    fn chunks_long_strings_and_reassembles() {
        let long = "x".repeat(70_000);
        let bytes = Value::string(&long).encode_detached();
        // Must have produced more than one chunk.
        assert!(bytes.iter().filter(|&&b| b == b's').count() >= 1);
        let decoded = decode_complete(&bytes).unwrap();
        assert_eq!(decoded, Value::string(&long));
    }

    #[test]
    fn rejects_unknown_tag() {
        assert_eq!(decode_complete(&[0xFF]), Err(DecodeError::UnknownTag(0xFF)));
    }

    #[test]
    fn rejects_back_reference_tag() {
        assert_eq!(
            decode_complete(&[TAG_REFERENCE, 0, 0, 0, 0]),
            Err(DecodeError::UnsupportedReference)
        );
    }

    #[test]
    fn rejects_trailing_data() {
        let mut bytes = Value::Null.encode_detached();
        bytes.push(b'N');
        assert_eq!(decode_complete(&bytes), Err(DecodeError::TrailingData(1)));
    }

    #[test]
    fn rejects_truncated_input() {
        assert_eq!(decode_complete(&[b'I', 0, 0]), Err(DecodeError::Incomplete));
        assert_eq!(decode_complete(&[b'V']), Err(DecodeError::Incomplete));
    }
}
