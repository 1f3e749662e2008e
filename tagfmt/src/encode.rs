use std::io::Write;

use crate::error::EncodeError;
use crate::value::Value;

const TAG_NULL: u8 = b'N';
const TAG_INTEGER: u8 = b'I';
const TAG_STRING_FINAL: u8 = b'S';
const TAG_STRING_CHUNK: u8 = b's';
const TAG_LIST_START: u8 = b'V';
const TAG_LIST_LENGTH: u8 = b'l';
const TAG_MAP_START: u8 = b'M';
const TAG_CONTAINER_END: u8 = b'z';

/// The longest run of UTF-16 code units a single string chunk may carry.
const MAX_CHUNK_UNITS: usize = 0xFFFF;

/// Types that can be written out as TagFmt wire bytes.
///
/// Mirrors the `Encode` trait used throughout the IMAP object model:
/// encoding never fails except on writer I/O, so callers that just want
/// a `Vec<u8>` can use [`Encode::encode_detached`] and ignore errors.
pub trait Encode {
    fn encode(&self, writer: &mut impl Write) -> Result<(), EncodeError>;

    fn encode_detached(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.encode(&mut buf).expect("Vec<u8> writes are infallible");
        buf
    }
}

impl Encode for Value {
    fn encode(&self, writer: &mut impl Write) -> Result<(), EncodeError> {
        match self {
            Value::Null => {
                writer.write_all(&[TAG_NULL])?;
                Ok(())
            }
            Value::Integer(v) => {
                writer.write_all(&[TAG_INTEGER])?;
                writer.write_all(&v.to_be_bytes())?;
                Ok(())
            }
            Value::String(s) => encode_string(s, writer),
            Value::List { length_hint, items } => {
                writer.write_all(&[TAG_LIST_START])?;
                if let Some(len) = length_hint {
                    writer.write_all(&[TAG_LIST_LENGTH])?;
                    writer.write_all(&len.to_be_bytes())?;
                }
                for item in items {
                    item.encode(writer)?;
                }
                writer.write_all(&[TAG_CONTAINER_END])?;
                Ok(())
            }
            Value::Map { type_tag, entries } => {
                writer.write_all(&[TAG_MAP_START])?;
                if let Some(tag) = type_tag {
                    encode_string(tag, writer)?;
                }
                for (k, v) in entries {
                    k.encode(writer)?;
                    v.encode(writer)?;
                }
                writer.write_all(&[TAG_CONTAINER_END])?;
                Ok(())
            }
        }
    }
}

/// Writes `s` as one or more `S`/`s` chunks, chunked on UTF-16 code unit
/// counts per the wire grammar (a chunk may hold at most 0xFFFF units).
fn encode_string(s: &str, writer: &mut impl Write) -> Result<(), EncodeError> {
    let mut chars = s.chars().peekable();
    if chars.peek().is_none() {
        writer.write_all(&[TAG_STRING_FINAL])?;
        writer.write_all(&0u16.to_be_bytes())?;
        return Ok(());
    }

    let mut chunk = String::new();
    let mut units = 0usize;
    let mut pending: Vec<(String, usize)> = Vec::new();

    for ch in chars {
        let ch_units = ch.len_utf16();
        if units + ch_units > MAX_CHUNK_UNITS {
            pending.push((std::mem::take(&mut chunk), units));
            units = 0;
        }
        chunk.push(ch);
        units += ch_units;
    }
    pending.push((chunk, units));

    let last = pending.len() - 1;
    for (idx, (text, unit_count)) in pending.into_iter().enumerate() {
        let tag = if idx == last { TAG_STRING_FINAL } else { TAG_STRING_CHUNK };
        writer.write_all(&[tag])?;
        writer.write_all(&(unit_count as u16).to_be_bytes())?;
        writer.write_all(text.as_bytes())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_null() {
        assert_eq!(Value::Null.encode_detached(), vec![b'N']);
    }

    #[test]
    fn encodes_integer_big_endian() {
        assert_eq!(
            Value::Integer(1).encode_detached(),
            vec![b'I', 0x00, 0x00, 0x00, 0x01]
        );
        assert_eq!(
            Value::Integer(-1).encode_detached(),
            vec![b'I', 0xff, 0xff, 0xff, 0xff]
        );
    }

    #[test]
    fn encodes_short_string_as_single_final_chunk() {
        let bytes = Value::string("hi").encode_detached();
        assert_eq!(bytes, [&[b'S', 0x00, 0x02][..], b"hi"].concat());
    }

    #[test]
    fn encodes_empty_list() {
        assert_eq!(Value::list(vec![]).encode_detached(), vec![b'V', b'z']);
    }

    #[test]
    fn encodes_typed_empty_map() {
        let v = Value::typed_map("org.glite.authz.xacml.ctx.Null", vec![]);
        let bytes = v.encode_detached();
        assert_eq!(bytes[0], b'M');
        assert_eq!(*bytes.last().unwrap(), b'z');
    }
}
