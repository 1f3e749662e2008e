//! Round-trip helpers shared by this crate's own tests and, if needed,
//! a downstream integration test. Mirrors `tagfmt::testing`'s shape.

use tagfmt::{Encode, Value};

use crate::error::ProtocolError;
use crate::marshal::ToValue;
use crate::unmarshal::FromValue;

/// Asserts `entity` survives `to_value` followed by `from_value`
/// unchanged (Testable Property 1, "Round-trip").
pub fn assert_model_roundtrips<T>(entity: &T)
where
    T: ToValue + FromValue + PartialEq + std::fmt::Debug,
{
    let value = entity.to_value();
    let decoded = T::from_value(&value).expect("round trip from_value");
    assert_eq!(&decoded, entity);
}

/// Asserts `entity` survives a full wire round trip: `to_value`,
/// TagFmt-encode, TagFmt-decode, `from_value`.
pub fn assert_wire_roundtrips<T>(entity: &T)
where
    T: ToValue + FromValue + PartialEq + std::fmt::Debug,
{
    let bytes = entity.to_value().encode_detached();
    let value = tagfmt::decode_complete(&bytes).expect("tagfmt decode");
    let decoded = T::from_value(&value).expect("from_value");
    assert_eq!(&decoded, entity);
}

/// Inserts an extra, unrecognized key into a typed map's entries and
/// asserts `from_value` still succeeds and still reproduces `entity`
/// (Testable Property 3, "Unknown-key tolerance").
pub fn assert_tolerates_unknown_key<T>(entity: &T)
where
    T: ToValue + FromValue + PartialEq + std::fmt::Debug,
{
    let value = entity.to_value();
    let with_extra = match value {
        Value::Map { type_tag, mut entries } => {
            entries.push((Value::string("x-future-field"), Value::string("ignored")));
            Value::Map { type_tag, entries }
        }
        other => other,
    };
    let decoded = T::from_value(&with_extra).expect("unknown key must not fail decode");
    assert_eq!(&decoded, entity);
}

/// Re-exported for callers that want to assert the failure shape of a
/// deliberately malformed [`Value`].
pub type DecodeResult<T> = Result<T, ProtocolError>;
