//! Small helpers shared by this crate's and `pep-protocol`'s tests.
//!
//! Kept public (rather than `#[cfg(test)]`-only) so the model
//! marshaller's own test suite can reuse the same known-answer
//! assertions without duplicating them.

use crate::decode::decode_complete;
use crate::encode::Encode;
use crate::value::Value;

/// Asserts `value` encodes to exactly `expected_bytes` and that
/// decoding those bytes back produces `value` unchanged.
pub fn assert_known_answer(value: &Value, expected_bytes: &[u8]) {
    let encoded = value.encode_detached();
    assert_eq!(
        encoded, expected_bytes,
        "encoding did not match expected bytes"
    );
    let decoded = decode_complete(expected_bytes).expect("known-answer bytes must decode");
    assert_eq!(&decoded, value, "decoding expected bytes did not reproduce value");
}

/// Asserts `value` survives an encode/decode round trip unchanged.
pub fn assert_roundtrips(value: &Value) {
    let encoded = value.encode_detached();
    let decoded = decode_complete(&encoded).expect("round trip decode");
    assert_eq!(&decoded, value);
}
