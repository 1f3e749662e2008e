use thiserror::Error;

/// Failure while turning a [`crate::Value`] tree into wire bytes.
///
/// Encoding is infallible for every `Value` this crate can construct;
/// this error only exists to be returned by [`crate::Encode::encode`]
/// when the underlying writer itself fails (e.g. writing into a
/// size-bounded buffer).
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("failed to write encoded bytes: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure while decoding a byte slice into a [`crate::Value`].
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum DecodeError {
    /// The input ended before a complete value could be read.
    #[error("unexpected end of input while decoding")]
    Incomplete,

    /// A tag byte was encountered that does not correspond to any
    /// known TagFmt value type.
    #[error("unrecognized tag byte 0x{0:02x}")]
    UnknownTag(u8),

    /// A string chunk claimed to be valid UTF-8 but was not.
    #[error("invalid UTF-8 in string payload")]
    InvalidUtf8,

    /// This decoder does not support TagFmt back-references (the `R`
    /// tag some Hessian-family encoders emit for shared object graphs).
    /// The PEP wire protocol never produces cyclic or shared object
    /// graphs, so this is a deliberate scope limitation rather than a
    /// bug; see `DESIGN.md`.
    #[error("back-references are not supported by this decoder")]
    UnsupportedReference,

    /// Trailing bytes remained after a top-level value was fully decoded.
    #[error("{0} trailing byte(s) after a complete value")]
    TrailingData(usize),
}
