//! TagFmt: the self-describing tagged binary codec the Argus PEP
//! client/server pair uses on the wire.
//!
//! A TagFmt stream is a sequence of tagged values with no external
//! schema: the tag byte alone tells a reader what follows.
//!
//! ```text
//! null    ::= 'N'
//! integer ::= 'I' i32-be
//! string  ::= ('s' u16-be utf8-bytes)* 'S' u16-be utf8-bytes
//! list    ::= 'V' ('l' i32-be)? value* 'z'
//! map     ::= 'M' string? (value value)* 'z'
//! ```
//!
//! `string` chunk lengths count UTF-16 code units, not bytes, matching
//! the original Hessian-derived wire format this protocol predates its
//! Rust port from. `list`/`map` type headers are written as plain
//! strings with no distinguishing tag of their own; see `DESIGN.md` for
//! how this crate resolves the resulting grammar ambiguity.
//!
//! This crate only knows about the untyped [`Value`] tree. Interpreting
//! a `Value` as a particular PEP entity (`Request`, `Response`, ...) is
//! the job of the `pep-protocol` crate's model marshaller.

mod decode;
mod encode;
mod error;
mod value;

pub mod testing;

pub use decode::{decode_complete, Decoder, ValueCodec};
pub use encode::Encode;
pub use error::{DecodeError, EncodeError};
pub use value::{Pairs, Value};
