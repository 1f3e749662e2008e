//! Bridges `pep-model`'s object model to `tagfmt`'s wire values.
//!
//! Translation is pure and stateless: [`marshal::ToValue::to_value`]
//! never fails (every model value has a representable encoding) and
//! [`unmarshal::FromValue::from_value`] returns a [`ProtocolError`]
//! describing exactly which class tag, key, or value type was
//! unexpected.

pub mod error;
pub mod marshal;
pub mod tags;
pub mod testing;
pub mod unmarshal;

pub use error::ProtocolError;
pub use marshal::ToValue;
pub use unmarshal::FromValue;
