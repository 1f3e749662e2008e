//! Owned object model for Argus PEP authorization requests and
//! responses.
//!
//! Every entity here is a plain value type: construction returns an
//! owned value, `add_*`/push operations take ownership of their
//! argument, and there is no separate "handle" indirection layer —
//! Rust's move semantics already give the deep-ownership, single-owner
//! lifecycle the original C API expressed with manual create/destroy
//! pairs.
//!
//! This crate knows nothing about the wire format; `pep-protocol`
//! bridges these types to [`tagfmt::Value`](../tagfmt/index.html).

pub mod action;
pub mod attribute;
pub mod attribute_assignment;
pub mod environment;
pub mod obligation;
pub mod request;
pub mod resource;
pub mod response;
pub mod result;
pub mod status;
pub mod status_code;
pub mod subject;
pub mod validate;

pub use action::Action;
pub use attribute::Attribute;
pub use attribute_assignment::AttributeAssignment;
pub use environment::Environment;
pub use obligation::{FulfillOn, Obligation};
pub use request::Request;
pub use resource::Resource;
pub use response::Response;
pub use result::{Decision, InvalidDecision, PolicyResult};
pub use status::Status;
pub use status_code::StatusCode;
pub use subject::Subject;
pub use validate::ValidationError;
