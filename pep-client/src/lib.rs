//! Dispatch engine and client facade for the Argus PEP authorization
//! client: submits a [`pep_model::Request`] to an ordered set of PDP
//! endpoints with sequential failover, returning a decoded
//! [`pep_model::Response`] or a typed error.
//!
//! Transport is `reqwest` over `tokio`; cancellation is cooperative via
//! `tokio_util::sync::CancellationToken`. The codec and model layers
//! (`tagfmt`, `pep-model`, `pep-protocol`) are synchronous and carry no
//! async runtime dependency of their own.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod facade;

pub use config::{ClientConfig, ClientIdentity};
pub use error::{ConfigError, DispatchError};
pub use facade::PepClient;
