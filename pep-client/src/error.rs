use thiserror::Error;

/// Failure setting up a [`crate::config::ClientConfig`] (spec
/// `OPTION_INVALID` / `ENDPOINT_URL` kinds, narrowed to the two setters
/// that validate at runtime).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid endpoint URL '{0}': {1}")]
    InvalidUrl(String, #[source] url::ParseError),
    #[error("endpoint timeout must be positive, got {0:?}")]
    InvalidTimeout(std::time::Duration),
}

/// Failure from [`crate::facade::PepClient::authorize`].
///
/// Mirrors the spec §7 taxonomy: `Marshal`/`UnmarshalIo`/`UnmarshalModel`
/// wrap the lower-layer codec/model-marshaller errors, while
/// `Transport`/`Timeout`/`EndpointExhausted`/`Cancelled` are produced by
/// the dispatch loop itself.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("request failed structural validation: {0}")]
    InvalidRequest(#[from] pep_model::ValidationError),

    #[error("failed to marshal request")]
    Marshal,

    #[error("response was not a well-formed TagFmt stream: {0}")]
    UnmarshalIo(#[from] tagfmt::DecodeError),

    #[error("response did not match the expected model: {0}")]
    UnmarshalModel(#[from] pep_protocol::ProtocolError),

    #[error("transport failure contacting endpoint {endpoint}: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("endpoint {endpoint} exceeded its {timeout:?} timeout")]
    Timeout {
        endpoint: String,
        timeout: std::time::Duration,
    },

    #[error("all endpoints failed; last cause: {last}")]
    EndpointExhausted {
        #[source]
        last: Box<DispatchError>,
    },

    #[error("authorize was cancelled")]
    Cancelled,

    #[error("no endpoints configured")]
    NoEndpoints,
}
