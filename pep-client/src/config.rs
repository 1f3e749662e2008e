use std::sync::Arc;
use std::time::Duration;

use log::{Level, LevelFilter};
use url::Url;

use crate::error::ConfigError;

/// Client certificate identity for mutual-TLS authentication to the PDP.
///
/// `certificate_chain_pem` and `private_key_pem` are concatenated and
/// passed to `reqwest::Identity::from_pem`, which requires an
/// unencrypted PKCS#8 private key (no password-protected key support;
/// neither `reqwest`'s rustls nor native-tls identity constructors
/// accept one).
#[derive(Clone)]
pub struct ClientIdentity {
    pub certificate_chain_pem: Vec<u8>,
    pub private_key_pem: Vec<u8>,
}

impl std::fmt::Debug for ClientIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientIdentity")
            .field("certificate_chain_pem", &format_args!("<{} bytes>", self.certificate_chain_pem.len()))
            .field("private_key_pem", &"<redacted>")
            .finish()
    }
}

type LogSink = Arc<dyn Fn(Level, &str) + Send + Sync>;

/// Process-wide configuration for a [`crate::facade::PepClient`] handle.
///
/// Defaults match spec §4.5: empty endpoint list, 30 s per-endpoint
/// timeout, SSL validation enabled, log level WARN, no log sink.
/// `log_level` gates both the `log` crate's global logger and the
/// optional `log_sink` callback for every message `dispatch::authorize`
/// emits through [`ClientConfig::emit`]; `log_sink` itself is an
/// additional delivery path kept for parity with the original facade's
/// `log_handler` option, not a replacement for the `log` crate.
#[derive(Clone, Default)]
pub struct ClientConfig {
    endpoints: Vec<Url>,
    timeout: Option<Duration>,
    ssl_validation: Option<bool>,
    client_identity: Option<ClientIdentity>,
    log_level: Option<LevelFilter>,
    log_sink: Option<LogSink>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoints", &self.endpoints)
            .field("timeout", &self.timeout())
            .field("ssl_validation", &self.ssl_validation())
            .field("client_identity", &self.client_identity)
            .field("log_level", &self.log_level())
            .field("log_sink", &self.log_sink.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

impl ClientConfig {
    pub fn new() -> Self {
        ClientConfig::default()
    }

    /// Appends a PDP endpoint URL. Endpoints are tried in the order
    /// they were added (spec §4.4's failover ordering).
    pub fn with_endpoint(mut self, url: &str) -> Result<Self, ConfigError> {
        let parsed = Url::parse(url).map_err(|e| ConfigError::InvalidUrl(url.to_string(), e))?;
        self.endpoints.push(parsed);
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ConfigError> {
        if timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(timeout));
        }
        self.timeout = Some(timeout);
        Ok(self)
    }

    pub fn with_ssl_validation(mut self, enabled: bool) -> Self {
        self.ssl_validation = Some(enabled);
        self
    }

    pub fn with_client_identity(mut self, identity: ClientIdentity) -> Self {
        self.client_identity = Some(identity);
        self
    }

    pub fn with_log_level(mut self, level: LevelFilter) -> Self {
        self.log_level = Some(level);
        self
    }

    pub fn with_log_sink(mut self, sink: impl Fn(Level, &str) + Send + Sync + 'static) -> Self {
        self.log_sink = Some(Arc::new(sink));
        self
    }

    pub fn endpoints(&self) -> &[Url] {
        &self.endpoints
    }

    pub fn timeout(&self) -> Duration {
        self.timeout.unwrap_or(DEFAULT_TIMEOUT)
    }

    pub fn ssl_validation(&self) -> bool {
        self.ssl_validation.unwrap_or(true)
    }

    pub fn client_identity(&self) -> Option<&ClientIdentity> {
        self.client_identity.as_ref()
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level.unwrap_or(LevelFilter::Warn)
    }

    /// Emits one message through the configured log sink, gated by
    /// `log_level()`: messages above the configured filter (e.g. a
    /// `Warn`-level message when `log_level()` is `Error`) reach
    /// neither the sink nor the `log` crate's global logger. No-op
    /// when no sink was configured, regardless of level.
    pub fn emit(&self, level: Level, message: &str) {
        if level > self.log_level() {
            return;
        }
        log::log!(level, "{message}");
        if let Some(sink) = &self.log_sink {
            sink(level, message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec() {
        let config = ClientConfig::new();
        assert!(config.endpoints().is_empty());
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
        assert!(config.ssl_validation());
        assert_eq!(config.log_level(), LevelFilter::Warn);
    }

    #[test]
    fn endpoints_preserve_registration_order() {
        let config = ClientConfig::new()
            .with_endpoint("https://a.example/authz")
            .unwrap()
            .with_endpoint("https://b.example/authz")
            .unwrap();
        let urls: Vec<_> = config.endpoints().iter().map(Url::as_str).collect();
        assert_eq!(urls, ["https://a.example/authz", "https://b.example/authz"]);
    }

    #[test]
    fn rejects_malformed_url() {
        assert!(ClientConfig::new().with_endpoint("not a url").is_err());
    }

    #[test]
    fn rejects_zero_timeout() {
        assert!(ClientConfig::new().with_timeout(Duration::ZERO).is_err());
    }
}
