use pep_model::{Request, Response};
use tokio_util::sync::CancellationToken;

use crate::config::ClientConfig;
use crate::dispatch::authorize;
use crate::error::DispatchError;

/// Process-wide handle holding configuration and exposing the single
/// `authorize` operation (spec §4.5).
///
/// Multiple independent handles are allowed and may run concurrent
/// `authorize` calls; `PepClient` is `Send + Sync` and carries no
/// interior mutability beyond what `reqwest::Client`'s own connection
/// pool already provides. There is no explicit `destroy()`: releasing
/// resources on scope exit is `Drop`'s job in safe Rust (a deliberate,
/// documented deviation from the original `pep_destroy` call — see
/// `DESIGN.md`).
#[derive(Debug, Clone)]
pub struct PepClient {
    config: ClientConfig,
}

impl PepClient {
    /// Returns a handle with the spec §4.5 defaults: empty endpoint
    /// list, 30 s timeout, SSL validation enabled, log level WARN, no
    /// log sink.
    pub fn new(config: ClientConfig) -> Self {
        PepClient { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Runs the dispatch engine for `request` against the configured
    /// endpoints in order, observing `cancellation` between (and,
    /// where the transport supports it, during) endpoint attempts.
    pub async fn authorize(
        &self,
        request: &Request,
        cancellation: &CancellationToken,
    ) -> Result<Response, DispatchError> {
        authorize(request, &self.config, cancellation).await
    }

    /// Convenience form for callers that don't need cancellation.
    pub async fn authorize_uncancellable(&self, request: &Request) -> Result<Response, DispatchError> {
        self.authorize(request, &CancellationToken::new()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_with_no_endpoints_configured() {
        let client = PepClient::new(ClientConfig::new());
        let err = client.authorize_uncancellable(&Request::new()).await.unwrap_err();
        assert!(matches!(err, DispatchError::NoEndpoints));
    }

    #[test]
    fn config_accessor_reflects_constructor_argument() {
        let config = ClientConfig::new().with_endpoint("https://pdp.example/authz").unwrap();
        let client = PepClient::new(config.clone());
        assert_eq!(client.config().endpoints(), config.endpoints());
    }
}
