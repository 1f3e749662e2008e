use std::time::Duration;

use pep_model::{Request, Response};
use pep_protocol::{FromValue, ToValue};
use tagfmt::Encode;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::config::ClientConfig;
use crate::error::DispatchError;

/// Builds the `reqwest::Client` used for every endpoint attempt in one
/// `authorize` call. SSL validation and client identity are read from
/// `config`; the per-endpoint timeout is applied per-request instead
/// of on the client, since it is a per-endpoint, not a per-client,
/// setting (spec §4.4: "Timeout is per-endpoint, not global").
fn build_http_client(config: &ClientConfig) -> Result<reqwest::Client, DispatchError> {
    let mut builder = reqwest::Client::builder().danger_accept_invalid_certs(!config.ssl_validation());

    if let Some(identity) = config.client_identity() {
        // `Identity::from_pem` accepts a concatenated cert-chain + key
        // PEM blob and requires the `rustls-tls` backend (this workspace's
        // `reqwest` feature set); it is not available under `native-tls`.
        let mut pem = identity.certificate_chain_pem.clone();
        pem.extend_from_slice(&identity.private_key_pem);
        let identity = reqwest::Identity::from_pem(&pem).map_err(|source| DispatchError::Transport {
            endpoint: "<client identity>".to_string(),
            source,
        })?;
        builder = builder.identity(identity);
    }

    builder.build().map_err(|source| DispatchError::Transport {
        endpoint: "<client build>".to_string(),
        source,
    })
}

fn classify_reqwest_error(endpoint: &Url, timeout: Duration, err: reqwest::Error) -> DispatchError {
    if err.is_timeout() {
        DispatchError::Timeout {
            endpoint: endpoint.to_string(),
            timeout,
        }
    } else {
        DispatchError::Transport {
            endpoint: endpoint.to_string(),
            source: err,
        }
    }
}

async fn post_once(
    client: &reqwest::Client,
    endpoint: &Url,
    body: Vec<u8>,
    timeout: Duration,
) -> Result<Vec<u8>, DispatchError> {
    let response = client
        .post(endpoint.clone())
        .timeout(timeout)
        .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
        .body(body)
        .send()
        .await
        .map_err(|e| classify_reqwest_error(endpoint, timeout, e))?;

    let response = response
        .error_for_status()
        .map_err(|e| classify_reqwest_error(endpoint, timeout, e))?;

    response
        .bytes()
        .await
        .map(|b| b.to_vec())
        .map_err(|e| classify_reqwest_error(endpoint, timeout, e))
}

/// Submits `request` to the first endpoint in `config` that produces a
/// usable response, failing over through the rest in order.
///
/// Implements spec §4.4 exactly: marshal once, then try each endpoint
/// in registration order; any transport failure (DNS, connect, TLS,
/// I/O, timeout, non-2xx) or unmarshal failure continues to the next
/// endpoint with no distinction between failure classes; cancellation
/// aborts the loop (and the in-flight call) immediately.
pub async fn authorize(
    request: &Request,
    config: &ClientConfig,
    cancellation: &CancellationToken,
) -> Result<Response, DispatchError> {
    if config.endpoints().is_empty() {
        return Err(DispatchError::NoEndpoints);
    }
    request.validate()?;

    let body = request.to_value().encode_detached();
    let client = build_http_client(config)?;
    let timeout = config.timeout();

    let mut last_error: Option<DispatchError> = None;

    for endpoint in config.endpoints() {
        if cancellation.is_cancelled() {
            return Err(DispatchError::Cancelled);
        }

        let attempt = tokio::select! {
            biased;
            _ = cancellation.cancelled() => return Err(DispatchError::Cancelled),
            result = post_once(&client, endpoint, body.clone(), timeout) => result,
        };

        let bytes = match attempt {
            Ok(bytes) => bytes,
            Err(err) => {
                let message = format!("pep-client: endpoint {endpoint} failed: {err}");
                config.emit(log::Level::Warn, &message);
                last_error = Some(err);
                continue;
            }
        };

        let value = match tagfmt::decode_complete(&bytes) {
            Ok(value) => value,
            Err(err) => {
                let message = format!("pep-client: endpoint {endpoint} returned malformed TagFmt: {err}");
                config.emit(log::Level::Warn, &message);
                last_error = Some(DispatchError::UnmarshalIo(err));
                continue;
            }
        };

        match Response::from_value(&value) {
            Ok(response) => return Ok(response),
            Err(err) => {
                let message =
                    format!("pep-client: endpoint {endpoint} response did not match the expected model: {err}");
                config.emit(log::Level::Warn, &message);
                last_error = Some(DispatchError::UnmarshalModel(err));
            }
        }
    }

    Err(DispatchError::EndpointExhausted {
        last: Box::new(last_error.expect("loop runs at least once since endpoints is non-empty")),
    })
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use pep_model::{Decision, PolicyResult};
    use tokio::net::TcpListener;

    use super::*;

    async fn spawn_server(
        responder: impl Fn() -> hyper_response::Reply + Send + Sync + 'static,
    ) -> SocketAddr {
        // Minimal hand-rolled HTTP/1.1 responder over a raw TCP loopback
        // socket, matching how the teacher's own tokio client/server
        // demos talk to each other without pulling in a full server
        // framework for tests.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let responder = std::sync::Arc::new(responder);
        tokio::spawn(async move {
            loop {
                let (socket, _) = match listener.accept().await {
                    Ok(pair) => pair,
                    Err(_) => return,
                };
                let responder = responder.clone();
                tokio::spawn(hyper_response::serve_one(socket, responder()));
            }
        });
        addr
    }

    mod hyper_response {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpStream;

        pub enum Reply {
            Status(u16),
            Body(Vec<u8>),
            Hang,
        }

        pub async fn serve_one(mut socket: TcpStream, reply: Reply) {
            let mut buf = [0u8; 4096];
            // Drain the request (we don't need to parse it for these tests).
            let _ = socket.read(&mut buf).await;

            match reply {
                Reply::Hang => {
                    std::future::pending::<()>().await;
                }
                Reply::Status(code) => {
                    let reason = if code == 503 { "Service Unavailable" } else { "Error" };
                    let response = format!("HTTP/1.1 {code} {reason}\r\ncontent-length: 0\r\n\r\n");
                    let _ = socket.write_all(response.as_bytes()).await;
                }
                Reply::Body(body) => {
                    let header = format!(
                        "HTTP/1.1 200 OK\r\ncontent-length: {}\r\n\r\n",
                        body.len()
                    );
                    let _ = socket.write_all(header.as_bytes()).await;
                    let _ = socket.write_all(&body).await;
                }
            }
        }
    }

    fn permit_response_bytes() -> Vec<u8> {
        let mut result = PolicyResult::new(Decision::Permit, "res1");
        result.set_status(None);
        let mut response = pep_model::Response::new();
        response.add_result(result);
        response.to_value().encode_detached()
    }

    #[tokio::test]
    async fn s4_failover_to_third_endpoint() {
        let a = spawn_server(|| hyper_response::Reply::Status(503)).await;
        let b = spawn_server(|| hyper_response::Reply::Hang).await;
        let c_body = permit_response_bytes();
        let c = spawn_server(move || hyper_response::Reply::Body(c_body.clone())).await;

        let config = ClientConfig::new()
            .with_endpoint(&format!("http://{a}/"))
            .unwrap()
            .with_endpoint(&format!("http://{b}/"))
            .unwrap()
            .with_endpoint(&format!("http://{c}/"))
            .unwrap()
            .with_timeout(Duration::from_millis(200))
            .unwrap();

        let request = Request::new();
        let cancellation = CancellationToken::new();

        let response = authorize(&request, &config, &cancellation).await.unwrap();
        assert_eq!(response.results()[0].decision(), Decision::Permit);
    }

    #[tokio::test]
    async fn s5_exhaustion_returns_endpoint_exhausted() {
        let a = spawn_server(|| hyper_response::Reply::Status(500)).await;
        let b = spawn_server(|| hyper_response::Reply::Status(500)).await;

        let config = ClientConfig::new()
            .with_endpoint(&format!("http://{a}/"))
            .unwrap()
            .with_endpoint(&format!("http://{b}/"))
            .unwrap()
            .with_timeout(Duration::from_millis(200))
            .unwrap();

        let request = Request::new();
        let cancellation = CancellationToken::new();

        let err = authorize(&request, &config, &cancellation).await.unwrap_err();
        assert!(matches!(err, DispatchError::EndpointExhausted { .. }));
    }

    #[tokio::test]
    async fn s6_cancellation_short_circuits_before_second_endpoint() {
        let a = spawn_server(|| hyper_response::Reply::Hang).await;
        let b = spawn_server(|| hyper_response::Reply::Status(503)).await;

        let config = ClientConfig::new()
            .with_endpoint(&format!("http://{a}/"))
            .unwrap()
            .with_endpoint(&format!("http://{b}/"))
            .unwrap()
            .with_timeout(Duration::from_secs(30))
            .unwrap();

        let request = Request::new();
        let cancellation = CancellationToken::new();
        let cancel_handle = cancellation.clone();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            cancel_handle.cancel();
        });

        let started = std::time::Instant::now();
        let err = authorize(&request, &config, &cancellation).await.unwrap_err();
        assert!(started.elapsed() < Duration::from_millis(500));
        assert!(matches!(err, DispatchError::Cancelled));
    }
}
