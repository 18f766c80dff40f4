//! Channel construction.
//!
//! Builds a tonic [`Channel`] from a [`ClientConfig`]: endpoint parsing,
//! timeouts, keepalive, and TLS.

use std::time::Duration;

use snafu::ResultExt;
use tonic::transport::{Certificate, Channel, ClientTlsConfig, Endpoint, Identity};

use crate::{
    config::{ClientConfig, TlsConfig},
    error::{InvalidUrlSnafu, Result, TransportSnafu},
};

/// HTTP/2 keep-alive interval for idle connections.
const HTTP2_KEEPALIVE_INTERVAL: Duration = Duration::from_secs(30);

/// HTTP/2 keep-alive timeout.
const HTTP2_KEEPALIVE_TIMEOUT: Duration = Duration::from_secs(10);

/// TCP keepalive interval.
const TCP_KEEPALIVE_INTERVAL: Duration = Duration::from_secs(60);

/// Parses the endpoint and applies every configured setting.
///
/// # Errors
///
/// Returns [`SdkError::InvalidUrl`](crate::SdkError::InvalidUrl) if tonic
/// rejects the URL, or [`SdkError::Transport`](crate::SdkError::Transport)
/// if the TLS settings are rejected.
pub(crate) fn configure_endpoint(config: &ClientConfig) -> Result<Endpoint> {
    let endpoint = Endpoint::from_shared(config.endpoint.clone()).map_err(|e| {
        InvalidUrlSnafu { url: config.endpoint.as_str(), message: e.to_string() }.build()
    })?;

    let endpoint = endpoint
        .connect_timeout(config.connect_timeout)
        .timeout(config.timeout)
        .tcp_nodelay(true)
        .tcp_keepalive(Some(TCP_KEEPALIVE_INTERVAL))
        .http2_keep_alive_interval(HTTP2_KEEPALIVE_INTERVAL)
        .keep_alive_timeout(HTTP2_KEEPALIVE_TIMEOUT)
        .keep_alive_while_idle(true);

    match &config.tls {
        Some(tls) => endpoint.tls_config(client_tls_config(tls)).context(TransportSnafu),
        None => Ok(endpoint),
    }
}

fn client_tls_config(tls: &TlsConfig) -> ClientTlsConfig {
    let mut client_tls = ClientTlsConfig::new();
    if let Some(ca) = tls.ca_cert() {
        client_tls = client_tls.ca_certificate(Certificate::from_pem(ca));
    }
    if let (Some(cert), Some(key)) = (tls.client_cert(), tls.client_key()) {
        client_tls = client_tls.identity(Identity::from_pem(cert, key));
    }
    if let Some(domain) = tls.domain_name() {
        client_tls = client_tls.domain_name(domain);
    }
    client_tls
}

/// Connects to the configured endpoint.
///
/// # Errors
///
/// Returns an error if the endpoint is invalid or the connection cannot be
/// established within the connect timeout.
pub(crate) async fn connect(config: &ClientConfig) -> Result<Channel> {
    let endpoint = configure_endpoint(config)?;
    endpoint.connect().await.context(TransportSnafu)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::SdkError;

    fn config(endpoint: &str) -> ClientConfig {
        ClientConfig::builder().with_endpoint(endpoint).build().expect("valid test config")
    }

    #[test]
    fn test_configure_endpoint_keeps_uri() {
        let cfg = ClientConfig::builder()
            .with_endpoint("http://127.0.0.1:9000")
            .with_timeout(Duration::from_secs(3))
            .build()
            .unwrap();
        let endpoint = configure_endpoint(&cfg).unwrap();
        assert!(endpoint.uri().to_string().starts_with("http://127.0.0.1:9000"));
    }

    #[tokio::test]
    async fn test_connect_refused_is_transport_error() {
        // Bind then drop to get a port nothing listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = connect(&config(&format!("http://{addr}"))).await.unwrap_err();
        assert!(matches!(err, SdkError::Transport { .. }));
        assert!(err.is_retryable());
    }
}
