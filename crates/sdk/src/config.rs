//! Client configuration with builder pattern.
//!
//! Provides type-safe configuration for SDK clients including:
//! - Endpoint URL
//! - Timeouts
//! - TLS (server verification and optional client certificate)

use std::time::Duration;

use snafu::{OptionExt, ensure};

use crate::error::{ConfigSnafu, InvalidUrlSnafu, Result};

/// Default request timeout (30 seconds).
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connection timeout (5 seconds).
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for the UBDB SDK client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server endpoint URL (e.g., `http://127.0.0.1:9000`).
    pub(crate) endpoint: String,

    /// Request timeout.
    pub(crate) timeout: Duration,

    /// Connection establishment timeout.
    pub(crate) connect_timeout: Duration,

    /// TLS configuration for secure connections.
    pub(crate) tls: Option<TlsConfig>,
}

impl ClientConfig {
    /// Creates a new configuration builder.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Returns the configured endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the connection timeout.
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Returns the TLS configuration if enabled.
    #[must_use]
    pub fn tls(&self) -> Option<&TlsConfig> {
        self.tls.as_ref()
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    endpoint: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    tls: Option<TlsConfig>,
}

impl ClientConfigBuilder {
    /// Sets the server endpoint URL.
    ///
    /// Must be an `http://` or `https://` URL.
    #[must_use]
    pub fn with_endpoint<S: Into<String>>(mut self, endpoint: S) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sets the request timeout.
    ///
    /// Default: 30 seconds.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection establishment timeout.
    ///
    /// Default: 5 seconds.
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets the TLS configuration for secure connections.
    ///
    /// When TLS is enabled, the endpoint must use an `https://` URL.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use ubdb_sdk::{ClientConfig, TlsConfig};
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let ca = std::fs::read("/path/to/ca.pem")?;
    /// let config = ClientConfig::builder()
    ///     .with_endpoint("https://ubdb.example.com:9443")
    ///     .with_tls(TlsConfig::new().with_ca_cert_pem_bytes(ca))
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn with_tls(mut self, tls: TlsConfig) -> Self {
        self.tls = Some(tls);
        self
    }

    /// Builds the configuration, validating all settings.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No endpoint provided, or the URL is invalid
    /// - Timeout or connect timeout is zero
    /// - TLS is set with a plain `http://` endpoint
    /// - The TLS configuration is invalid (see [`TlsConfig::validate`])
    pub fn build(self) -> Result<ClientConfig> {
        let endpoint = self.endpoint.context(ConfigSnafu { message: "endpoint is required" })?;
        validate_url(&endpoint)?;

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        ensure!(!timeout.is_zero(), ConfigSnafu { message: "timeout cannot be zero" });

        let connect_timeout = self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT);
        ensure!(
            !connect_timeout.is_zero(),
            ConfigSnafu { message: "connect_timeout cannot be zero" }
        );

        if let Some(ref tls) = self.tls {
            tls.validate()?;
            ensure!(
                endpoint.starts_with("https://"),
                InvalidUrlSnafu { url: endpoint.as_str(), message: "TLS requires an https:// URL" }
            );
        }

        Ok(ClientConfig { endpoint, timeout, connect_timeout, tls: self.tls })
    }
}

/// Validates that a URL is well-formed HTTP(S).
fn validate_url(url: &str) -> Result<()> {
    let Some(rest) = url.strip_prefix("http://").or_else(|| url.strip_prefix("https://")) else {
        return InvalidUrlSnafu { url, message: "URL must start with http:// or https://" }.fail();
    };

    if rest.is_empty() {
        return InvalidUrlSnafu { url, message: "URL must have a host" }.fail();
    }

    if rest.contains(char::is_whitespace) {
        return InvalidUrlSnafu { url, message: "URL cannot contain whitespace" }.fail();
    }

    Ok(())
}

/// TLS configuration for secure connections.
///
/// The server certificate is verified against the configured CA. A client
/// certificate is only needed when the server verifies clients.
///
/// # Example
///
/// ```no_run
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// use ubdb_sdk::TlsConfig;
///
/// let tls = TlsConfig::new()
///     .with_ca_cert_pem_bytes(std::fs::read("ca.pem")?)
///     .with_client_cert_pem_bytes(std::fs::read("client.pem")?, std::fs::read("client.key")?)
///     .with_domain_name("ubdb.internal");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct TlsConfig {
    /// PEM CA certificate for server verification.
    ca_cert: Option<Vec<u8>>,

    /// PEM client certificate for mutual TLS.
    client_cert: Option<Vec<u8>>,

    /// PEM client private key for mutual TLS.
    client_key: Option<Vec<u8>>,

    /// Domain name to verify against server certificate.
    /// If not set, the hostname from the endpoint URL is used.
    domain_name: Option<String>,
}

impl TlsConfig {
    /// Creates a new TLS configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the CA certificate from PEM bytes.
    #[must_use]
    pub fn with_ca_cert_pem_bytes(mut self, pem: impl AsRef<[u8]>) -> Self {
        self.ca_cert = Some(pem.as_ref().to_vec());
        self
    }

    /// Sets the client certificate and key from PEM bytes for mutual TLS.
    #[must_use]
    pub fn with_client_cert_pem_bytes(
        mut self,
        cert: impl AsRef<[u8]>,
        key: impl AsRef<[u8]>,
    ) -> Self {
        self.client_cert = Some(cert.as_ref().to_vec());
        self.client_key = Some(key.as_ref().to_vec());
        self
    }

    /// Sets the domain name for server certificate verification.
    ///
    /// Use this when the server's certificate CN/SAN doesn't match
    /// the hostname used in the endpoint URL.
    #[must_use]
    pub fn with_domain_name(mut self, domain: impl Into<String>) -> Self {
        self.domain_name = Some(domain.into());
        self
    }

    /// Returns the CA certificate if configured.
    #[must_use]
    pub fn ca_cert(&self) -> Option<&[u8]> {
        self.ca_cert.as_deref()
    }

    /// Returns the client certificate if configured.
    #[must_use]
    pub fn client_cert(&self) -> Option<&[u8]> {
        self.client_cert.as_deref()
    }

    /// Returns the client private key if configured.
    #[must_use]
    pub fn client_key(&self) -> Option<&[u8]> {
        self.client_key.as_deref()
    }

    /// Returns the domain name override if configured.
    #[must_use]
    pub fn domain_name(&self) -> Option<&str> {
        self.domain_name.as_deref()
    }

    /// Validates the TLS configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No CA certificate is configured
    /// - A client certificate is set without a key, or the reverse
    pub fn validate(&self) -> Result<()> {
        ensure!(self.ca_cert.is_some(), ConfigSnafu { message: "TLS requires a CA certificate" });
        ensure!(
            self.client_cert.is_some() == self.client_key.is_some(),
            ConfigSnafu { message: "client certificate requires a private key" }
        );
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::SdkError;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::builder().with_endpoint("http://127.0.0.1:9000").build().unwrap();
        assert_eq!(config.endpoint(), "http://127.0.0.1:9000");
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
        assert_eq!(config.connect_timeout(), DEFAULT_CONNECT_TIMEOUT);
        assert!(config.tls().is_none());
    }

    #[test]
    fn test_endpoint_required() {
        let err = ClientConfig::builder().build().unwrap_err();
        assert!(matches!(err, SdkError::Config { .. }));
    }

    #[test]
    fn test_invalid_urls() {
        for url in ["127.0.0.1:9000", "http://", "http://local host:9000"] {
            let err = ClientConfig::builder().with_endpoint(url).build().unwrap_err();
            assert!(matches!(err, SdkError::InvalidUrl { .. }), "{url}");
        }
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = ClientConfig::builder()
            .with_endpoint("http://127.0.0.1:9000")
            .with_timeout(Duration::ZERO)
            .build()
            .unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: timeout cannot be zero");
    }

    #[test]
    fn test_tls_requires_ca() {
        let err = ClientConfig::builder()
            .with_endpoint("https://127.0.0.1:9000")
            .with_tls(TlsConfig::new())
            .build()
            .unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: TLS requires a CA certificate");
    }

    #[test]
    fn test_tls_requires_https() {
        let err = ClientConfig::builder()
            .with_endpoint("http://127.0.0.1:9000")
            .with_tls(TlsConfig::new().with_ca_cert_pem_bytes(b"ca"))
            .build()
            .unwrap_err();
        assert!(matches!(err, SdkError::InvalidUrl { .. }));
    }

    #[test]
    fn test_tls_config_accessors() {
        let tls = TlsConfig::new()
            .with_ca_cert_pem_bytes(b"ca")
            .with_client_cert_pem_bytes(b"cert", b"key")
            .with_domain_name("ubdb.internal");
        assert!(tls.validate().is_ok());
        assert_eq!(tls.ca_cert(), Some(&b"ca"[..]));
        assert_eq!(tls.client_cert(), Some(&b"cert"[..]));
        assert_eq!(tls.client_key(), Some(&b"key"[..]));
        assert_eq!(tls.domain_name(), Some("ubdb.internal"));

        let config = ClientConfig::builder()
            .with_endpoint("https://ubdb.internal:9443")
            .with_tls(tls)
            .build()
            .unwrap();
        assert!(config.tls().is_some());
    }
}
