//! Server configuration.
//!
//! Every option is a CLI flag with an environment fallback under the
//! `UBDB__` prefix. CLI arguments override environment variables.

use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
};

use clap::{Parser, ValueEnum};
use serde::Deserialize;
use snafu::{OptionExt, ResultExt, Snafu, ensure};
use ubdb_types::config::{ConfigError as LimitsError, ValidationConfig};

const fn default_address() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

const fn default_port() -> u16 {
    9000
}

const fn default_max_concurrent() -> usize {
    100
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_max_bucket_name_bytes() -> usize {
    255
}

const fn default_max_field_bytes() -> usize {
    256
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text.
    Text,
    /// One JSON object per event.
    Json,
    /// JSON when stdout is not a terminal, text otherwise.
    #[default]
    Auto,
}

/// Command-line interface of `ubdb-server`.
#[derive(Debug, Parser)]
#[command(name = "ubdb-server", version, about = "Unique bucket name authority gRPC server")]
pub struct Cli {
    /// Server configuration.
    #[command(flatten)]
    pub config: ServerConfig,
}

/// Server configuration.
///
/// # Example
///
/// ```
/// use ubdb_server::config::ServerConfig;
///
/// let config = ServerConfig::builder().port(9443).build();
/// assert_eq!(config.listen_addr().port(), 9443);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, clap::Args, Deserialize, bon::Builder)]
pub struct ServerConfig {
    /// Listen address.
    #[arg(default_value_t = default_address(), env = "UBDB__ADDRESS")]
    #[serde(default = "default_address")]
    #[builder(default = default_address())]
    pub address: IpAddr,

    /// Listen port.
    #[arg(default_value_t = default_port(), env = "UBDB__PORT")]
    #[serde(default = "default_port")]
    #[builder(default = default_port())]
    pub port: u16,

    /// Serve over TLS. Requires `--server-cert` and `--server-key`.
    #[arg(short = 't', long, env = "UBDB__TLS")]
    #[serde(default)]
    #[builder(default)]
    pub tls: bool,

    /// CA certificate (PEM). When set with `--tls`, clients must present a
    /// certificate signed by this CA.
    #[arg(long, env = "UBDB__CA_CERT", help_heading = "TLS")]
    #[serde(default)]
    pub ca_cert: Option<PathBuf>,

    /// Server certificate chain (PEM).
    #[arg(long, env = "UBDB__SERVER_CERT", help_heading = "TLS")]
    #[serde(default)]
    pub server_cert: Option<PathBuf>,

    /// Server private key (PEM).
    #[arg(long, env = "UBDB__SERVER_KEY", help_heading = "TLS")]
    #[serde(default)]
    pub server_key: Option<PathBuf>,

    /// Enable debug logging. `RUST_LOG` takes precedence when set.
    #[arg(short = 'v', long, env = "UBDB__VERBOSE")]
    #[serde(default)]
    #[builder(default)]
    pub verbose: bool,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Auto, env = "UBDB__LOG_FORMAT")]
    #[serde(default)]
    #[builder(default)]
    pub log_format: LogFormat,

    /// Address for the Prometheus metrics endpoint. Disabled when unset.
    #[arg(long, env = "UBDB__METRICS_ADDR")]
    #[serde(default)]
    pub metrics_addr: Option<SocketAddr>,

    /// Maximum concurrent requests per connection.
    #[arg(long, default_value_t = default_max_concurrent(), env = "UBDB__MAX_CONCURRENT")]
    #[serde(default = "default_max_concurrent")]
    #[builder(default = default_max_concurrent())]
    pub max_concurrent: usize,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = default_timeout_secs(), env = "UBDB__TIMEOUT_SECS")]
    #[serde(default = "default_timeout_secs")]
    #[builder(default = default_timeout_secs())]
    pub timeout_secs: u64,

    /// Maximum bucket name size in bytes.
    #[arg(
        long,
        default_value_t = default_max_bucket_name_bytes(),
        env = "UBDB__MAX_BUCKET_NAME_BYTES",
        help_heading = "Limits"
    )]
    #[serde(default = "default_max_bucket_name_bytes")]
    #[builder(default = default_max_bucket_name_bytes())]
    pub max_bucket_name_bytes: usize,

    /// Maximum owner size in bytes.
    #[arg(
        long,
        default_value_t = default_max_field_bytes(),
        env = "UBDB__MAX_OWNER_BYTES",
        help_heading = "Limits"
    )]
    #[serde(default = "default_max_field_bytes")]
    #[builder(default = default_max_field_bytes())]
    pub max_owner_bytes: usize,

    /// Maximum cluster identifier size in bytes.
    #[arg(
        long,
        default_value_t = default_max_field_bytes(),
        env = "UBDB__MAX_CLUSTER_BYTES",
        help_heading = "Limits"
    )]
    #[serde(default = "default_max_field_bytes")]
    #[builder(default = default_max_field_bytes())]
    pub max_cluster_bytes: usize,
}

/// PEM files for serving TLS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsFiles {
    /// Server certificate chain.
    pub server_cert: PathBuf,
    /// Server private key.
    pub server_key: PathBuf,
    /// CA for verifying client certificates.
    pub ca_cert: Option<PathBuf>,
}

/// Configuration error.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ConfigError {
    /// `--tls` was given without a required file.
    #[snafu(display("TLS requires a {what} (--{flag})"))]
    MissingTlsFile {
        /// Human-readable name of the missing file.
        what: &'static str,
        /// Flag that supplies it.
        flag: &'static str,
    },

    /// A numeric option is out of range.
    #[snafu(display("invalid config: {message}"))]
    Invalid {
        /// Description of the problem.
        message: String,
    },

    /// A field limit is out of range.
    #[snafu(display("{source}"))]
    Limits {
        /// Underlying limits error.
        source: LimitsError,
    },
}

impl ServerConfig {
    /// Returns the socket address to listen on.
    #[must_use]
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }

    /// Whether the server only accepts connections from this host.
    #[must_use]
    pub fn is_localhost_only(&self) -> bool {
        self.address.is_loopback()
    }

    /// Returns the request field limits.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Limits`] if any limit is zero.
    pub fn validation_config(&self) -> Result<ValidationConfig, ConfigError> {
        ValidationConfig::builder()
            .max_bucket_name_bytes(self.max_bucket_name_bytes)
            .max_owner_bytes(self.max_owner_bytes)
            .max_cluster_bytes(self.max_cluster_bytes)
            .build()
            .context(LimitsSnafu)
    }

    /// Returns the TLS files when `--tls` is set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingTlsFile`] if `--tls` is set without a
    /// server certificate or key.
    pub fn tls_files(&self) -> Result<Option<TlsFiles>, ConfigError> {
        if !self.tls {
            return Ok(None);
        }
        let server_cert = self
            .server_cert
            .clone()
            .context(MissingTlsFileSnafu { what: "server certificate", flag: "server-cert" })?;
        let server_key = self
            .server_key
            .clone()
            .context(MissingTlsFileSnafu { what: "server key", flag: "server-key" })?;
        Ok(Some(TlsFiles { server_cert, server_key, ca_cert: self.ca_cert.clone() }))
    }

    /// Validates the whole configuration.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure!(
            self.max_concurrent > 0,
            InvalidSnafu { message: "max_concurrent must be >= 1" }
        );
        ensure!(self.timeout_secs > 0, InvalidSnafu { message: "timeout_secs must be >= 1" });
        self.validation_config()?;
        self.tls_files()?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ServerConfig {
        let argv = std::iter::once("ubdb-server").chain(args.iter().copied());
        Cli::try_parse_from(argv).unwrap().config
    }

    #[test]
    fn test_defaults_match_builder() {
        let config = ServerConfig::builder().build();
        assert_eq!(config.listen_addr(), "127.0.0.1:9000".parse().unwrap());
        assert_eq!(config.max_concurrent, 100);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.log_format, LogFormat::Auto);
        assert!(config.is_localhost_only());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_positional_address_and_port() {
        let config = parse(&["0.0.0.0", "9443"]);
        assert_eq!(config.listen_addr(), "0.0.0.0:9443".parse().unwrap());
        assert!(!config.is_localhost_only());
    }

    #[test]
    fn test_tls_requires_server_cert() {
        let config = parse(&["--tls", "--server-key", "key.pem"]);
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "TLS requires a server certificate (--server-cert)");
    }

    #[test]
    fn test_tls_requires_server_key() {
        let config = parse(&["-t", "--server-cert", "cert.pem"]);
        let err = config.tls_files().unwrap_err();
        assert_eq!(err.to_string(), "TLS requires a server key (--server-key)");
    }

    #[test]
    fn test_tls_files_with_ca() {
        let config = parse(&[
            "-t",
            "--server-cert",
            "cert.pem",
            "--server-key",
            "key.pem",
            "--ca-cert",
            "ca.pem",
        ]);
        let files = config.tls_files().unwrap().unwrap();
        assert_eq!(files.server_cert, PathBuf::from("cert.pem"));
        assert_eq!(files.server_key, PathBuf::from("key.pem"));
        assert_eq!(files.ca_cert, Some(PathBuf::from("ca.pem")));
    }

    #[test]
    fn test_cert_flags_ignored_without_tls() {
        let config = parse(&["--server-cert", "cert.pem"]);
        assert_eq!(config.tls_files().unwrap(), None);
    }

    #[test]
    fn test_limit_flags() {
        let config = parse(&["--max-bucket-name-bytes", "63", "--max-cluster-bytes", "32"]);
        let limits = config.validation_config().unwrap();
        assert_eq!(limits.max_bucket_name_bytes, 63);
        assert_eq!(limits.max_owner_bytes, 256);
        assert_eq!(limits.max_cluster_bytes, 32);
    }

    #[test]
    fn test_zero_limit_rejected() {
        let config = ServerConfig::builder().max_owner_bytes(0).build();
        assert!(matches!(config.validate(), Err(ConfigError::Limits { .. })));
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let config = ServerConfig::builder().max_concurrent(0).build();
        assert_eq!(
            config.validate().unwrap_err().to_string(),
            "invalid config: max_concurrent must be >= 1"
        );
    }

    #[test]
    fn test_log_format_flag() {
        assert_eq!(parse(&["--log-format", "json"]).log_format, LogFormat::Json);
        assert!(parse(&["-v"]).verbose);
    }
}
