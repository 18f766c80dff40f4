//! UBDB server binary.
//!
//! Runs the bucket name authority as a gRPC service.
//!
//! # Usage
//!
//! ```bash
//! # Listen on the default 127.0.0.1:9000
//! ubdb-server
//!
//! # Listen on all interfaces with mutual TLS
//! ubdb-server 0.0.0.0 9443 --tls \
//!     --server-cert server.pem --server-key server.key --ca-cert ca.pem
//!
//! # CLI arguments override environment variables
//! UBDB__PORT=9100 ubdb-server --verbose
//! ```

use std::{io::IsTerminal, net::SocketAddr};

use clap::Parser;
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use ubdb_server::{
    ServeError, UbdbServer,
    config::{Cli, ConfigError, LogFormat, ServerConfig},
    load_tls_config, metrics,
    shutdown::{shutdown_channel, shutdown_signal},
};

/// Top-level error type for the server binary.
#[derive(Debug)]
enum ServerError {
    Config(ConfigError),
    Metrics(String),
    Serve(ServeError),
}

impl std::fmt::Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServerError::Config(e) => write!(f, "configuration error: {}", e),
            ServerError::Metrics(e) => write!(f, "metrics error: {}", e),
            ServerError::Serve(e) => write!(f, "server error: {}", e),
        }
    }
}

impl std::error::Error for ServerError {}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    // Parse CLI args and env vars (clap handles --help and --version)
    let config = Cli::parse().config;

    init_logging(&config);

    config.validate().map_err(ServerError::Config)?;
    let validation = config.validation_config().map_err(ServerError::Config)?;
    let tls = match config.tls_files().map_err(ServerError::Config)? {
        Some(files) => Some(load_tls_config(&files).await.map_err(ServerError::Serve)?),
        None => None,
    };

    tracing::info!(
        listen_addr = %config.listen_addr(),
        tls = config.tls,
        mutual_tls = config.tls && config.ca_cert.is_some(),
        "Starting UBDB"
    );

    if config.is_localhost_only() {
        tracing::warn!(
            "Listening on localhost only. Remote connections will be rejected. \
             Pass an address or set UBDB__ADDRESS to accept remote connections."
        );
    }

    if let Some(metrics_addr) = config.metrics_addr {
        init_metrics_exporter(metrics_addr)?;
    }

    let server = UbdbServer::builder()
        .addr(config.listen_addr())
        .validation(validation)
        .max_concurrent(config.max_concurrent)
        .timeout_secs(config.timeout_secs)
        .maybe_tls(tls)
        .shutdown_rx(shutdown_channel(shutdown_signal()))
        .build();

    tracing::info!("Server ready, accepting connections");
    server.serve().await.map_err(ServerError::Serve)?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the logging system based on configuration.
///
/// `--verbose` lowers the default level to `debug`. `RUST_LOG` overrides
/// both.
fn init_logging(config: &ServerConfig) {
    let default_level = if config.verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let use_json = match config.log_format {
        LogFormat::Json => true,
        LogFormat::Text => false,
        LogFormat::Auto => !std::io::stdout().is_terminal(),
    };

    if use_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().flatten_event(true).with_current_span(false))
            .init();
    } else {
        tracing_subscriber::registry().with(env_filter).with(fmt::layer()).init();
    }
}

/// Initializes the Prometheus metrics exporter.
///
/// Starts an HTTP server that exposes metrics at `/metrics`.
fn init_metrics_exporter(addr: SocketAddr) -> Result<(), ServerError> {
    let builder = PrometheusBuilder::new()
        .with_http_listener(addr)
        .set_buckets(&metrics::REQUEST_HISTOGRAM_BUCKETS)
        .map_err(|e| ServerError::Metrics(format!("failed to configure histogram buckets: {e}")))?;

    builder
        .install()
        .map_err(|e| ServerError::Metrics(format!("failed to install Prometheus exporter: {e}")))?;

    tracing::info!(metrics_addr = %addr, "Prometheus metrics exporter started");
    Ok(())
}
