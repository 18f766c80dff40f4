//! gRPC server for UBDB.
//!
//! Hosts [`UbdbServiceImpl`] behind per-connection backpressure layers,
//! optionally over TLS, until a shutdown signal arrives.

use std::{
    io,
    net::{Ipv4Addr, SocketAddr},
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use snafu::{ResultExt, Snafu};
use tokio::{net::TcpListener, sync::watch};
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::{Certificate, Identity, Server, ServerTlsConfig};
use tower::ServiceBuilder;
use tracing::info;
use ubdb_proto::proto::ubdb_service_server::UbdbServiceServer;
use ubdb_state::NameAuthority;
use ubdb_types::config::ValidationConfig;

use crate::{config::TlsFiles, metrics, services::UbdbServiceImpl};

const fn default_addr() -> SocketAddr {
    SocketAddr::new(std::net::IpAddr::V4(Ipv4Addr::LOCALHOST), 9000)
}

/// Errors from starting or running the server.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ServeError {
    /// The listen address could not be bound.
    #[snafu(display("failed to bind {addr}: {source}"))]
    Bind {
        /// Address that failed to bind.
        addr: SocketAddr,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A TLS PEM file could not be read.
    #[snafu(display("failed to read {}: {source}", path.display()))]
    ReadTlsFile {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The TLS configuration was rejected.
    #[snafu(display("invalid TLS configuration: {source}"))]
    Tls {
        /// Underlying transport error.
        source: tonic::transport::Error,
    },

    /// The server failed while running.
    #[snafu(display("transport error: {source}"))]
    Transport {
        /// Underlying transport error.
        source: tonic::transport::Error,
    },
}

/// Builds the server TLS configuration from PEM files.
///
/// When `files.ca_cert` is set, clients must present a certificate signed by
/// that CA.
///
/// # Errors
///
/// Returns [`ServeError::ReadTlsFile`] if any file cannot be read.
pub async fn load_tls_config(files: &TlsFiles) -> Result<ServerTlsConfig, ServeError> {
    let cert = read_pem(&files.server_cert).await?;
    let key = read_pem(&files.server_key).await?;
    let mut tls = ServerTlsConfig::new().identity(Identity::from_pem(cert, key));
    if let Some(ca_path) = &files.ca_cert {
        let ca = read_pem(ca_path).await?;
        tls = tls.client_ca_root(Certificate::from_pem(ca));
    }
    Ok(tls)
}

async fn read_pem(path: &Path) -> Result<Vec<u8>, ServeError> {
    tokio::fs::read(path).await.context(ReadTlsFileSnafu { path })
}

/// The UBDB gRPC server.
///
/// Supports graceful shutdown via a `shutdown_rx` watch channel.
#[derive(bon::Builder)]
pub struct UbdbServer {
    /// The authority served. Share it to observe state from outside.
    #[builder(default = Arc::new(NameAuthority::new()))]
    authority: Arc<NameAuthority>,
    /// Request field limits.
    #[builder(default)]
    validation: ValidationConfig,
    /// Listen address, used by [`UbdbServer::serve`].
    #[builder(default = default_addr())]
    addr: SocketAddr,
    /// Max concurrent requests per connection.
    #[builder(default = 100)]
    max_concurrent: usize,
    /// Request timeout in seconds.
    #[builder(default = 30)]
    timeout_secs: u64,
    /// TLS settings. Plaintext when unset.
    tls: Option<ServerTlsConfig>,
    /// Shutdown signal receiver. When `true` is sent, the server stops.
    shutdown_rx: Option<watch::Receiver<bool>>,
}

impl UbdbServer {
    /// Returns the authority this server fronts.
    #[must_use]
    pub fn authority(&self) -> &Arc<NameAuthority> {
        &self.authority
    }

    /// Binds the configured address and serves until shutdown.
    ///
    /// # Errors
    ///
    /// Returns [`ServeError::Bind`] if the address cannot be bound, or any
    /// error from [`UbdbServer::serve_with_listener`].
    pub async fn serve(self) -> Result<(), ServeError> {
        let listener = TcpListener::bind(self.addr).await.context(BindSnafu { addr: self.addr })?;
        self.serve_with_listener(listener).await
    }

    /// Serves on an already-bound listener until shutdown.
    ///
    /// Without a `shutdown_rx` this runs until the process exits.
    ///
    /// # Errors
    ///
    /// Returns [`ServeError::Tls`] if the TLS configuration is rejected, or
    /// [`ServeError::Transport`] if the server fails while running.
    pub async fn serve_with_listener(self, listener: TcpListener) -> Result<(), ServeError> {
        let local_addr = listener.local_addr().unwrap_or(self.addr);
        info!(
            max_concurrent = self.max_concurrent,
            timeout_secs = self.timeout_secs,
            "Configuring request limits"
        );

        // RateLimitLayer is not Clone, which tonic requires, so backpressure
        // comes from concurrency_limit + load_shed.
        let layer = ServiceBuilder::new()
            .concurrency_limit(self.max_concurrent)
            .load_shed()
            .timeout(Duration::from_secs(self.timeout_secs))
            .into_inner();

        metrics::set_bucket_counts(&self.authority.count_by_state());
        let service = UbdbServiceImpl::builder()
            .authority(self.authority)
            .validation(self.validation)
            .build();

        let tls_enabled = self.tls.is_some();
        let mut server = Server::builder();
        if let Some(tls) = self.tls {
            server = server.tls_config(tls).context(TlsSnafu)?;
        }
        let router = server.layer(layer).add_service(UbdbServiceServer::new(service));

        info!(addr = %local_addr, tls = tls_enabled, "Starting UBDB gRPC server");
        let incoming = TcpListenerStream::new(listener);
        let result = match self.shutdown_rx {
            Some(mut shutdown_rx) => {
                router
                    .serve_with_incoming_shutdown(incoming, async move {
                        let _ = shutdown_rx.wait_for(|v| *v).await;
                        info!("Shutdown signal received, stopping gRPC server");
                    })
                    .await
            },
            None => router.serve_with_incoming(incoming).await,
        };
        result.context(TransportSnafu)
    }
}
