//! Test harness for server integration tests.
//!
//! Starts a real [`UbdbServer`] on an ephemeral localhost port and connects
//! SDK clients to it.

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use tokio::{net::TcpListener, sync::watch, task::JoinHandle};
use ubdb_sdk::UbdbClient;
use ubdb_server::{ServeError, UbdbServer};
use ubdb_state::NameAuthority;
use ubdb_test_utils::{TestServiceConfig, assert_eventually, test_service_config};
use ubdb_types::config::ValidationConfig;

/// A running server.
pub struct TestServer {
    /// The bound address.
    pub addr: SocketAddr,
    /// The authority behind the server, for inspecting state directly.
    pub authority: Arc<NameAuthority>,
    shutdown_tx: watch::Sender<bool>,
    handle: JoinHandle<Result<(), ServeError>>,
}

impl TestServer {
    /// Starts a server with default limits.
    pub async fn start() -> Self {
        Self::start_with(ValidationConfig::default(), test_service_config()).await
    }

    /// Starts a server with the given field limits and service settings.
    pub async fn start_with(validation: ValidationConfig, service: TestServiceConfig) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        let authority = Arc::new(NameAuthority::new());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let server = UbdbServer::builder()
            .authority(Arc::clone(&authority))
            .validation(validation)
            .max_concurrent(service.max_concurrent)
            .timeout_secs(service.timeout_secs)
            .shutdown_rx(shutdown_rx)
            .build();
        let handle = tokio::spawn(server.serve_with_listener(listener));

        Self { addr, authority, shutdown_tx, handle }
    }

    /// Returns the endpoint URL.
    pub fn endpoint(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Connects a new SDK client.
    pub async fn client(&self) -> UbdbClient {
        UbdbClient::connect_to(self.endpoint()).await.expect("connect to test server")
    }

    /// Signals shutdown and waits for the server task to finish.
    pub async fn shutdown(self) -> Result<(), ServeError> {
        let _ = self.shutdown_tx.send(true);
        let finished = assert_eventually(Duration::from_secs(5), || self.handle.is_finished()).await;
        assert!(finished, "server task should exit after shutdown");
        self.handle.await.expect("server task panicked")
    }
}
