//! Mock gRPC server for SDK testing.
//!
//! A controllable stand-in for the UBDB service, for testing code built on
//! the SDK without running the real authority.
//!
//! # Features
//!
//! - **Request recording**: every call is recorded as a [`MockCall`]
//! - **Failure injection**: queue authority errors (with packed details) or
//!   `UNAVAILABLE` for the next requests
//!
//! By default every request succeeds.
//!
//! # Example
//!
//! ```no_run
//! use ubdb_sdk::{UbdbClient, mock::MockUbdbServer};
//! use ubdb_types::ErrorCode;
//!
//! # async fn example() -> ubdb_sdk::Result<()> {
//! let server = MockUbdbServer::start().await?;
//! server.inject_authority_error(ErrorCode::BucketNotFound, "bucket 'b1' not found");
//!
//! let client = UbdbClient::connect_to(server.endpoint()).await?;
//! let err = client.delete_bucket("b1", "c1").await.unwrap_err();
//! assert_eq!(err.error_code(), Some(ErrorCode::BucketNotFound));
//! # Ok(())
//! # }
//! ```

use std::{
    collections::VecDeque,
    net::SocketAddr,
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicUsize, Ordering},
    },
};

use tokio::sync::oneshot;
use tonic::{Code, Request, Response, Status, transport::Server};
use ubdb_proto::{
    proto::{
        AddBucketEntryRequest, AddBucketEntryResponse, DeleteBucketEntryRequest,
        DeleteBucketEntryResponse, ErrorDetails, S3ErrorDetails, UpdateBucketEntryRequest,
        UpdateBucketEntryResponse,
        ubdb_service_server::{UbdbService, UbdbServiceServer},
    },
    status::RpcStatus,
};
use ubdb_types::ErrorCode;

use crate::error::{ConnectionSnafu, Result};

/// A request received by the mock server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    /// `AddBucketEntry`.
    Add {
        /// Bucket name.
        bucket: String,
        /// Owner principal.
        owner: String,
        /// Cluster identifier.
        cluster: String,
    },
    /// `DeleteBucketEntry`.
    Delete {
        /// Bucket name.
        bucket: String,
        /// Cluster identifier.
        cluster: String,
    },
    /// `UpdateBucketEntry`, with the raw wire state.
    Update {
        /// Bucket name.
        bucket: String,
        /// Cluster identifier.
        cluster: String,
        /// Raw `BucketState` number.
        state: i32,
    },
}

/// Shared state for the mock server.
#[derive(Debug, Default)]
struct MockState {
    /// Requests in arrival order.
    calls: Mutex<Vec<MockCall>>,

    /// Failures returned by the next requests, front first.
    failures: Mutex<VecDeque<Status>>,

    /// Total requests received.
    request_count: AtomicUsize,
}

impl MockState {
    fn record(&self, call: MockCall) -> std::result::Result<(), Status> {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).push(call);
        match self.failures.lock().unwrap_or_else(PoisonError::into_inner).pop_front() {
            Some(status) => Err(status),
            None => Ok(()),
        }
    }

    fn push_failure(&self, status: Status) {
        self.failures.lock().unwrap_or_else(PoisonError::into_inner).push_back(status);
    }
}

/// Mock UBDB server on an ephemeral localhost port.
///
/// Shuts down when dropped.
pub struct MockUbdbServer {
    state: Arc<MockState>,
    endpoint: String,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockUbdbServer {
    /// Starts a new mock server on an ephemeral port.
    ///
    /// # Errors
    ///
    /// Returns `SdkError::Connection` if binding fails.
    pub async fn start() -> Result<Self> {
        let state = Arc::new(MockState::default());

        let addr = SocketAddr::from(([127, 0, 0, 1], 0));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ConnectionSnafu { message: format!("Failed to bind: {e}") }.build())?;
        let local_addr = listener.local_addr().map_err(|e| {
            ConnectionSnafu { message: format!("Failed to get local addr: {e}") }.build()
        })?;
        let endpoint = format!("http://{local_addr}");

        let service = MockUbdbService { state: Arc::clone(&state) };
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let incoming = tokio_stream::wrappers::TcpListenerStream::new(listener);
        tokio::spawn(async move {
            let result = Server::builder()
                .add_service(UbdbServiceServer::new(service))
                .serve_with_incoming_shutdown(incoming, async {
                    let _ = shutdown_rx.await;
                })
                .await;

            if let Err(e) = result {
                tracing::error!("Mock server error: {}", e);
            }
        });

        Ok(Self { state, endpoint, shutdown_tx: Some(shutdown_tx) })
    }

    /// Returns the endpoint URL for connecting to this server.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the requests received so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<MockCall> {
        self.state.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Returns the number of requests received.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.state.request_count.load(Ordering::SeqCst)
    }

    /// Fails the next request the way the real server reports `code`:
    /// `INVALID_ARGUMENT` with packed `S3ErrorDetails` and `ErrorDetails`.
    pub fn inject_authority_error(&self, code: ErrorCode, message: &str) {
        let s3_error = S3ErrorDetails::from(code.s3_error_type());
        let details = ErrorDetails {
            error_code: code.as_u16().to_string(),
            is_retryable: false,
            suggested_action: Some(code.suggested_action().to_owned()),
            ..Default::default()
        };
        let status =
            RpcStatus::new(Code::InvalidArgument, message, Some(&s3_error), Some(&details))
                .into_status();
        self.state.push_failure(status);
    }

    /// Fails the next `count` requests with `UNAVAILABLE`.
    pub fn inject_unavailable(&self, count: usize) {
        for _ in 0..count {
            self.state.push_failure(Status::unavailable("injected unavailable"));
        }
    }

    /// Clears recorded calls and pending failures.
    pub fn reset(&self) {
        self.state.calls.lock().unwrap_or_else(PoisonError::into_inner).clear();
        self.state.failures.lock().unwrap_or_else(PoisonError::into_inner).clear();
        self.state.request_count.store(0, Ordering::SeqCst);
    }

    /// Shuts down the server gracefully.
    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockUbdbServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

struct MockUbdbService {
    state: Arc<MockState>,
}

#[tonic::async_trait]
impl UbdbService for MockUbdbService {
    async fn add_bucket_entry(
        &self,
        request: Request<AddBucketEntryRequest>,
    ) -> std::result::Result<Response<AddBucketEntryResponse>, Status> {
        let req = request.into_inner();
        self.state.record(MockCall::Add { bucket: req.bucket, owner: req.owner, cluster: req.cluster })?;
        Ok(Response::new(AddBucketEntryResponse {}))
    }

    async fn delete_bucket_entry(
        &self,
        request: Request<DeleteBucketEntryRequest>,
    ) -> std::result::Result<Response<DeleteBucketEntryResponse>, Status> {
        let req = request.into_inner();
        self.state.record(MockCall::Delete { bucket: req.bucket, cluster: req.cluster })?;
        Ok(Response::new(DeleteBucketEntryResponse {}))
    }

    async fn update_bucket_entry(
        &self,
        request: Request<UpdateBucketEntryRequest>,
    ) -> std::result::Result<Response<UpdateBucketEntryResponse>, Status> {
        let req = request.into_inner();
        self.state.record(MockCall::Update {
            bucket: req.bucket,
            cluster: req.cluster,
            state: req.state,
        })?;
        Ok(Response::new(UpdateBucketEntryResponse {}))
    }
}
