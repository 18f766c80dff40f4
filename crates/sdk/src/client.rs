//! High-level client for the UBDB service.

use tonic::transport::Channel;
use tracing::debug;
use ubdb_proto::proto::{
    self, AddBucketEntryRequest, DeleteBucketEntryRequest, UpdateBucketEntryRequest,
    ubdb_service_client::UbdbServiceClient,
};
use ubdb_types::BucketState;

use crate::{
    config::ClientConfig,
    connection,
    error::{Result, SdkError},
};

/// Client for the bucket name authority.
///
/// Cheap to clone: clones share one HTTP/2 connection.
///
/// # Example
///
/// ```no_run
/// # use ubdb_sdk::{BucketState, ClientConfig, UbdbClient};
/// # async fn example() -> ubdb_sdk::Result<()> {
/// let config = ClientConfig::builder().with_endpoint("http://127.0.0.1:9000").build()?;
/// let client = UbdbClient::connect(config).await?;
///
/// client.add_bucket("photos", "alice", "us-east-1").await?;
/// client.update_bucket("photos", "us-east-1", BucketState::Created).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct UbdbClient {
    inner: UbdbServiceClient<Channel>,
    config: ClientConfig,
}

impl UbdbClient {
    /// Connects to the server described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is invalid or unreachable.
    pub async fn connect(config: ClientConfig) -> Result<Self> {
        let channel = connection::connect(&config).await?;
        debug!(endpoint = config.endpoint(), tls = config.tls().is_some(), "Connected");
        Ok(Self { inner: UbdbServiceClient::new(channel), config })
    }

    /// Convenience constructor for a plaintext endpoint with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint URL is invalid or unreachable.
    pub async fn connect_to(endpoint: impl Into<String>) -> Result<Self> {
        let config = ClientConfig::builder().with_endpoint(endpoint).build()?;
        Self::connect(config).await
    }

    /// Returns a reference to the client configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Reserves `bucket` for `cluster` on behalf of `owner`.
    ///
    /// The new record starts in [`BucketState::Creating`].
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::Rpc`] with
    /// [`S3ErrorType::BucketAlreadyExists`](ubdb_types::S3ErrorType::BucketAlreadyExists)
    /// if the name is held, or a transport error.
    pub async fn add_bucket(&self, bucket: &str, owner: &str, cluster: &str) -> Result<()> {
        let request = AddBucketEntryRequest {
            bucket: bucket.to_owned(),
            owner: owner.to_owned(),
            cluster: cluster.to_owned(),
        };
        let response = self.inner.clone().add_bucket_entry(request).await.map_err(SdkError::from)?;
        debug!(bucket, owner, cluster, response = ?response.get_ref(), "Added bucket");
        Ok(())
    }

    /// Releases `bucket`. The record must be in [`BucketState::Deleting`].
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::Rpc`] if the name is not found, is held by another
    /// cluster, or is not in `DELETING`; or a transport error.
    pub async fn delete_bucket(&self, bucket: &str, cluster: &str) -> Result<()> {
        let request =
            DeleteBucketEntryRequest { bucket: bucket.to_owned(), cluster: cluster.to_owned() };
        let response =
            self.inner.clone().delete_bucket_entry(request).await.map_err(SdkError::from)?;
        debug!(bucket, cluster, response = ?response.get_ref(), "Deleted bucket");
        Ok(())
    }

    /// Advances `bucket` to `state`.
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::Rpc`] if the name is not found, is held by another
    /// cluster, or the transition is not allowed; or a transport error.
    pub async fn update_bucket(&self, bucket: &str, cluster: &str, state: BucketState) -> Result<()> {
        self.update_bucket_raw(bucket, cluster, proto::BucketState::from(state) as i32).await
    }

    /// Sends an update with a raw wire state value.
    ///
    /// Lets callers exercise values [`BucketState`] cannot express, such as
    /// `BUCKET_STATE_DELETED`, which the server rejects.
    ///
    /// # Errors
    ///
    /// Same as [`UbdbClient::update_bucket`].
    pub async fn update_bucket_raw(&self, bucket: &str, cluster: &str, state: i32) -> Result<()> {
        let request = UpdateBucketEntryRequest {
            bucket: bucket.to_owned(),
            cluster: cluster.to_owned(),
            state,
        };
        let response =
            self.inner.clone().update_bucket_entry(request).await.map_err(SdkError::from)?;
        debug!(bucket, cluster, state, response = ?response.get_ref(), "Updated bucket");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use tonic::Code;
    use ubdb_types::{ErrorCode, S3ErrorType};

    use super::*;
    use crate::mock::{MockCall, MockUbdbServer};

    async fn client_for(server: &MockUbdbServer) -> UbdbClient {
        UbdbClient::connect_to(server.endpoint()).await.expect("connect to mock")
    }

    #[tokio::test]
    async fn test_requests_reach_server() {
        let server = MockUbdbServer::start().await.unwrap();
        let client = client_for(&server).await;

        client.add_bucket("b1", "alice", "c1").await.unwrap();
        client.update_bucket("b1", "c1", BucketState::Created).await.unwrap();
        client.delete_bucket("b1", "c1").await.unwrap();

        assert_eq!(
            server.calls(),
            vec![
                MockCall::Add {
                    bucket: "b1".to_owned(),
                    owner: "alice".to_owned(),
                    cluster: "c1".to_owned(),
                },
                MockCall::Update {
                    bucket: "b1".to_owned(),
                    cluster: "c1".to_owned(),
                    state: proto::BucketState::Created as i32,
                },
                MockCall::Delete { bucket: "b1".to_owned(), cluster: "c1".to_owned() },
            ]
        );
    }

    #[tokio::test]
    async fn test_authority_failure_decoded() {
        let server = MockUbdbServer::start().await.unwrap();
        server.inject_authority_error(ErrorCode::BucketAlreadyExists, "bucket 'b1' already exists");
        let client = client_for(&server).await;

        let err = client.add_bucket("b1", "alice", "c1").await.unwrap_err();
        assert_eq!(err.code(), Some(Code::InvalidArgument));
        assert_eq!(err.s3_error_type(), Some(S3ErrorType::BucketAlreadyExists));
        assert_eq!(err.s3_error().map(|s| s.http_status_code), Some(409));
        assert_eq!(err.error_code(), Some(ErrorCode::BucketAlreadyExists));
        assert!(err.to_string().contains("bucket 'b1' already exists"));

        // Injected failures are consumed once
        client.add_bucket("b1", "alice", "c1").await.unwrap();
    }

    #[tokio::test]
    async fn test_unavailable_is_retryable() {
        let server = MockUbdbServer::start().await.unwrap();
        server.inject_unavailable(1);
        let client = client_for(&server).await;

        let err = client.delete_bucket("b1", "c1").await.unwrap_err();
        assert_eq!(err.code(), Some(Code::Unavailable));
        assert!(err.is_retryable());
        assert_eq!(server.request_count(), 1);
    }

    #[tokio::test]
    async fn test_raw_state_passed_through() {
        let server = MockUbdbServer::start().await.unwrap();
        let client = client_for(&server).await;

        client.update_bucket_raw("b1", "c1", 42).await.unwrap();
        assert_eq!(
            server.calls(),
            vec![MockCall::Update { bucket: "b1".to_owned(), cluster: "c1".to_owned(), state: 42 }]
        );
    }
}
