//! End-to-end bucket lifecycle over gRPC.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::TestServer;
use tonic::Code;
use ubdb_sdk::{BucketState, ErrorCode, S3ErrorType, SdkError};

fn assert_rejected(result: ubdb_sdk::Result<()>, kind: S3ErrorType, code: ErrorCode) -> SdkError {
    let err = result.expect_err("request should be rejected");
    assert_eq!(err.code(), Some(Code::InvalidArgument), "{err}");
    assert_eq!(err.s3_error_type(), Some(kind), "{err}");
    assert_eq!(err.s3_error().map(|s| s.http_status_code), Some(kind.http_status_code()));
    assert_eq!(err.error_code(), Some(code), "{err}");
    assert!(err.request_id().is_some(), "failures carry a request id");
    assert!(!err.is_retryable());
    err
}

#[tokio::test]
async fn test_reservation_lifecycle_scenario() {
    let server = TestServer::start().await;
    let client = server.client().await;

    client.add_bucket("b1", "alice", "c1").await.unwrap();

    let err = assert_rejected(
        client.add_bucket("b1", "bob", "c2").await,
        S3ErrorType::BucketAlreadyExists,
        ErrorCode::BucketAlreadyExists,
    );
    assert!(err.to_string().contains("bucket 'b1' already exists"), "{err}");

    let err = assert_rejected(
        client.update_bucket("b1", "c2", BucketState::Created).await,
        S3ErrorType::AccessDenied,
        ErrorCode::ClusterMismatch,
    );
    assert!(
        err.to_string().contains("cluster 'c2' does not match existing cluster 'c1'"),
        "{err}"
    );

    client.update_bucket("b1", "c1", BucketState::Created).await.unwrap();
    client.update_bucket("b1", "c1", BucketState::Deleting).await.unwrap();

    assert_rejected(
        client.delete_bucket("b1", "c2").await,
        S3ErrorType::AccessDenied,
        ErrorCode::ClusterMismatch,
    );

    client.delete_bucket("b1", "c1").await.unwrap();
    assert!(server.authority.get("b1").is_none());

    client.add_bucket("b1", "carol", "c3").await.unwrap();
    let record = server.authority.get("b1").unwrap();
    assert_eq!(record.owner(), "carol");
    assert_eq!(record.cluster(), "c3");
    assert_eq!(record.state(), BucketState::Creating);

    drop(client);
    server.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_duplicate_leaves_record_unchanged() {
    let server = TestServer::start().await;
    let client = server.client().await;

    client.add_bucket("b1", "alice", "c1").await.unwrap();
    client.update_bucket("b1", "c1", BucketState::Created).await.unwrap();
    assert!(client.add_bucket("b1", "bob", "c2").await.is_err());

    let record = server.authority.get("b1").unwrap();
    assert_eq!(record.owner(), "alice");
    assert_eq!(record.cluster(), "c1");
    assert_eq!(record.state(), BucketState::Created);
}

#[tokio::test]
async fn test_transition_violations() {
    let server = TestServer::start().await;
    let client = server.client().await;
    client.add_bucket("b1", "alice", "c1").await.unwrap();

    // CREATING cannot skip to DELETING, nor be released
    let err = assert_rejected(
        client.update_bucket("b1", "c1", BucketState::Deleting).await,
        S3ErrorType::InvalidBucketState,
        ErrorCode::InvalidTransition,
    );
    assert!(err.to_string().contains("is not in the CREATED state"), "{err}");
    assert_rejected(
        client.delete_bucket("b1", "c1").await,
        S3ErrorType::InvalidBucketState,
        ErrorCode::InvalidTransition,
    );

    // Re-asserting CREATING is never allowed
    assert_rejected(
        client.update_bucket("b1", "c1", BucketState::Creating).await,
        S3ErrorType::InvalidBucketState,
        ErrorCode::InvalidTransition,
    );

    client.update_bucket("b1", "c1", BucketState::Created).await.unwrap();
    assert_rejected(
        client.update_bucket("b1", "c1", BucketState::Created).await,
        S3ErrorType::InvalidBucketState,
        ErrorCode::InvalidTransition,
    );
    assert_eq!(server.authority.get("b1").unwrap().state(), BucketState::Created);
}

#[tokio::test]
async fn test_missing_bucket() {
    let server = TestServer::start().await;
    let client = server.client().await;

    assert_rejected(
        client.update_bucket("ghost", "c1", BucketState::Created).await,
        S3ErrorType::NoSuchBucket,
        ErrorCode::BucketNotFound,
    );
    let err = assert_rejected(
        client.delete_bucket("ghost", "c1").await,
        S3ErrorType::NoSuchBucket,
        ErrorCode::BucketNotFound,
    );
    assert!(err.to_string().contains("bucket 'ghost' not found"), "{err}");
}

#[tokio::test]
async fn test_unknown_wire_states_rejected() {
    let server = TestServer::start().await;
    let client = server.client().await;
    client.add_bucket("b1", "alice", "c1").await.unwrap();

    // UNSPECIFIED, DELETED, and a number outside the enum
    for raw in [0, 4, 99] {
        let err = assert_rejected(
            client.update_bucket_raw("b1", "c1", raw).await,
            S3ErrorType::InvalidBucketState,
            ErrorCode::InvalidTransition,
        );
        assert!(err.to_string().contains("unknown target state"), "{err}");
    }
    assert_eq!(server.authority.get("b1").unwrap().state(), BucketState::Creating);
}
