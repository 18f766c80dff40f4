//! Wire-level behavior: raw tonic client, status envelope, field validation,
//! and server lifecycle.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::TestServer;
use tonic::Code;
use ubdb_proto::{
    proto::{
        AddBucketEntryRequest, DeleteBucketEntryRequest, s3_error_details::Type,
        ubdb_service_client::UbdbServiceClient,
    },
    status::RpcStatus,
};
use ubdb_sdk::{ErrorCode, S3ErrorType};
use ubdb_server::services::REQUEST_ID_HEADER;
use ubdb_test_utils::{test_service_config, tight_validation_config};
use ubdb_types::config::ValidationConfig;

#[tokio::test]
async fn test_raw_client_sees_rich_status() {
    let server = TestServer::start().await;
    let mut client = UbdbServiceClient::connect(server.endpoint()).await.unwrap();

    let ok = client
        .add_bucket_entry(AddBucketEntryRequest {
            bucket: "b1".to_owned(),
            owner: "alice".to_owned(),
            cluster: "c1".to_owned(),
        })
        .await
        .unwrap();
    assert!(ok.metadata().get(REQUEST_ID_HEADER).is_some());

    let status = client
        .delete_bucket_entry(DeleteBucketEntryRequest {
            bucket: "b1".to_owned(),
            cluster: "c9".to_owned(),
        })
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::InvalidArgument);
    assert!(status.metadata().get(REQUEST_ID_HEADER).is_some());

    let envelope = RpcStatus::from_status(&status).expect("google.rpc.Status details");
    assert_eq!(envelope.code, Code::InvalidArgument as i32);
    assert_eq!(envelope.message, status.message());

    let s3 = envelope.s3_error_details().expect("S3ErrorDetails");
    assert_eq!(s3.r#type(), Type::AccessDenied);
    assert_eq!(s3.http_status_code, 403);

    let details = envelope.error_details().expect("ErrorDetails");
    assert_eq!(details.error_code, ErrorCode::ClusterMismatch.as_u16().to_string());
    assert_eq!(details.context.get("cluster").map(String::as_str), Some("c9"));
    assert_eq!(details.context.get("existing_cluster").map(String::as_str), Some("c1"));
    assert!(details.suggested_action.is_some());
}

#[tokio::test]
async fn test_empty_fields_rejected() {
    let server = TestServer::start().await;
    let client = server.client().await;

    for (bucket, owner, cluster) in [("", "alice", "c1"), ("b1", "", "c1"), ("b1", "alice", "")] {
        let err = client.add_bucket(bucket, owner, cluster).await.unwrap_err();
        assert_eq!(err.s3_error_type(), Some(S3ErrorType::InvalidArgument), "{err}");
        assert_eq!(err.error_code(), Some(ErrorCode::InvalidArgument));
    }
    assert!(server.authority.is_empty());
}

#[tokio::test]
async fn test_oversized_fields_rejected() {
    let server = TestServer::start_with(tight_validation_config(), test_service_config()).await;
    let client = server.client().await;

    let long_name = "n".repeat(17);
    let err = client.add_bucket(&long_name, "alice", "c1").await.unwrap_err();
    assert_eq!(err.s3_error_type(), Some(S3ErrorType::InvalidArgument));
    assert!(err.to_string().contains("bucket"), "{err}");

    let long_cluster = "c".repeat(9);
    let err = client.delete_bucket("b1", &long_cluster).await.unwrap_err();
    assert_eq!(err.s3_error_type(), Some(S3ErrorType::InvalidArgument));

    // Exactly at the limit is fine
    client.add_bucket(&"n".repeat(16), "alice", "c1").await.unwrap();
}

#[tokio::test]
async fn test_default_limits_accept_long_names() {
    let server = TestServer::start_with(ValidationConfig::default(), test_service_config()).await;
    let client = server.client().await;

    client.add_bucket(&"x".repeat(255), "alice", "c1").await.unwrap();
    let err = client.add_bucket(&"x".repeat(256), "alice", "c1").await.unwrap_err();
    assert_eq!(err.s3_error_type(), Some(S3ErrorType::InvalidArgument));
}

#[tokio::test]
async fn test_shutdown_stops_server() {
    let server = TestServer::start().await;
    let endpoint = server.endpoint();
    server.client().await.add_bucket("b1", "alice", "c1").await.unwrap();

    server.shutdown().await.unwrap();
    assert!(UbdbServiceClient::connect(endpoint).await.is_err());
}
