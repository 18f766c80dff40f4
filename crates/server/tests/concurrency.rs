//! Concurrent requests racing for the same names.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::TestServer;
use tokio::task::JoinSet;
use ubdb_sdk::{BucketState, S3ErrorType};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_one_reservation_wins() {
    let server = TestServer::start().await;
    let client = server.client().await;

    let mut tasks = JoinSet::new();
    for i in 0..32 {
        let client = client.clone();
        tasks.spawn(async move {
            client.add_bucket("contested", &format!("owner-{i}"), &format!("c{i}")).await
        });
    }

    let mut winners = 0;
    while let Some(result) = tasks.join_next().await {
        match result.unwrap() {
            Ok(()) => winners += 1,
            Err(err) => {
                assert_eq!(err.s3_error_type(), Some(S3ErrorType::BucketAlreadyExists), "{err}")
            },
        }
    }
    assert_eq!(winners, 1);

    let record = server.authority.get("contested").unwrap();
    assert_eq!(record.state(), BucketState::Creating);
    assert_eq!(record.owner(), format!("owner-{}", &record.cluster()[1..]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_one_advance_wins() {
    let server = TestServer::start().await;
    let client = server.client().await;
    client.add_bucket("b1", "alice", "c1").await.unwrap();

    let mut tasks = JoinSet::new();
    for _ in 0..16 {
        let client = client.clone();
        tasks.spawn(async move { client.update_bucket("b1", "c1", BucketState::Created).await });
    }

    let mut winners = 0;
    while let Some(result) = tasks.join_next().await {
        match result.unwrap() {
            Ok(()) => winners += 1,
            Err(err) => {
                assert_eq!(err.s3_error_type(), Some(S3ErrorType::InvalidBucketState), "{err}")
            },
        }
    }
    assert_eq!(winners, 1);
    assert_eq!(server.authority.get("b1").unwrap().state(), BucketState::Created);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_distinct_names_all_succeed() {
    let server = TestServer::start().await;
    let client = server.client().await;

    let mut tasks = JoinSet::new();
    for i in 0..50 {
        let client = client.clone();
        tasks.spawn(async move {
            let name = format!("bucket-{i}");
            client.add_bucket(&name, "alice", "c1").await?;
            client.update_bucket(&name, "c1", BucketState::Created).await
        });
    }
    while let Some(result) = tasks.join_next().await {
        result.unwrap().unwrap();
    }

    assert_eq!(server.authority.len(), 50);
    assert_eq!(server.authority.count_by_state().created, 50);
}
