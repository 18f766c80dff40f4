//! Rust client SDK for UBDB, the unique bucket name authority.
//!
//! Wraps the `ubdb.v1.UBDBService` gRPC API with typed calls and decodes the
//! server's structured failure details.
//!
//! # Quick Start
//!
//! ```no_run
//! use ubdb_sdk::{BucketState, ClientConfig, S3ErrorType, UbdbClient};
//!
//! # async fn example() -> ubdb_sdk::Result<()> {
//! let config = ClientConfig::builder().with_endpoint("http://127.0.0.1:9000").build()?;
//! let client = UbdbClient::connect(config).await?;
//!
//! match client.add_bucket("photos", "alice", "us-east-1").await {
//!     Ok(()) => client.update_bucket("photos", "us-east-1", BucketState::Created).await?,
//!     Err(e) if e.s3_error_type() == Some(S3ErrorType::BucketAlreadyExists) => {
//!         // Held by someone else
//!     },
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod config;
mod connection;
mod error;
pub mod mock;

pub use client::UbdbClient;
pub use config::{ClientConfig, ClientConfigBuilder, TlsConfig};
pub use error::{REQUEST_ID_HEADER, Result, S3ErrorInfo, SdkError};
pub use ubdb_types::{BucketState, ErrorCode, S3ErrorType};
