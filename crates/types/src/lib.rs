//! Core types, errors, and validation for UBDB, the unique bucket name authority.
//!
//! This crate provides the foundational types used throughout the workspace:
//! - [`BucketState`] and its lifecycle transition table
//! - [`BucketRecord`], the per-name ownership record
//! - [`AuthorityError`] and the numeric [`ErrorCode`] catalog, using snafu
//! - Request field validation and its limits ([`config::ValidationConfig`])

#![deny(unsafe_code)]

pub mod bucket;
pub mod config;
pub mod error;
pub mod validation;

pub use bucket::{BucketRecord, BucketState, ParseBucketStateError, TransitionTarget};
pub use error::{AuthorityError, ErrorCode, Result, S3ErrorType};
