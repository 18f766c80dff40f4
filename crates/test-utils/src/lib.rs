//! Shared test utilities for UBDB crates.
//!
//! - [`assert_eventually`] - Poll a condition until it's true or timeout
//! - [`tight_validation_config`] - Small field limits for validation tests
//! - [`test_service_config`] - Permissive service limits for server tests
//! - [`strategies`] - Proptest generators for names, clusters, and operation sequences

#![deny(unsafe_code)]

mod assertions;
pub use assertions::assert_eventually;

mod config;
pub use config::{TestServiceConfig, test_service_config, tight_validation_config};

pub mod strategies;
