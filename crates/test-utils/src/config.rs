//! Test configuration helpers.
//!
//! Centralizes the limits and service settings tests run with, so magic
//! values are not scattered across test modules.

use ubdb_types::config::ValidationConfig;

/// Returns validation limits small enough that tests can exceed them with
/// short literals.
///
/// - `max_bucket_name_bytes`: 16
/// - `max_owner_bytes`: 16
/// - `max_cluster_bytes`: 8
#[must_use]
pub fn tight_validation_config() -> ValidationConfig {
    ValidationConfig { max_bucket_name_bytes: 16, max_owner_bytes: 16, max_cluster_bytes: 8 }
}

/// Service limits for tests that start a server.
#[derive(Debug, Clone, bon::Builder)]
pub struct TestServiceConfig {
    /// Maximum concurrent requests.
    #[builder(default = 100)]
    pub max_concurrent: usize,
    /// Request timeout in seconds.
    #[builder(default = 30)]
    pub timeout_secs: u64,
}

/// Returns permissive service limits so parallel tests never shed load.
#[must_use]
pub fn test_service_config() -> TestServiceConfig {
    TestServiceConfig::builder().build()
}
