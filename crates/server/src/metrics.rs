//! Prometheus metrics via the `metrics` facade.
//!
//! ## Metric Naming Conventions
//!
//! All metrics follow the pattern: `ubdb_{name}_{unit}`
//!
//! - Counters: `_total` suffix
//! - Histograms: `_seconds` suffix
//! - Gauges: no suffix
//!
//! Recording is a no-op until a recorder is installed, so the service can be
//! used in tests without an exporter.

use metrics::{counter, gauge, histogram};
use ubdb_state::StateCounts;
use ubdb_types::{AuthorityError, BucketState};

const REQUESTS_TOTAL: &str = "ubdb_requests_total";
const REQUEST_DURATION: &str = "ubdb_request_duration_seconds";
const BUCKETS: &str = "ubdb_buckets";

/// Histogram bucket boundaries (in seconds) for request latency.
///
/// Authority calls are in-memory, so resolution is concentrated below 10ms.
pub const REQUEST_HISTOGRAM_BUCKETS: [f64; 10] =
    [0.0001, 0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.1, 1.0, 10.0];

/// Outcome label for a request result.
#[must_use]
pub fn outcome_label(result: Result<(), &AuthorityError>) -> &'static str {
    match result {
        Ok(()) => "ok",
        Err(AuthorityError::AlreadyExists { .. }) => "already_exists",
        Err(AuthorityError::NotFound { .. }) => "not_found",
        Err(AuthorityError::ClusterMismatch { .. }) => "cluster_mismatch",
        Err(AuthorityError::InvalidTransition { .. }) => "invalid_transition",
        Err(AuthorityError::InvalidArgument { .. }) => "invalid_argument",
    }
}

/// Records one handled RPC.
#[inline]
pub fn record_request(method: &'static str, outcome: &'static str, latency_secs: f64) {
    counter!(REQUESTS_TOTAL, "method" => method, "outcome" => outcome).increment(1);
    histogram!(REQUEST_DURATION, "method" => method).record(latency_secs);
}

/// Sets every per-state gauge from a full count.
pub fn set_bucket_counts(counts: &StateCounts) {
    for state in BucketState::ALL {
        gauge!(BUCKETS, "state" => state.as_str()).set(counts.get(state) as f64);
    }
}

/// A name was reserved.
#[inline]
pub fn record_reserved() {
    gauge!(BUCKETS, "state" => BucketState::Creating.as_str()).increment(1.0);
}

/// A record advanced to `target`.
#[inline]
pub fn record_advanced(target: BucketState) {
    if let Some(previous) = target.predecessor() {
        gauge!(BUCKETS, "state" => previous.as_str()).decrement(1.0);
    }
    gauge!(BUCKETS, "state" => target.as_str()).increment(1.0);
}

/// A name was released.
#[inline]
pub fn record_released() {
    gauge!(BUCKETS, "state" => BucketState::Deleting.as_str()).decrement(1.0);
}
