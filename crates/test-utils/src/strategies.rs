//! Proptest strategies for UBDB domain types.
//!
//! Names and clusters are drawn from small pools so that random operation
//! sequences collide often enough to exercise conflicts, cluster mismatches,
//! and every lifecycle transition.
//!
//! # Usage
//!
//! ```no_run
//! use proptest::prelude::*;
//! use ubdb_test_utils::strategies;
//!
//! proptest! {
//!     #[test]
//!     fn my_property(ops in strategies::arb_authority_ops(32)) {
//!         // replay ops against the authority and a reference model
//!     }
//! }
//! ```

use proptest::prelude::*;
use ubdb_types::BucketState;

/// Generates a bucket name from a pool of five.
pub fn arb_bucket_name() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["alpha", "bravo", "charlie", "delta", "echo"])
        .prop_map(str::to_string)
}

/// Generates an owner principal of the form `user-[a-z]{1,8}`.
pub fn arb_owner() -> impl Strategy<Value = String> {
    "[a-z]{1,8}".prop_map(|name| format!("user-{name}"))
}

/// Generates a cluster identifier from a pool of three.
pub fn arb_cluster() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["us-east", "us-west", "eu-central"]).prop_map(str::to_string)
}

/// Generates any [`BucketState`].
pub fn arb_state() -> impl Strategy<Value = BucketState> {
    prop::sample::select(BucketState::ALL.to_vec())
}

/// Generates an identifier that violates no validation rule: 1-64 printable
/// ASCII characters.
pub fn arb_valid_identifier() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9._-]{1,64}"
}

/// One call against the name authority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorityOp {
    /// Reserve a name.
    Reserve {
        /// Bucket name.
        name: String,
        /// Requesting principal.
        owner: String,
        /// Requesting cluster.
        cluster: String,
    },
    /// Advance a name to a new state.
    Advance {
        /// Bucket name.
        name: String,
        /// Requesting cluster.
        cluster: String,
        /// Requested state.
        target: BucketState,
    },
    /// Release a name.
    Release {
        /// Bucket name.
        name: String,
        /// Requesting cluster.
        cluster: String,
    },
}

impl AuthorityOp {
    /// The bucket name this operation touches.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Reserve { name, .. } | Self::Advance { name, .. } | Self::Release { name, .. } => {
                name
            },
        }
    }
}

/// Generates a single [`AuthorityOp`], weighted toward advances.
pub fn arb_authority_op() -> impl Strategy<Value = AuthorityOp> {
    prop_oneof![
        2 => (arb_bucket_name(), arb_owner(), arb_cluster())
            .prop_map(|(name, owner, cluster)| AuthorityOp::Reserve { name, owner, cluster }),
        3 => (arb_bucket_name(), arb_cluster(), arb_state())
            .prop_map(|(name, cluster, target)| AuthorityOp::Advance { name, cluster, target }),
        1 => (arb_bucket_name(), arb_cluster())
            .prop_map(|(name, cluster)| AuthorityOp::Release { name, cluster }),
    ]
}

/// Generates between 1 and `max_len` operations.
pub fn arb_authority_ops(max_len: usize) -> impl Strategy<Value = Vec<AuthorityOp>> {
    proptest::collection::vec(arb_authority_op(), 1..=max_len.max(1))
}
