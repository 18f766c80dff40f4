//! Name authority state for UBDB.
//!
//! [`NameAuthority`] is the single in-memory source of truth mapping bucket
//! names to [`BucketRecord`](ubdb_types::BucketRecord)s. It enforces:
//!
//! - at most one record per name,
//! - forward-only lifecycle transitions (`CREATING → CREATED → DELETING → removed`),
//! - that only the cluster holding a name may change or release it.
//!
//! Nothing is persisted; the mapping lives for one process lifetime.

#![deny(unsafe_code)]

mod authority;

pub use authority::{NameAuthority, StateCounts};
