//! The bucket name authority.
//!
//! Every operation is one atomic check-then-mutate step. The mapping is a
//! sharded [`DashMap`]; the entry guard for a name holds its shard's write
//! lock across the existence check, the cluster check, the transition table
//! lookup, and the write. Calls on the same name therefore serialize, and
//! calls on names in different shards proceed in parallel.
//!
//! Check order for mutations is existence, then cluster, then transition.

use dashmap::{DashMap, mapref::entry::Entry};
use tracing::{debug, info, warn};
use ubdb_types::{
    BucketRecord, BucketState, Result,
    error::{AlreadyExistsSnafu, ClusterMismatchSnafu, InvalidArgumentSnafu, NotFoundSnafu},
};

/// Number of records in each lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StateCounts {
    /// Records in `CREATING`.
    pub creating: usize,
    /// Records in `CREATED`.
    pub created: usize,
    /// Records in `DELETING`.
    pub deleting: usize,
}

impl StateCounts {
    /// Returns the count for `state`.
    #[must_use]
    pub fn get(&self, state: BucketState) -> usize {
        match state {
            BucketState::Creating => self.creating,
            BucketState::Created => self.created,
            BucketState::Deleting => self.deleting,
        }
    }

    /// Total number of records.
    #[must_use]
    pub fn total(&self) -> usize {
        self.creating + self.created + self.deleting
    }
}

/// Authoritative owner of the bucket name → record mapping.
///
/// Share it between request handlers behind an `Arc`; all methods take
/// `&self`.
#[derive(Debug, Default)]
pub struct NameAuthority {
    buckets: DashMap<String, BucketRecord>,
}

impl NameAuthority {
    /// Creates an empty authority.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves `name` for `cluster` on behalf of `owner`.
    ///
    /// The new record starts in [`BucketState::Creating`].
    ///
    /// # Errors
    ///
    /// - [`AuthorityError::InvalidArgument`](ubdb_types::AuthorityError::InvalidArgument) if `name` is empty.
    /// - [`AuthorityError::AlreadyExists`](ubdb_types::AuthorityError::AlreadyExists) if `name` has a record in any
    ///   state. The existing record is not touched.
    pub fn reserve(&self, name: &str, owner: &str, cluster: &str) -> Result<()> {
        if name.is_empty() {
            return InvalidArgumentSnafu { field: "bucket", constraint: "must not be empty" }
                .fail();
        }

        match self.buckets.entry(name.to_owned()) {
            Entry::Occupied(existing) => {
                warn!(
                    bucket = name,
                    owner,
                    cluster,
                    existing = %existing.get(),
                    "Bucket already exists"
                );
                AlreadyExistsSnafu { bucket: name }.fail()
            },
            Entry::Vacant(slot) => {
                let record = BucketRecord::new(name, owner, cluster);
                info!(bucket = %record, "Added bucket");
                slot.insert(record);
                Ok(())
            },
        }
    }

    /// Advances the record for `name` to `target` in place.
    ///
    /// Legal moves are `CREATING → CREATED` and `CREATED → DELETING`.
    ///
    /// # Errors
    ///
    /// - [`AuthorityError::NotFound`](ubdb_types::AuthorityError::NotFound) if `name` has no record.
    /// - [`AuthorityError::ClusterMismatch`](ubdb_types::AuthorityError::ClusterMismatch) if `cluster` is not the holding
    ///   cluster.
    /// - [`AuthorityError::InvalidTransition`](ubdb_types::AuthorityError::InvalidTransition) if the transition table does
    ///   not allow the move from the current state.
    ///
    /// The record is unchanged on every error.
    pub fn advance(&self, name: &str, cluster: &str, target: BucketState) -> Result<()> {
        let Some(mut record) = self.buckets.get_mut(name) else {
            warn!(bucket = name, cluster, %target, "Bucket not found");
            return NotFoundSnafu { bucket: name }.fail();
        };
        debug!(current = %*record, %target, "Updating bucket");

        ensure_held_by(&record, cluster)?;
        let previous = record.advance(target).inspect_err(|e| {
            warn!(bucket = name, cluster, current = %record.state(), %target, error = %e, "Rejected bucket update");
        })?;

        info!(bucket = %*record, %previous, "Updated bucket");
        Ok(())
    }

    /// Removes the record for `name`, making the name reservable again.
    ///
    /// # Errors
    ///
    /// - [`AuthorityError::NotFound`](ubdb_types::AuthorityError::NotFound) if `name` has no record.
    /// - [`AuthorityError::ClusterMismatch`](ubdb_types::AuthorityError::ClusterMismatch) if `cluster` is not the holding
    ///   cluster.
    /// - [`AuthorityError::InvalidTransition`](ubdb_types::AuthorityError::InvalidTransition) unless the record is in
    ///   [`BucketState::Deleting`].
    ///
    /// The record is unchanged on every error.
    pub fn release(&self, name: &str, cluster: &str) -> Result<()> {
        let Entry::Occupied(entry) = self.buckets.entry(name.to_owned()) else {
            warn!(bucket = name, cluster, "Bucket not found");
            return NotFoundSnafu { bucket: name }.fail();
        };
        debug!(current = %entry.get(), "Deleting bucket");

        ensure_held_by(entry.get(), cluster)?;
        entry.get().ensure_releasable().inspect_err(|e| {
            warn!(bucket = name, cluster, current = %entry.get().state(), error = %e, "Rejected bucket delete");
        })?;

        let removed = entry.remove();
        info!(bucket = %removed, "Deleted bucket");
        Ok(())
    }

    /// Returns a snapshot of the record for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<BucketRecord> {
        self.buckets.get(name).map(|record| record.clone())
    }

    /// Number of reserved names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Whether no names are reserved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Counts records per lifecycle state.
    ///
    /// Shards are visited one at a time, so under concurrent mutation the
    /// counts are not a single point-in-time snapshot.
    #[must_use]
    pub fn count_by_state(&self) -> StateCounts {
        let mut counts = StateCounts::default();
        for record in self.buckets.iter() {
            match record.state() {
                BucketState::Creating => counts.creating += 1,
                BucketState::Created => counts.created += 1,
                BucketState::Deleting => counts.deleting += 1,
            }
        }
        counts
    }
}

fn ensure_held_by(record: &BucketRecord, cluster: &str) -> Result<()> {
    if record.is_held_by(cluster) {
        return Ok(());
    }
    warn!(
        bucket = record.name(),
        cluster,
        existing = record.cluster(),
        "Cluster does not match existing cluster"
    );
    ClusterMismatchSnafu { bucket: record.name(), cluster, existing: record.cluster() }.fail()
}
