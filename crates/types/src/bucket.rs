//! Bucket records and the lifecycle transition table.
//!
//! A bucket name moves through a strictly forward lifecycle:
//!
//! ```text
//! CREATING ──► CREATED ──► DELETING ──► (record removed)
//! ```
//!
//! There is no `DELETED` state on a record. Releasing a `DELETING` bucket
//! removes the record, which is the only way a name becomes reusable.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use snafu::Snafu;

use crate::error::{AuthorityError, InvalidTransitionSnafu};

/// Lifecycle state of a reserved bucket name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BucketState {
    /// Name reserved, backing bucket being created by the owning cluster.
    Creating,
    /// Backing bucket exists.
    Created,
    /// Owning cluster is tearing the bucket down.
    Deleting,
}

impl BucketState {
    /// Every state a record can hold, in lifecycle order.
    pub const ALL: [Self; 3] = [Self::Creating, Self::Created, Self::Deleting];

    /// Returns the states a record in `self` may advance to in place.
    ///
    /// This is the whole transition table. `DELETING` has no in-place
    /// successor; it can only be released.
    #[must_use]
    pub const fn allowed_targets(self) -> &'static [Self] {
        match self {
            Self::Creating => &[Self::Created],
            Self::Created => &[Self::Deleting],
            Self::Deleting => &[],
        }
    }

    /// Whether a record in `self` may advance to `target`.
    #[must_use]
    pub fn can_advance_to(self, target: Self) -> bool {
        self.allowed_targets().contains(&target)
    }

    /// Returns the only state from which `self` can be reached, if any.
    #[must_use]
    pub const fn predecessor(self) -> Option<Self> {
        match self {
            Self::Creating => None,
            Self::Created => Some(Self::Creating),
            Self::Deleting => Some(Self::Created),
        }
    }

    /// Whether a record in this state may be released (removed).
    #[must_use]
    pub const fn is_releasable(self) -> bool {
        matches!(self, Self::Deleting)
    }

    /// Returns the canonical upper-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Creating => "CREATING",
            Self::Created => "CREATED",
            Self::Deleting => "DELETING",
        }
    }
}

impl fmt::Display for BucketState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a [`BucketState`].
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(display("unknown bucket state '{value}'; expected creating, created, or deleting"))]
pub struct ParseBucketStateError {
    /// The rejected input.
    pub value: String,
}

impl FromStr for BucketState {
    type Err = ParseBucketStateError;

    /// Parses a state name case-insensitively (`created`, `CREATED`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseBucketStateError { value: s.to_string() })
    }
}

/// The change a mutating request asked for.
///
/// Carried by [`AuthorityError::InvalidTransition`] so the message can say
/// what was attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionTarget {
    /// In-place advance to a new state.
    Advance(BucketState),
    /// Removal of the record.
    Release,
    /// A target the front end could not map to a lifecycle state.
    Unrecognized(String),
}

impl fmt::Display for TransitionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Advance(state) => write!(f, "{state}"),
            Self::Release => f.write_str("release"),
            Self::Unrecognized(value) => f.write_str(value),
        }
    }
}

/// Ownership record for one reserved bucket name.
///
/// `name`, `owner`, and `cluster` are fixed at reservation time. Only the
/// state changes, and only through [`BucketRecord::advance`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketRecord {
    name: String,
    owner: String,
    cluster: String,
    state: BucketState,
}

impl BucketRecord {
    /// Creates a freshly reserved record in [`BucketState::Creating`].
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        owner: impl Into<String>,
        cluster: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            owner: owner.into(),
            cluster: cluster.into(),
            state: BucketState::Creating,
        }
    }

    /// Returns the bucket name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the principal that reserved the name.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns the cluster holding the name.
    #[must_use]
    pub fn cluster(&self) -> &str {
        &self.cluster
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub fn state(&self) -> BucketState {
        self.state
    }

    /// Whether `cluster` is the cluster holding this name.
    #[must_use]
    pub fn is_held_by(&self, cluster: &str) -> bool {
        self.cluster == cluster
    }

    /// Moves the record to `target` if the transition table allows it.
    ///
    /// Returns the previous state on success. On failure the record is
    /// left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AuthorityError::InvalidTransition`] if `target` is not
    /// reachable from the current state.
    pub fn advance(&mut self, target: BucketState) -> Result<BucketState, AuthorityError> {
        if !self.state.can_advance_to(target) {
            return InvalidTransitionSnafu {
                bucket: self.name.clone(),
                current: Some(self.state),
                target: TransitionTarget::Advance(target),
            }
            .fail();
        }
        let previous = self.state;
        self.state = target;
        Ok(previous)
    }

    /// Checks that the record may be released.
    ///
    /// # Errors
    ///
    /// Returns [`AuthorityError::InvalidTransition`] unless the record is
    /// in [`BucketState::Deleting`].
    pub fn ensure_releasable(&self) -> Result<(), AuthorityError> {
        if self.state.is_releasable() {
            return Ok(());
        }
        InvalidTransitionSnafu {
            bucket: self.name.clone(),
            current: Some(self.state),
            target: TransitionTarget::Release,
        }
        .fail()
    }
}

impl fmt::Display for BucketRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bucket(name={}, owner={}, cluster={}, state={})",
            self.name, self.owner, self.cluster, self.state
        )
    }
}
