//! Error types for UBDB using snafu.
//!
//! [`AuthorityError`] is the typed failure returned by every name authority
//! operation. Each variant maps to:
//! - a numeric [`ErrorCode`] for programmatic handling,
//! - an [`S3ErrorType`] plus HTTP-style status that the RPC front end packs
//!   into structured error details for client-side classification.

use snafu::Snafu;

use crate::{
    bucket::{BucketState, TransitionTarget},
    validation::ValidationError,
};

/// Unified result type for name authority operations.
pub type Result<T, E = AuthorityError> = std::result::Result<T, E>;

/// Machine-readable error codes.
///
/// | Range     | Domain                         |
/// |-----------|--------------------------------|
/// | 1000–1099 | Name authority (state machine) |
/// | 1100–1199 | Request validation             |
///
/// Transmitted as the decimal string of [`ErrorCode::as_u16`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    /// Reservation of a name that already has a record.
    BucketAlreadyExists = 1000,
    /// Mutation of a name with no record.
    BucketNotFound = 1001,
    /// Mutation presenting a cluster other than the holding cluster.
    ClusterMismatch = 1002,
    /// State change not permitted by the transition table.
    InvalidTransition = 1003,
    /// Malformed request field.
    InvalidArgument = 1100,
}

impl ErrorCode {
    /// Returns the numeric code value.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Converts a numeric code to an `ErrorCode`, returning `None` for unknown values.
    #[must_use]
    pub fn from_u16(code: u16) -> Option<Self> {
        match code {
            1000 => Some(Self::BucketAlreadyExists),
            1001 => Some(Self::BucketNotFound),
            1002 => Some(Self::ClusterMismatch),
            1003 => Some(Self::InvalidTransition),
            1100 => Some(Self::InvalidArgument),
            _ => None,
        }
    }

    /// Storage-backend error classification for this code.
    #[must_use]
    pub const fn s3_error_type(self) -> S3ErrorType {
        match self {
            Self::BucketAlreadyExists => S3ErrorType::BucketAlreadyExists,
            Self::BucketNotFound => S3ErrorType::NoSuchBucket,
            Self::ClusterMismatch => S3ErrorType::AccessDenied,
            Self::InvalidTransition => S3ErrorType::InvalidBucketState,
            Self::InvalidArgument => S3ErrorType::InvalidArgument,
        }
    }

    /// Suggested recovery action for this error code.
    #[must_use]
    pub const fn suggested_action(self) -> &'static str {
        match self {
            Self::BucketAlreadyExists => {
                "Choose another bucket name, or wait for the holding cluster to release it."
            },
            Self::BucketNotFound => "Reserve the bucket name before updating or deleting it.",
            Self::ClusterMismatch => {
                "Only the cluster that reserved the bucket name may change or release it."
            },
            Self::InvalidTransition => {
                "Advance the bucket one step at a time: CREATING, CREATED, DELETING, then delete."
            },
            Self::InvalidArgument => "Fix the request fields and resubmit.",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_u16())
    }
}

/// Storage-backend error subtype attached to RPC failures.
///
/// Mirrors the S3 error codes a gateway returns to its own clients, so a
/// cluster can relay the authority's verdict without re-classifying it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum S3ErrorType {
    /// `BucketAlreadyExists` (409).
    BucketAlreadyExists,
    /// `NoSuchBucket` (404).
    NoSuchBucket,
    /// `AccessDenied` (403).
    AccessDenied,
    /// `InvalidBucketState` (409).
    InvalidBucketState,
    /// `InvalidArgument` (400).
    InvalidArgument,
}

impl S3ErrorType {
    /// HTTP status an S3 gateway would answer with.
    #[must_use]
    pub const fn http_status_code(self) -> u16 {
        match self {
            Self::BucketAlreadyExists | Self::InvalidBucketState => 409,
            Self::NoSuchBucket => 404,
            Self::AccessDenied => 403,
            Self::InvalidArgument => 400,
        }
    }

    /// S3 error code string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BucketAlreadyExists => "BucketAlreadyExists",
            Self::NoSuchBucket => "NoSuchBucket",
            Self::AccessDenied => "AccessDenied",
            Self::InvalidBucketState => "InvalidBucketState",
            Self::InvalidArgument => "InvalidArgument",
        }
    }
}

/// Typed failure of a name authority operation.
///
/// Every failure leaves the authority's state exactly as it was before the
/// call.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub))]
pub enum AuthorityError {
    /// The name already has a record, in any state.
    #[snafu(display("bucket '{bucket}' already exists"))]
    AlreadyExists {
        /// Bucket name.
        bucket: String,
    },

    /// No record exists for the name.
    #[snafu(display("bucket '{bucket}' not found"))]
    NotFound {
        /// Bucket name.
        bucket: String,
    },

    /// The request's cluster is not the cluster holding the name.
    #[snafu(display(
        "bucket '{bucket}' cluster '{cluster}' does not match existing cluster '{existing}'"
    ))]
    ClusterMismatch {
        /// Bucket name.
        bucket: String,
        /// Cluster presented by the request.
        cluster: String,
        /// Cluster stored on the record.
        existing: String,
    },

    /// The requested change is not in the transition table.
    ///
    /// Also covers unrecognized target states.
    #[snafu(display("{}", describe_invalid_transition(bucket, target)))]
    InvalidTransition {
        /// Bucket name.
        bucket: String,
        /// State of the record when the change was attempted, if looked up.
        current: Option<BucketState>,
        /// What the request asked for.
        target: TransitionTarget,
    },

    /// A request field failed validation.
    #[snafu(display("invalid argument: {field}: {constraint}"))]
    InvalidArgument {
        /// Offending field.
        field: String,
        /// Violated constraint.
        constraint: String,
    },
}

fn describe_invalid_transition(bucket: &str, target: &TransitionTarget) -> String {
    match target {
        TransitionTarget::Advance(state) => match state.predecessor() {
            Some(required) => {
                format!("bucket '{bucket}' is not in the {required} state for {state} update")
            },
            None => format!("bucket '{bucket}' cannot be updated to the {state} state"),
        },
        TransitionTarget::Release => {
            format!("bucket '{bucket}' is not in the DELETING state for deletion")
        },
        TransitionTarget::Unrecognized(value) => {
            format!("unknown target state '{value}' for bucket '{bucket}'")
        },
    }
}

impl AuthorityError {
    /// Returns the machine-readable error code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::AlreadyExists { .. } => ErrorCode::BucketAlreadyExists,
            Self::NotFound { .. } => ErrorCode::BucketNotFound,
            Self::ClusterMismatch { .. } => ErrorCode::ClusterMismatch,
            Self::InvalidTransition { .. } => ErrorCode::InvalidTransition,
            Self::InvalidArgument { .. } => ErrorCode::InvalidArgument,
        }
    }

    /// Storage-backend error classification, see [`ErrorCode::s3_error_type`].
    #[must_use]
    pub const fn s3_error_type(&self) -> S3ErrorType {
        self.code().s3_error_type()
    }

    /// Whether resubmitting the identical request could succeed.
    ///
    /// Always `false`: every kind reflects the current record state or the
    /// request itself, and only a different request changes either.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        false
    }

    /// Returns the bucket name the error refers to, if any.
    #[must_use]
    pub fn bucket(&self) -> Option<&str> {
        match self {
            Self::AlreadyExists { bucket }
            | Self::NotFound { bucket }
            | Self::ClusterMismatch { bucket, .. }
            | Self::InvalidTransition { bucket, .. } => Some(bucket),
            Self::InvalidArgument { .. } => None,
        }
    }
}

impl From<ValidationError> for AuthorityError {
    fn from(err: ValidationError) -> Self {
        Self::InvalidArgument { field: err.field, constraint: err.constraint }
    }
}
