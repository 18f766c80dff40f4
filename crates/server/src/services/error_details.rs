//! Maps authority failures to gRPC statuses.
//!
//! Every failure kind is answered with `INVALID_ARGUMENT` and the error's
//! message. Clients that need to tell kinds apart read the packed
//! `S3ErrorDetails` (or `ErrorDetails`) instead of the status code.

use tonic::{Code, Status};
use ubdb_proto::{
    proto::{ErrorDetails, S3ErrorDetails},
    status::RpcStatus,
};
use ubdb_types::AuthorityError;

/// Builds the status returned for `err`.
pub(crate) fn status_from_authority_error(err: &AuthorityError) -> Status {
    let s3_error = S3ErrorDetails::from(err);
    let error_details = ErrorDetails::from(err);
    RpcStatus::new(Code::InvalidArgument, err.to_string(), Some(&s3_error), Some(&error_details))
        .into_status()
}
