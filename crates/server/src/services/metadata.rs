//! Correlation metadata for gRPC responses.
//!
//! Every response, success or failure, carries a server-generated
//! `x-request-id` that matches the `request_id` field of the request's log
//! span.

use tonic::{Response, Status, metadata::MetadataValue};
use uuid::Uuid;

/// Metadata key carrying the request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Wraps `body` in a response carrying `x-request-id`.
pub(crate) fn response_with_request_id<T>(body: T, request_id: &Uuid) -> Response<T> {
    let mut response = Response::new(body);
    if let Ok(val) = MetadataValue::try_from(request_id.to_string()) {
        response.metadata_mut().insert(REQUEST_ID_HEADER, val);
    }
    response
}

/// Adds `x-request-id` to an error status.
pub(crate) fn status_with_request_id(mut status: Status, request_id: &Uuid) -> Status {
    if let Ok(val) = MetadataValue::try_from(request_id.to_string()) {
        status.metadata_mut().insert(REQUEST_ID_HEADER, val);
    }
    status
}
