//! The `google.rpc.Status` envelope carried in `grpc-status-details-bin`.
//!
//! Failures put a serialized [`RpcStatus`] into `tonic::Status::details`. Its
//! `details` list holds [`Any`]-packed [`S3ErrorDetails`] and
//! [`ErrorDetails`], the layout gRPC rich-error clients in other languages
//! unpack with their standard status helpers.

use prost::Message;
use prost_types::Any;

use crate::proto::{ErrorDetails, S3ErrorDetails};

/// Type URL of an `Any`-packed [`S3ErrorDetails`].
pub const S3_ERROR_DETAILS_TYPE_URL: &str = "type.googleapis.com/ubdb.v1.S3ErrorDetails";

/// Type URL of an `Any`-packed [`ErrorDetails`].
pub const ERROR_DETAILS_TYPE_URL: &str = "type.googleapis.com/ubdb.v1.ErrorDetails";

/// Wire-compatible `google.rpc.Status`.
#[derive(Clone, PartialEq, Message)]
pub struct RpcStatus {
    /// Numeric `tonic::Code`.
    #[prost(int32, tag = "1")]
    pub code: i32,
    /// Developer-facing message, identical to the gRPC status message.
    #[prost(string, tag = "2")]
    pub message: String,
    /// Packed detail messages.
    #[prost(message, repeated, tag = "3")]
    pub details: Vec<Any>,
}

fn pack<M: Message>(type_url: &str, message: &M) -> Any {
    Any { type_url: type_url.to_owned(), value: message.encode_to_vec() }
}

impl RpcStatus {
    /// Builds an envelope with the given detail messages packed in order.
    #[must_use]
    pub fn new(
        code: tonic::Code,
        message: impl Into<String>,
        s3_error: Option<&S3ErrorDetails>,
        error_details: Option<&ErrorDetails>,
    ) -> Self {
        let mut details = Vec::with_capacity(2);
        if let Some(s3_error) = s3_error {
            details.push(pack(S3_ERROR_DETAILS_TYPE_URL, s3_error));
        }
        if let Some(error_details) = error_details {
            details.push(pack(ERROR_DETAILS_TYPE_URL, error_details));
        }
        Self { code: code as i32, message: message.into(), details }
    }

    /// Decodes the envelope from a status' details bytes.
    ///
    /// Returns `None` if the status carries no details or they are not a
    /// valid `google.rpc.Status`.
    #[must_use]
    pub fn from_status(status: &tonic::Status) -> Option<Self> {
        let bytes = status.details();
        if bytes.is_empty() {
            return None;
        }
        Self::decode(bytes).ok()
    }

    /// Converts the envelope into a `tonic::Status` with the envelope as its
    /// details.
    #[must_use]
    pub fn into_status(self) -> tonic::Status {
        let code = tonic::Code::from_i32(self.code);
        let message = self.message.clone();
        tonic::Status::with_details(code, message, self.encode_to_vec().into())
    }

    /// Returns the first detail with `type_url`, decoded as `M`.
    ///
    /// Detail entries that fail to decode are skipped.
    #[must_use]
    pub fn find_detail<M: Message + Default>(&self, type_url: &str) -> Option<M> {
        self.details
            .iter()
            .filter(|any| any.type_url == type_url)
            .find_map(|any| M::decode(any.value.as_slice()).ok())
    }

    /// Returns the packed [`S3ErrorDetails`], if present.
    #[must_use]
    pub fn s3_error_details(&self) -> Option<S3ErrorDetails> {
        self.find_detail(S3_ERROR_DETAILS_TYPE_URL)
    }

    /// Returns the packed [`ErrorDetails`], if present.
    #[must_use]
    pub fn error_details(&self) -> Option<ErrorDetails> {
        self.find_detail(ERROR_DETAILS_TYPE_URL)
    }
}
