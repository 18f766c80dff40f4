//! SDK error types.
//!
//! Provides a two-tier error model:
//! - **Transport errors**: connection failures, TLS, invalid endpoints
//! - **RPC errors**: the server's status, with the authority's structured
//!   details decoded from the `google.rpc.Status` envelope
//!
//! The server answers every authority failure with `INVALID_ARGUMENT`, so
//! tell failures apart with [`SdkError::s3_error_type`] or
//! [`SdkError::error_code`], not [`SdkError::code`].

use std::path::PathBuf;

use snafu::{Location, Snafu};
use tonic::Code;
use ubdb_proto::{convert::s3_error_type_from_proto, status::RpcStatus};
use ubdb_types::{ErrorCode, S3ErrorType};

/// Result type alias for SDK operations.
pub type Result<T> = std::result::Result<T, SdkError>;

/// Metadata key carrying the server-generated request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Storage-backend classification attached to an RPC failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct S3ErrorInfo {
    /// The S3-style error type.
    pub kind: S3ErrorType,
    /// HTTP status a gateway should answer with.
    pub http_status_code: u16,
}

/// SDK error types with context-rich error messages.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum SdkError {
    /// Failed to establish connection.
    #[snafu(display("Connection error at {location}: {message}"))]
    Connection {
        /// Error description.
        message: String,
        /// Source location.
        #[snafu(implicit)]
        location: Location,
    },

    /// Transport-level error (HTTP/2, TLS).
    #[snafu(display("Transport error at {location}: {source}"))]
    Transport {
        /// Underlying transport error.
        source: tonic::transport::Error,
        /// Source location.
        #[snafu(implicit)]
        location: Location,
    },

    /// gRPC RPC error with status code and decoded details.
    #[snafu(display("RPC error (code={code:?}): {message}"))]
    Rpc {
        /// gRPC status code.
        code: Code,
        /// Error message from server.
        message: String,
        /// Server-generated request id, for correlating with server logs.
        request_id: Option<String>,
        /// Decoded `S3ErrorDetails`, when the server attached them.
        s3_error: Option<S3ErrorInfo>,
        /// Decoded numeric code from `ErrorDetails`.
        error_code: Option<ErrorCode>,
    },

    /// Configuration validation error.
    #[snafu(display("Configuration error: {message}"))]
    Config {
        /// Error description.
        message: String,
    },

    /// A certificate or key file could not be read.
    #[snafu(display("Failed to read {}: {source}", path.display()))]
    Io {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// URL parsing error.
    #[snafu(display("Invalid URL '{url}': {message}"))]
    InvalidUrl {
        /// The invalid URL.
        url: String,
        /// Parse error description.
        message: String,
    },
}

impl SdkError {
    /// Returns true if the error is transient and the operation should be retried.
    ///
    /// Authority failures are never retryable: resubmitting the same request
    /// meets the same record state. Retryable errors:
    /// - `UNAVAILABLE`, `DEADLINE_EXCEEDED`, `RESOURCE_EXHAUSTED` without
    ///   authority details
    /// - Transport and connection errors
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { .. } | Self::Connection { .. } => true,
            Self::Rpc { code, s3_error: None, error_code: None, .. } => {
                matches!(code, Code::Unavailable | Code::DeadlineExceeded | Code::ResourceExhausted)
            },
            Self::Rpc { .. } | Self::Config { .. } | Self::Io { .. } | Self::InvalidUrl { .. } => {
                false
            },
        }
    }

    /// Returns the gRPC status code if this is an RPC error.
    #[must_use]
    pub fn code(&self) -> Option<Code> {
        match self {
            Self::Rpc { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Returns the decoded S3 error details if the server attached them.
    #[must_use]
    pub fn s3_error(&self) -> Option<S3ErrorInfo> {
        match self {
            Self::Rpc { s3_error, .. } => *s3_error,
            _ => None,
        }
    }

    /// Returns the S3 error type if the server attached one.
    #[must_use]
    pub fn s3_error_type(&self) -> Option<S3ErrorType> {
        self.s3_error().map(|info| info.kind)
    }

    /// Returns the authority's numeric error code if the server attached one.
    #[must_use]
    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            Self::Rpc { error_code, .. } => *error_code,
            _ => None,
        }
    }

    /// Returns the server's request id for this failure.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Rpc { request_id, .. } => request_id.as_deref(),
            _ => None,
        }
    }
}

impl From<tonic::transport::Error> for SdkError {
    fn from(source: tonic::transport::Error) -> Self {
        Self::Transport { source, location: Location::default() }
    }
}

impl From<tonic::Status> for SdkError {
    fn from(status: tonic::Status) -> Self {
        let envelope = RpcStatus::from_status(&status);
        let s3_error = envelope.as_ref().and_then(RpcStatus::s3_error_details).and_then(|d| {
            let kind = s3_error_type_from_proto(d.r#type())?;
            let http_status_code =
                u16::try_from(d.http_status_code).unwrap_or(kind.http_status_code());
            Some(S3ErrorInfo { kind, http_status_code })
        });
        let error_code = envelope
            .as_ref()
            .and_then(RpcStatus::error_details)
            .and_then(|d| d.error_code.parse::<u16>().ok())
            .and_then(ErrorCode::from_u16);
        let request_id = status
            .metadata()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        Self::Rpc {
            code: status.code(),
            message: status.message().to_owned(),
            request_id,
            s3_error,
            error_code,
        }
    }
}
