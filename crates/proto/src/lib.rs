//! Protobuf types and conversions for UBDB.
//!
//! This crate provides:
//! - Generated protobuf types and the `ubdb.v1.UBDBService` client and server ([`proto`])
//! - The `google.rpc.Status` error envelope ([`status`])
//! - Conversions between domain types and proto types ([`convert`])

#![deny(unsafe_code)]
// gRPC services return tonic::Status (176 bytes) - standard practice for gRPC error handling
#![allow(clippy::result_large_err)]

/// Generated protobuf types and service traits.
pub mod proto {
    #![allow(clippy::all)]
    #![allow(missing_docs)]

    // Pre-generated code is used when protoc or the proto sources are unavailable.
    #[cfg(use_pregenerated_proto)]
    include!("generated/ubdb.v1.rs");

    #[cfg(not(use_pregenerated_proto))]
    tonic::include_proto!("ubdb.v1");
}

pub mod convert;
pub mod status;
