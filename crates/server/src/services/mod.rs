//! gRPC service implementations for UBDB.
//!
//! There is no authentication layer. Deployments reach the server over a
//! private network or enable mutual TLS with `--tls --ca-cert`.

mod bucket;
mod error_details;
mod metadata;

pub use bucket::UbdbServiceImpl;
pub use metadata::REQUEST_ID_HEADER;
