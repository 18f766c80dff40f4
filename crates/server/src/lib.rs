//! UBDB server library.
//!
//! Provides the gRPC front end of the bucket name authority, its
//! configuration, metrics, and shutdown handling. The `ubdb-server` binary
//! wires these together.

#![deny(unsafe_code)]

pub mod config;
pub mod metrics;
pub mod server;
pub mod services;
pub mod shutdown;

pub use server::{ServeError, UbdbServer, load_tls_config};
pub use services::UbdbServiceImpl;
