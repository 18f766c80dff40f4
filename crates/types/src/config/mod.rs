//! Configuration types for UBDB.
//!
//! Config structs validate their values at construction time via fallible
//! builders. Post-deserialization validation is available via the
//! `validate()` method on each struct.

mod limits;

pub use limits::*;
use snafu::Snafu;

/// Configuration validation error.
///
/// Returned when a configuration value is outside its valid range or
/// violates a cross-field constraint.
#[derive(Debug, Snafu)]
pub enum ConfigError {
    /// A configuration value is invalid.
    #[snafu(display("invalid config: {message}"))]
    Validation {
        /// Description of the validation failure.
        message: String,
    },
}
