//! Input validation for RPC request fields.
//!
//! Runs at the gRPC service boundary before a request reaches the name
//! authority.
//!
//! Field rules:
//! - `bucket`: non-empty, at most `max_bucket_name_bytes`.
//! - `owner`: non-empty, at most `max_owner_bytes`.
//! - `cluster`: non-empty, at most `max_cluster_bytes`.
//!
//! Bucket names are opaque keys to the authority. S3 naming rules belong to
//! the gateways, which apply them before asking for a reservation.

use std::fmt;

use crate::config::ValidationConfig;

/// Validation error with structured context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// Description of the violated constraint.
    pub constraint: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.constraint)
    }
}

impl std::error::Error for ValidationError {}

fn validate_identifier(field: &str, value: &str, max_bytes: usize) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError {
            field: field.to_string(),
            constraint: "must not be empty".to_string(),
        });
    }
    if value.len() > max_bytes {
        return Err(ValidationError {
            field: field.to_string(),
            constraint: format!(
                "length {} bytes exceeds maximum {} bytes",
                value.len(),
                max_bytes
            ),
        });
    }
    Ok(())
}

/// Validates a bucket name.
///
/// # Errors
///
/// Returns [`ValidationError`] if the name is empty, exceeds
/// `max_bucket_name_bytes`.
pub fn validate_bucket_name(name: &str, config: &ValidationConfig) -> Result<(), ValidationError> {
    validate_identifier("bucket", name, config.max_bucket_name_bytes)
}

/// Validates the owner principal of a reservation.
///
/// # Errors
///
/// Returns [`ValidationError`] if the owner is empty, exceeds
/// `max_owner_bytes`.
pub fn validate_owner(owner: &str, config: &ValidationConfig) -> Result<(), ValidationError> {
    validate_identifier("owner", owner, config.max_owner_bytes)
}

/// Validates a cluster identifier.
///
/// # Errors
///
/// Returns [`ValidationError`] if the cluster is empty, exceeds
/// `max_cluster_bytes`.
pub fn validate_cluster(cluster: &str, config: &ValidationConfig) -> Result<(), ValidationError> {
    validate_identifier("cluster", cluster, config.max_cluster_bytes)
}

/// Validates the fields of a reservation request.
///
/// # Errors
///
/// Returns the first failing field's [`ValidationError`], checked in the
/// order bucket, owner, cluster.
pub fn validate_reservation(
    bucket: &str,
    owner: &str,
    cluster: &str,
    config: &ValidationConfig,
) -> Result<(), ValidationError> {
    validate_bucket_name(bucket, config)?;
    validate_owner(owner, config)?;
    validate_cluster(cluster, config)
}

/// Validates the fields shared by update and delete requests.
///
/// # Errors
///
/// Returns the first failing field's [`ValidationError`], checked in the
/// order bucket, cluster.
pub fn validate_mutation(
    bucket: &str,
    cluster: &str,
    config: &ValidationConfig,
) -> Result<(), ValidationError> {
    validate_bucket_name(bucket, config)?;
    validate_cluster(cluster, config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn config() -> ValidationConfig {
        ValidationConfig::default()
    }

    #[test]
    fn test_valid_reservation() {
        assert!(validate_reservation("photos-2024", "alice", "us-east-1", &config()).is_ok());
    }

    #[test]
    fn test_empty_fields_rejected_in_order() {
        let err = validate_reservation("", "", "", &config()).unwrap_err();
        assert_eq!(err.field, "bucket");

        let err = validate_reservation("b1", "", "", &config()).unwrap_err();
        assert_eq!(err.field, "owner");

        let err = validate_reservation("b1", "alice", "", &config()).unwrap_err();
        assert_eq!(err.field, "cluster");
        assert_eq!(err.constraint, "must not be empty");
    }

    #[test]
    fn test_mutation_skips_owner() {
        assert!(validate_mutation("b1", "c1", &config()).is_ok());
        let err = validate_mutation("b1", "", &config()).unwrap_err();
        assert_eq!(err.field, "cluster");
    }

    #[test]
    fn test_length_limit_is_inclusive() {
        let config = ValidationConfig::builder().max_bucket_name_bytes(4).build().unwrap();
        assert!(validate_bucket_name("abcd", &config).is_ok());
        let err = validate_bucket_name("abcde", &config).unwrap_err();
        assert_eq!(err.to_string(), "bucket: length 5 bytes exceeds maximum 4 bytes");
    }

    #[test]
    fn test_length_counts_utf8_bytes() {
        let config = ValidationConfig::builder().max_owner_bytes(3).build().unwrap();
        // "é" is two bytes
        assert!(validate_owner("é", &config).is_ok());
        assert!(validate_owner("éé", &config).is_err());
    }

    #[test]
    fn test_content_is_not_restricted() {
        // Only emptiness and length are checked; the authority takes any string
        assert!(validate_reservation("b\t1", "al\u{0}ice", "c1\n", &config()).is_ok());
        assert!(validate_mutation("photos/ 2024", "\u{7f}", &config()).is_ok());
    }

    proptest! {
        #[test]
        fn prop_printable_names_within_limit_are_valid(name in "[a-z0-9.-]{1,63}") {
            prop_assert!(validate_bucket_name(&name, &config()).is_ok());
        }
    }
}
