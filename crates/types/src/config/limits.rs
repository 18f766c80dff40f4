use serde::{Deserialize, Serialize};

use super::ConfigError;

const fn default_max_bucket_name_bytes() -> usize {
    255
}

const fn default_max_owner_bytes() -> usize {
    256
}

const fn default_max_cluster_bytes() -> usize {
    256
}

/// Size limits applied to request fields.
///
/// # Example
///
/// ```
/// use ubdb_types::config::ValidationConfig;
///
/// let config = ValidationConfig::builder()
///     .max_bucket_name_bytes(63)
///     .build()
///     .expect("valid validation config");
/// assert_eq!(config.max_bucket_name_bytes, 63);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Maximum bucket name size in bytes.
    ///
    /// Must be >= 1. Default: 255.
    #[serde(default = "default_max_bucket_name_bytes")]
    pub max_bucket_name_bytes: usize,
    /// Maximum owner principal size in bytes.
    ///
    /// Must be >= 1. Default: 256.
    #[serde(default = "default_max_owner_bytes")]
    pub max_owner_bytes: usize,
    /// Maximum cluster identifier size in bytes.
    ///
    /// Must be >= 1. Default: 256.
    #[serde(default = "default_max_cluster_bytes")]
    pub max_cluster_bytes: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_bucket_name_bytes: default_max_bucket_name_bytes(),
            max_owner_bytes: default_max_owner_bytes(),
            max_cluster_bytes: default_max_cluster_bytes(),
        }
    }
}

#[bon::bon]
impl ValidationConfig {
    /// Creates a new validation configuration, verifying all limits are positive.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if any limit is zero.
    #[builder]
    pub fn new(
        #[builder(default = default_max_bucket_name_bytes())] max_bucket_name_bytes: usize,
        #[builder(default = default_max_owner_bytes())] max_owner_bytes: usize,
        #[builder(default = default_max_cluster_bytes())] max_cluster_bytes: usize,
    ) -> Result<Self, ConfigError> {
        let config = Self { max_bucket_name_bytes, max_owner_bytes, max_cluster_bytes };
        config.validate()?;
        Ok(config)
    }
}

impl ValidationConfig {
    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if any limit is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let limits = [
            ("max_bucket_name_bytes", self.max_bucket_name_bytes),
            ("max_owner_bytes", self.max_owner_bytes),
            ("max_cluster_bytes", self.max_cluster_bytes),
        ];
        for (name, value) in limits {
            if value == 0 {
                return Err(ConfigError::Validation { message: format!("{name} must be >= 1") });
            }
        }
        Ok(())
    }
}
