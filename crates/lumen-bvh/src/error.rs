//! Error types for hierarchy configuration.
//!
//! Building and querying never fail; only reading and validating a
//! [`BvhConfig`](crate::BvhConfig) can.

use thiserror::Error;

/// Errors that can occur while preparing a build.
#[derive(Error, Debug)]
pub enum BvhError {
    /// Configuration values are out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Configuration text could not be parsed.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Result type for BVH operations.
pub type Result<T> = std::result::Result<T, BvhError>;
