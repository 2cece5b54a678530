//! Build parameters.

use lumen_math::Tolerance;
use serde::{Deserialize, Serialize};

use crate::error::{BvhError, Result};

/// Hierarchy build parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BvhConfig {
    /// Ranges of at most this many objects become leaves.
    pub max_leaf_size: usize,
    /// Padding added to every side of the root box.
    pub root_padding: f64,
}

impl Default for BvhConfig {
    fn default() -> Self {
        Self {
            max_leaf_size: 4,
            root_padding: Tolerance::DEFAULT.linear,
        }
    }
}

impl BvhConfig {
    /// Parse a config from TOML. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: BvhConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if self.max_leaf_size == 0 {
            return Err(BvhError::InvalidConfig(
                "max_leaf_size must be at least 1".into(),
            ));
        }
        if !self.root_padding.is_finite() || self.root_padding < 0.0 {
            return Err(BvhError::InvalidConfig(
                "root_padding must be finite and non-negative".into(),
            ));
        }
        Ok(())
    }
}
