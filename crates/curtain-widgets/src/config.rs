#![forbid(unsafe_code)]

//! Curtain configuration.
//!
//! Every field defaults to the behaviour tours have always had, so
//! `CurtainConfig::default()` reproduces it exactly. With the `config`
//! feature the whole struct can be loaded from TOML or JSON:
//!
//! ```toml
//! default_duration_ms = 400
//! namespace = "onboarding"
//!
//! [placement]
//! margin = 16.0
//! ```
//!
//! ```rust,ignore
//! let config = CurtainConfig::from_toml_file("curtain.toml")?;
//! ```

use std::time::Duration;

#[cfg(feature = "config")]
use std::path::Path;

use curtain_core::animation::Easing;
#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::mask::DEFAULT_DURATION;
use crate::placement::PlacementPolicy;

/// Tunable parameters for a [`crate::Curtain`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct CurtainConfig {
    /// Mask transition length when a cut does not specify one.
    pub default_duration_ms: u64,
    /// Mask transition length for resize-driven re-cuts. Zero snaps.
    pub resize_duration_ms: u64,
    /// Easing for mask transitions.
    pub easing: Easing,
    /// Side selection thresholds and viewport margin.
    pub placement: PlacementPolicy,
    /// Stacking order of the mask surface.
    pub mask_z_index: i32,
    /// Stacking order of the tooltip; must sit above the mask.
    pub tooltip_z_index: i32,
    /// Prefix of the per-instance resize listener namespace.
    pub namespace: String,
}

impl Default for CurtainConfig {
    fn default() -> Self {
        Self {
            default_duration_ms: DEFAULT_DURATION.as_millis() as u64,
            resize_duration_ms: 0,
            easing: Easing::Linear,
            placement: PlacementPolicy::default(),
            mask_z_index: 1000,
            tooltip_z_index: 1002,
            namespace: "curtain".to_owned(),
        }
    }
}

impl CurtainConfig {
    /// Mask transition length when a cut does not specify one.
    pub fn default_duration(&self) -> Duration {
        Duration::from_millis(self.default_duration_ms)
    }

    /// Mask transition length for resize-driven re-cuts.
    pub fn resize_duration(&self) -> Duration {
        Duration::from_millis(self.resize_duration_ms)
    }

    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = self.placement.validate();
        if self.namespace.is_empty() {
            errors.push("namespace must not be empty".into());
        }
        if self.tooltip_z_index <= self.mask_z_index {
            errors.push(format!(
                "tooltip_z_index must be above mask_z_index ({} <= {})",
                self.tooltip_z_index, self.mask_z_index
            ));
        }
        errors
    }

    #[cfg(feature = "config")]
    fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }

    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str::<Self>(s)
            .map_err(ConfigError::Toml)?
            .validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str::<Self>(s)
            .map_err(ConfigError::Json)?
            .validated()
    }

    /// Serialize to a pretty TOML string.
    #[cfg(feature = "config")]
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::TomlSer)
    }
}

/// Errors from loading a [`CurtainConfig`].
#[cfg(feature = "config")]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parse failure.
    #[error("invalid TOML config: {0}")]
    Toml(toml::de::Error),
    /// TOML serialization failure.
    #[error("failed to serialize config: {0}")]
    TomlSer(toml::ser::Error),
    /// JSON parse failure.
    #[error("invalid JSON config: {0}")]
    Json(serde_json::Error),
    /// Parsed values that cannot drive a curtain.
    #[error("invalid config values: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_hardcoded_behaviour() {
        let config = CurtainConfig::default();
        assert_eq!(config.default_duration(), Duration::from_millis(600));
        assert_eq!(config.resize_duration(), Duration::ZERO);
        assert_eq!(config.easing, Easing::Linear);
        assert_eq!(config.placement.margin, 10.0);
        assert!(config.tooltip_z_index > config.mask_z_index);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn validate_catches_nan_margin() {
        let mut config = CurtainConfig::default();
        config.placement.margin = f64::NAN;
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("placement.margin"));
    }

    #[test]
    fn validate_catches_inverted_stacking() {
        let config = CurtainConfig {
            mask_z_index: 5,
            tooltip_z_index: 5,
            namespace: String::new(),
            ..CurtainConfig::default()
        };
        assert_eq!(config.validate().len(), 2);
    }
}
