//! Controller configuration loaded from YAML.
//!
//! Every key is optional:
//!
//! ```yaml
//! speed: 0.0
//! movement_scale: 5.0
//! sample_interval: 5
//! apply_reference_offset: true
//! zero_velocity_on_freeze: true
//! ```

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::tracking::velocity::{DEFAULT_MOVEMENT_SCALE, DEFAULT_SAMPLE_INTERVAL};

/// Settings for one pose controller. Fixed for the controller's lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Added to `movement_scale` when scaling planar displacement.
    pub speed: f64,
    /// Base multiplier from planar displacement to velocity.
    pub movement_scale: f64,
    /// Updates per displacement window.
    pub sample_interval: usize,
    /// Express facing relative to the reference captured at freeze time.
    pub apply_reference_offset: bool,
    /// Zero the velocity while movement is frozen instead of holding it.
    pub zero_velocity_on_freeze: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            speed: 0.0,
            movement_scale: DEFAULT_MOVEMENT_SCALE,
            sample_interval: DEFAULT_SAMPLE_INTERVAL,
            apply_reference_offset: true,
            zero_velocity_on_freeze: true,
        }
    }
}

impl ControllerConfig {
    /// Load and validate a YAML config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file =
            File::open(path).with_context(|| format!("Failed to open config {:?}", path))?;
        let config: Self = serde_yaml::from_reader(file)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sample_interval == 0 {
            bail!("sample_interval must be at least 1");
        }
        if !self.speed.is_finite() {
            bail!("speed must be finite, got {}", self.speed);
        }
        if !self.movement_scale.is_finite() {
            bail!("movement_scale must be finite, got {}", self.movement_scale);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config = ControllerConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, ControllerConfig::default());
        assert_eq!(config.movement_scale, 5.0);
        assert_eq!(config.sample_interval, 5);
    }

    #[test]
    fn test_partial_yaml() {
        let config =
            ControllerConfig::from_yaml_str("speed: 2.5\napply_reference_offset: false\n").unwrap();

        assert_eq!(config.speed, 2.5);
        assert!(!config.apply_reference_offset);
        assert_eq!(config.movement_scale, 5.0);
        assert!(config.zero_velocity_on_freeze);
    }

    #[test]
    fn test_zero_interval_rejected() {
        let err = ControllerConfig::from_yaml_str("sample_interval: 0").unwrap_err();
        assert!(err.to_string().contains("sample_interval"));
    }

    #[test]
    fn test_non_finite_speed_rejected() {
        let config = ControllerConfig {
            speed: f64::NAN,
            ..ControllerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "speed: 1.0\nsample_interval: 3").unwrap();

        let config = ControllerConfig::load(file.path()).unwrap();
        assert_eq!(config.speed, 1.0);
        assert_eq!(config.sample_interval, 3);
    }

    #[test]
    fn test_missing_file() {
        let err = ControllerConfig::load("/nonexistent/controller.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to open config"));
    }
}
