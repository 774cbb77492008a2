//! Session configuration

use crate::errors::ConfigError;
use crate::float_types::{
    DEFAULT_SCALE, DEFAULT_TOLERANCE, ESCALATION_THRESHOLD, MAX_DIRECTION_ANGLE,
    MOVE_NOISE_FLOOR, Real, TOLERANCE_INCREMENT,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Per-session settings. Fixed for the lifetime of a session, except that the
/// tolerance escalates internally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Design space to view space multiplier
    pub scale: Real,
    /// Base tolerance (view-space units)
    pub tolerance: Real,
    /// Tolerance added per escalation step
    pub tolerance_increment: Real,
    /// Consecutive off-path errors per escalation step
    pub escalation_threshold: u32,
    /// Moves shorter than this skip the direction check
    pub noise_floor: Real,
    /// Largest accepted deviation from the path direction (degrees)
    pub max_direction_angle: Real,
    /// Grace period before an error's trace and marker are cleared (ms)
    pub error_clear_delay_ms: u64,
    /// Delay between completing the letter and the reset (ms)
    pub completion_reset_delay_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            tolerance: DEFAULT_TOLERANCE,
            tolerance_increment: TOLERANCE_INCREMENT,
            escalation_threshold: ESCALATION_THRESHOLD,
            noise_floor: MOVE_NOISE_FLOOR,
            max_direction_angle: MAX_DIRECTION_ANGLE,
            error_clear_delay_ms: 1000,
            completion_reset_delay_ms: 2000,
        }
    }
}

impl SessionConfig {
    /// Default settings with a different scale and base tolerance.
    pub fn with_scale_and_tolerance(scale: Real, tolerance: Real) -> Self {
        Self {
            scale,
            tolerance,
            ..Self::default()
        }
    }

    /// Validate config values are within acceptable ranges.
    /// Returns Ok(()) if valid, or Err describing the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "scale must be a positive number, got {}",
                self.scale
            )));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "tolerance must be a positive number, got {}",
                self.tolerance
            )));
        }
        if !(self.tolerance_increment.is_finite() && self.tolerance_increment >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "tolerance_increment must be >= 0, got {}",
                self.tolerance_increment
            )));
        }
        if self.escalation_threshold == 0 {
            return Err(ConfigError::Invalid(
                "escalation_threshold must be > 0".to_string(),
            ));
        }
        if !(self.noise_floor.is_finite() && self.noise_floor >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "noise_floor must be >= 0, got {}",
                self.noise_floor
            )));
        }
        if !(self.max_direction_angle > 0.0 && self.max_direction_angle <= 180.0) {
            return Err(ConfigError::Invalid(format!(
                "max_direction_angle must be in (0, 180], got {}",
                self.max_direction_angle
            )));
        }
        Ok(())
    }

    pub const fn error_clear_delay(&self) -> Duration {
        Duration::from_millis(self.error_clear_delay_ms)
    }

    pub const fn completion_reset_delay(&self) -> Duration {
        Duration::from_millis(self.completion_reset_delay_ms)
    }

    /// Load and validate config from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
