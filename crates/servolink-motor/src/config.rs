//! Motor catalog data and configuration loading.
//!
//! Presets are plain constructor functions; nothing here is global state.
//! A configuration document is a serialized [`MotorInfo`]:
//!
//! ```yaml
//! specification:
//!   manufacturer: Cubemars
//!   model: AK70-10
//!   weight: 0.5
//!   voltage: 24.0
//!   precision: 0.12
//!   rated_torque: 8.8
//!   peak_torque: 24.5
//!   max_speed: 50.0
//! limits:
//!   position: { min: -12.5, max: 12.5 }
//!   velocity: { min: -50.0, max: 50.0 }
//!   torque: { min: -24.5, max: 24.5 }
//!   stiffness: { min: 0.0, max: 500.0 }
//!   damper: { min: 0.0, max: 5.0 }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use servolink_errors::{ConfigError, ConfigResult};
use servolink_protocol::MotorLimits;
use servolink_units::{AngularVelocity, Degrees, Limits, Mass, Torque, Voltage};
use tracing::debug;

/// Static descriptive data of an actuator model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotorSpecification {
    pub manufacturer: String,
    pub model: String,
    pub weight: Mass,
    pub voltage: Voltage,
    /// Encoder precision.
    pub precision: Degrees,
    pub rated_torque: Torque,
    pub peak_torque: Torque,
    pub max_speed: AngularVelocity,
}

/// Specification plus hardware limits of one actuator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotorInfo {
    pub specification: MotorSpecification,
    pub limits: MotorLimits,
}

impl MotorInfo {
    /// Generic actuator: ±12.5 rad, ±50 rad/s, ±16 N·m, kp ≤ 500, kd ≤ 5.
    pub fn generic() -> Self {
        Self {
            specification: MotorSpecification {
                manufacturer: "default".to_string(),
                model: "default".to_string(),
                weight: Mass::new(0.5),
                voltage: Voltage::new(24.0),
                precision: Degrees::new(0.12),
                rated_torque: Torque::new(5.0),
                peak_torque: Torque::new(16.0),
                max_speed: AngularVelocity::new(50.0),
            },
            limits: MotorLimits::GENERIC,
        }
    }

    /// Cubemars AK70-10.
    pub fn cubemars_ak70_10() -> Self {
        Self {
            specification: MotorSpecification {
                manufacturer: "Cubemars".to_string(),
                model: "AK70-10".to_string(),
                weight: Mass::new(0.5),
                voltage: Voltage::new(24.0),
                precision: Degrees::new(0.12),
                rated_torque: Torque::new(8.8),
                peak_torque: Torque::new(24.5),
                max_speed: AngularVelocity::new(50.0),
            },
            limits: MotorLimits {
                torque: Limits::from_values(-24.5, 24.5),
                ..MotorLimits::GENERIC
            },
        }
    }

    /// Look up a preset by model name (case-insensitive).
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "default" | "generic" => Some(Self::generic()),
            "ak70-10" | "ak70_10" | "cubemars_ak70_10" => Some(Self::cubemars_ak70_10()),
            _ => None,
        }
    }

    /// Parse and validate a JSON document.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] on malformed input, [`ConfigError::InvalidLimits`]
    /// when validation fails.
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        let info: MotorInfo = serde_json::from_str(content).map_err(|e| ConfigError::Parse {
            format: "json",
            message: e.to_string(),
        })?;
        info.validate()?;
        Ok(info)
    }

    /// Parse and validate a YAML document.
    ///
    /// # Errors
    ///
    /// Same as [`MotorInfo::from_json_str`].
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let info: MotorInfo = serde_yaml::from_str(content).map_err(|e| ConfigError::Parse {
            format: "yaml",
            message: e.to_string(),
        })?;
        info.validate()?;
        Ok(info)
    }

    /// Load from a `.json`, `.yaml` or `.yml` file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] when the file cannot be read,
    /// [`ConfigError::UnsupportedFormat`] for other extensions, plus the
    /// parse and validation errors above.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let content = std::fs::read_to_string(path)?;
        let info = match extension.as_str() {
            "json" => Self::from_json_str(&content)?,
            "yaml" | "yml" => Self::from_yaml_str(&content)?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };
        debug!(
            path = %path.display(),
            model = %info.specification.model,
            "Loaded motor configuration"
        );
        Ok(info)
    }

    /// Serialize as pretty JSON.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] if serialization fails.
    pub fn to_json_string(&self) -> ConfigResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            format: "json",
            message: e.to_string(),
        })
    }

    /// Serialize as YAML.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] if serialization fails.
    pub fn to_yaml_string(&self) -> ConfigResult<String> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::Parse {
            format: "yaml",
            message: e.to_string(),
        })
    }

    /// Every limit must be finite with `min < max`; the quantizer cannot
    /// represent an empty range.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidLimits`] naming the first offending channel.
    pub fn validate(&self) -> ConfigResult<()> {
        let l = &self.limits;
        check_limits("position", &l.position)?;
        check_limits("velocity", &l.velocity)?;
        check_limits("torque", &l.torque)?;
        check_limits("stiffness", &l.stiffness)?;
        check_limits("damper", &l.damper)?;
        Ok(())
    }
}

impl Default for MotorInfo {
    fn default() -> Self {
        Self::generic()
    }
}

fn check_limits<D>(field: &'static str, limits: &Limits<D>) -> ConfigResult<()> {
    if !(limits.min.is_finite() && limits.max.is_finite()) {
        return Err(ConfigError::InvalidLimits {
            field,
            reason: "bounds must be finite",
        });
    }
    if limits.min >= limits.max {
        return Err(ConfigError::InvalidLimits {
            field,
            reason: "min must be below max",
        });
    }
    Ok(())
}
