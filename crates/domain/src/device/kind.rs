//! Device kinds and the attribute sets they ship with.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::attribute::{AttributeRegistry, AttributeSpec};
use crate::error::ValidationError;

/// Category of appliance. The kind decides which attributes a device
/// carries out of the box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    AirConditioner,
    Light,
    Lock,
    Scale,
    /// No canned attributes; the caller supplies the full set.
    Custom,
}

impl DeviceKind {
    /// The canned attribute set for this kind.
    ///
    /// # Errors
    ///
    /// Propagates attribute specification validation.
    pub fn default_attributes(&self) -> Result<AttributeRegistry, ValidationError> {
        let mut registry = AttributeRegistry::new();
        match self {
            Self::AirConditioner => {
                registry.insert(
                    "mode",
                    AttributeSpec::choice(["AUTO", "COOL", "HEAT", "DRY", "FAN"], "AUTO")?,
                );
                registry.insert("temperature", AttributeSpec::range(16, 30, 24)?);
                registry.insert("fan_speed", AttributeSpec::range(1, 5, 3)?);
                registry.insert("swing", AttributeSpec::bool(false));
                registry.insert("energy_saving", AttributeSpec::bool(false));
            }
            Self::Light => {
                registry.insert("luminance", AttributeSpec::range(0, 100, 50)?);
                registry.insert(
                    "color_temperature",
                    AttributeSpec::choice(["WARM", "NEUTRAL", "COOL"], "NEUTRAL")?,
                );
            }
            Self::Lock => {
                registry.insert(
                    "power_mode",
                    AttributeSpec::choice(["NORMAL", "ECO"], "NORMAL")?,
                );
                registry.insert(
                    "lock_status",
                    AttributeSpec::choice(["LOCKED", "UNLOCKED"], "LOCKED")?,
                );
            }
            Self::Scale | Self::Custom => {}
        }
        Ok(registry)
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AirConditioner => f.write_str("air_conditioner"),
            Self::Light => f.write_str("light"),
            Self::Lock => f.write_str("lock"),
            Self::Scale => f.write_str("scale"),
            Self::Custom => f.write_str("custom"),
        }
    }
}

impl FromStr for DeviceKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "air_conditioner" => Ok(Self::AirConditioner),
            "light" => Ok(Self::Light),
            "lock" => Ok(Self::Lock),
            "scale" => Ok(Self::Scale),
            "custom" => Ok(Self::Custom),
            other => Err(ValidationError::UnsupportedDeviceKind {
                kind: other.to_string(),
            }),
        }
    }
}
