use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::FlightError;
use crate::level::FailurePolicy;

/// Named tunables supplied to every craft at construction.
///
/// All fields default, so an empty TOML document is a valid configuration:
///
/// ```toml
/// main_thrust = 30.0
/// rotation_rate = 150.0
/// level_load_delay = 1.0
/// failure_policy = "step_back"
/// debug_keys = true
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FlightTunables {
    /// Force applied along the craft's up axis while thrust is held.
    pub main_thrust: f32,
    /// Manual rotation speed in degrees per second.
    pub rotation_rate: f32,
    /// Seconds between a completed/failed level and the next scene load.
    pub level_load_delay: f32,
    /// Level index update applied when the craft crashes.
    pub failure_policy: FailurePolicy,
    /// Enables the level-skip and collision-toggle keys.
    pub debug_keys: bool,
}

impl Default for FlightTunables {
    fn default() -> Self {
        Self {
            main_thrust: 30.0,
            rotation_rate: 150.0,
            level_load_delay: 1.0,
            failure_policy: FailurePolicy::default(),
            debug_keys: false,
        }
    }
}

impl FlightTunables {
    /// Parse and validate tunables from a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, FlightError> {
        let tunables: Self = toml::from_str(source)?;
        tunables.validate()?;
        Ok(tunables)
    }

    /// Read tunables from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FlightError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| FlightError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Reject values the controller cannot act on.
    pub fn validate(&self) -> Result<(), FlightError> {
        for (name, value) in [
            ("main_thrust", self.main_thrust),
            ("rotation_rate", self.rotation_rate),
            ("level_load_delay", self.level_load_delay),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(FlightError::InvalidTunable { name, value });
            }
        }
        if Duration::try_from_secs_f32(self.level_load_delay).is_err() {
            return Err(FlightError::InvalidTunable {
                name: "level_load_delay",
                value: self.level_load_delay,
            });
        }
        Ok(())
    }

    /// The load delay as a [`Duration`]; out-of-range values saturate.
    pub fn load_delay(&self) -> Duration {
        Duration::try_from_secs_f32(self.level_load_delay).unwrap_or(Duration::MAX)
    }
}
