use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bevy::prelude::*;
use flight::FlightTunables;
use rocket_boost::{LevelSet, RocketBoostSettings};
use serde::Deserialize;

/// Feature flag that turns on the level-skip and collision-toggle keys.
pub const DEBUG_KEYS_FLAG: &str = "debug_keys";

#[derive(Resource, Clone, Debug, Default, Deserialize)]
pub struct RuntimeConfig {
    /// TOML file with flight tunables; built-in values when absent.
    #[serde(default)]
    pub tunables_path: Option<PathBuf>,
    /// TOML file with the level list; built-in levels when absent.
    #[serde(default)]
    pub levels_path: Option<PathBuf>,
    /// Asset folder with the engine, death and success clips; silent when absent.
    #[serde(default)]
    pub sounds_dir: Option<String>,
    #[serde(default)]
    pub feature_flags: HashMap<String, bool>,
}

impl RuntimeConfig {
    pub fn from_json_str(source: &str) -> Result<Self> {
        serde_json::from_str(source).context("malformed runtime config")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json_str(&contents)
    }

    /// Read `config.json` from the working directory, defaulting on failure.
    pub fn load_sync() -> Self {
        match Self::load("config.json") {
            Ok(config) => config,
            Err(err) => {
                log::warn!("using default runtime config: {err:#}");
                Self::default()
            }
        }
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        self.feature_flags.get(name).copied()
    }

    /// Resolve the module settings this config points at.
    pub fn settings(&self) -> Result<RocketBoostSettings> {
        let mut tunables = match &self.tunables_path {
            Some(path) => FlightTunables::load(path)?,
            None => FlightTunables::default(),
        };
        if let Some(enabled) = self.flag(DEBUG_KEYS_FLAG) {
            tunables.debug_keys = enabled;
        }
        let levels = match &self.levels_path {
            Some(path) => LevelSet::load(path)?,
            None => LevelSet::builtin(),
        };
        Ok(RocketBoostSettings {
            tunables,
            levels,
            sounds_dir: self.sounds_dir.clone(),
        })
    }
}
