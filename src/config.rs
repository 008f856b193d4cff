use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::attitude::Compatibility;
use crate::ephemeris::BodyOrientation;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unknown encounter: {0}")]
    UnknownEncounter(String),
    #[error("encounter {encounter} targets unconfigured body {target}")]
    UnknownTarget { encounter: String, target: i32 },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub spacecraft: SpacecraftConfig,
    /// Base directory for relative data file paths.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default)]
    pub compatibility: Compatibility,
    pub bodies: Vec<BodyOrientation>,
    pub encounters: Vec<EncounterConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpacecraftConfig {
    #[serde(default = "default_spacecraft_id")]
    pub naif_id: i32,
    #[serde(default = "default_spacecraft_name")]
    pub name: String,
}

fn default_spacecraft_id() -> i32 {
    -77
}

fn default_spacecraft_name() -> String {
    "Galileo".to_string()
}

impl Default for SpacecraftConfig {
    fn default() -> Self {
        Self {
            naif_id: default_spacecraft_id(),
            name: default_spacecraft_name(),
        }
    }
}

/// Input files of one flyby.
#[derive(Debug, Clone, Deserialize)]
pub struct EncounterConfig {
    pub id: String,
    /// NAIF id of the moon.
    pub target: i32,
    /// Magnetometer table with the rotor attitude angles.
    pub attitude: PathBuf,
    /// Detector table with motor step and sector.
    pub pointing: PathBuf,
    /// Spacecraft position relative to the moon, J2000.
    pub trajectory: PathBuf,
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn from_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        for encounter in &config.encounters {
            if !config.bodies.iter().any(|b| b.naif_id == encounter.target) {
                return Err(ConfigError::UnknownTarget {
                    encounter: encounter.id.clone(),
                    target: encounter.target,
                });
            }
        }
        Ok(config)
    }

    pub fn find_encounter(&self, id: &str) -> Result<&EncounterConfig, ConfigError> {
        self.encounters
            .iter()
            .find(|e| e.id.eq_ignore_ascii_case(id))
            .ok_or_else(|| ConfigError::UnknownEncounter(id.to_string()))
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        match &self.data_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}
