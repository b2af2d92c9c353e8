use serde::Deserialize;
use thiserror::Error;

use crate::geometry::{GeoPoint, GeometryError};
use crate::predict::{DEFAULT_MAX_PASS_COUNT, DEFAULT_PASS_COUNT};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid station: {0}")]
    Station(#[from] GeometryError),
    #[error("predict.default_count must be between 1 and predict.max_count ({0})")]
    DefaultCount(usize),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub station: Option<StationConfig>,
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub predict: PredictConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

/// Default observer used by `/api/station/passes`.
#[derive(Debug, Clone, Deserialize)]
pub struct StationConfig {
    pub name: Option<String>,
    pub coordinates: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictConfig {
    #[serde(default = "default_count")]
    pub default_count: usize,
    #[serde(default = "default_max_count")]
    pub max_count: usize,
    /// Fixed seed for reproducible predictions. Random when unset.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for PredictConfig {
    fn default() -> Self {
        Self {
            default_count: default_count(),
            max_count: default_max_count(),
            seed: None,
        }
    }
}

fn default_count() -> usize {
    DEFAULT_PASS_COUNT
}

fn default_max_count() -> usize {
    DEFAULT_MAX_PASS_COUNT
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)?;
        config.station()?;
        let predict = &config.predict;
        if predict.default_count == 0 || predict.default_count > predict.max_count {
            return Err(ConfigError::DefaultCount(config.predict.max_count));
        }
        Ok(config)
    }

    /// The configured station position, if any.
    pub fn station(&self) -> Result<Option<GeoPoint>, GeometryError> {
        self.station
            .as_ref()
            .map(|s| GeoPoint::from_coordinates(&s.coordinates))
            .transpose()
    }
}
