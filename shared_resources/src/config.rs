use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE_PATH: &str = "config.json";
const FALLBACK_CONFIG_FILE_PATH: &str = "_config.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed config file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("the top floor must be at least 1")]
    InvalidTopFloor,
    #[error("the time unit must be longer than 0 ms")]
    InvalidTimeUnit,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ElevatorConfig {
    /// Unset means the operator is asked for it at startup.
    pub top_floor: Option<u8>,
}

/// Durations of the simulated cabin, counted in time units.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TimingConfig {
    pub unit_ms: u64,
    pub travel_units: u32,
    pub door_units: u32,
    pub dwell_units: u32,
    pub idle_wait_units: u32,
    pub busy_wait_units: u32,
    pub poll_units: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            unit_ms: 1000,
            travel_units: 3,
            door_units: 1,
            dwell_units: 10,
            idle_wait_units: 30,
            busy_wait_units: 10,
            poll_units: 1,
        }
    }
}

impl TimingConfig {
    pub fn unit(&self) -> Duration {
        Duration::from_millis(self.unit_ms)
    }

    pub fn with_unit(unit_ms: u64) -> Self {
        TimingConfig {
            unit_ms: unit_ms,
            ..TimingConfig::default()
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub elevator: ElevatorConfig,
    pub timing: TimingConfig,
}

impl Config {
    /// Reads `path` when given. Otherwise tries `config.json`, then
    /// `_config.json`, and falls back to built-in defaults.
    pub fn read(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_json(&read_file(path)?)?,
            None => match read_default_file()? {
                Some(contents) => Self::from_json(&contents)?,
                None => Config::default(),
            },
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.elevator.top_floor == Some(0) {
            return Err(ConfigError::InvalidTopFloor);
        }
        if self.timing.unit_ms == 0 {
            return Err(ConfigError::InvalidTimeUnit);
        }
        Ok(())
    }
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source: source,
    })
}

fn read_default_file() -> Result<Option<String>, ConfigError> {
    for file_path in [CONFIG_FILE_PATH, FALLBACK_CONFIG_FILE_PATH] {
        match fs::read_to_string(file_path) {
            Ok(content) => return Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
            Err(e) => return Err(ConfigError::Io { path: PathBuf::from(file_path), source: e }),
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sections_use_defaults() {
        let config = Config::from_json(r#"{ "elevator": { "top_floor": 7 } }"#).unwrap();
        assert_eq!(config.elevator.top_floor, Some(7));
        assert_eq!(config.timing, TimingConfig::default());
    }

    #[test]
    fn partial_timing_keeps_other_defaults() {
        let config = Config::from_json(r#"{ "timing": { "unit_ms": 5, "dwell_units": 2 } }"#).unwrap();
        assert_eq!(config.timing.unit(), Duration::from_millis(5));
        assert_eq!(config.timing.dwell_units, 2);
        assert_eq!(config.timing.travel_units, 3);
        assert_eq!(config.elevator.top_floor, None);
    }

    #[test]
    fn rejects_zero_top_floor_and_zero_unit() {
        let config = Config::from_json(r#"{ "elevator": { "top_floor": 0 } }"#).unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidTopFloor)));

        let config = Config::from_json(r#"{ "timing": { "unit_ms": 0 } }"#).unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidTimeUnit)));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let result = Config::read(Some(Path::new("definitely/not/here.json")));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(Config::from_json("{ nope"), Err(ConfigError::Json(_))));
    }
}
