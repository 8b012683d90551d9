use std::path::{Path, PathBuf};

use clap::ValueEnum;
use enrollstat_eval::DEFAULT_MEDIAN_THRESHOLD;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "enrollstat.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub schools_path: PathBuf,
    pub enrollments_path: PathBuf,
    pub median_threshold: u32,
    pub format: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schools_path: PathBuf::from("data/schools.csv"),
            enrollments_path: PathBuf::from("data/enrollments.json"),
            median_threshold: DEFAULT_MEDIAN_THRESHOLD,
            format: OutputFormat::Text,
        }
    }
}

/// Load settings from an explicit path, the default file, or defaults.
///
/// An explicit path must exist; the default file is optional.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings, ConfigError> {
    let path = match explicit {
        Some(path) if !path.exists() => return Err(ConfigError::NotFound(path.to_path_buf())),
        Some(path) => path.to_path_buf(),
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !path.exists() {
                return Ok(Settings::default());
            }
            path
        }
    };

    let content = std::fs::read_to_string(&path)?;
    parse_settings(&content)
}

pub fn parse_settings(content: &str) -> Result<Settings, ConfigError> {
    Ok(toml::from_str(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let settings = parse_settings("median_threshold = 450\nformat = \"json\"\n")
            .expect("parse settings");
        assert_eq!(settings.median_threshold, 450);
        assert_eq!(settings.format, OutputFormat::Json);
        assert_eq!(settings.schools_path, PathBuf::from("data/schools.csv"));
    }

    #[test]
    fn rejects_unknown_format() {
        let err = parse_settings("format = \"xml\"\n").expect_err("unknown format");
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = load_settings(Some(Path::new("does/not/exist.toml"))).expect_err("missing");
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
