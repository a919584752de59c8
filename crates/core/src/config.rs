//! Application settings shared by the native, terminal and browser front-ends.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::{MockPreset, MockSpec};

/// Env var naming a JSON config file for the native binaries.
pub const CONFIG_ENV: &str = "EEG_CLOUD_CONFIG";

const MAX_SAMPLES: usize = 100_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub preset: MockPreset,
    pub sample_count: usize,
    pub sampling_rate_hz: f64,
    /// Fixed RNG seed; entropy when absent.
    pub seed: Option<u64>,
    pub theme: ThemePreference,
    /// Side of the star glyph canvas in pixels.
    pub glyph_size: f64,
    /// `error`, `warn`, `info`, `debug` or `trace`.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            preset: MockPreset::FourChannel,
            sample_count: 60,
            sampling_rate_hz: 1.0,
            seed: None,
            theme: ThemePreference::Dark,
            glyph_size: 500.0,
            log_level: "info".into(),
        }
    }
}

impl AppConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The file named by `EEG_CLOUD_CONFIG`, or defaults when it is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(PathBuf::from(path)),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_count == 0 || self.sample_count > MAX_SAMPLES {
            return Err(ConfigError::Invalid(format!(
                "sample_count must be in 1..={MAX_SAMPLES}, got {}",
                self.sample_count
            )));
        }
        if !(self.sampling_rate_hz.is_finite() && self.sampling_rate_hz > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "sampling_rate_hz must be positive, got {}",
                self.sampling_rate_hz
            )));
        }
        if !(self.glyph_size.is_finite() && self.glyph_size >= 50.0) {
            return Err(ConfigError::Invalid(format!(
                "glyph_size must be at least 50, got {}",
                self.glyph_size
            )));
        }
        if self.log_level().is_none() {
            return Err(ConfigError::Invalid(format!(
                "unknown log_level {:?}",
                self.log_level
            )));
        }
        Ok(())
    }

    pub fn log_level(&self) -> Option<log::LevelFilter> {
        self.log_level.parse().ok()
    }

    /// Generator parameters for the configured preset.
    pub fn mock_spec(&self) -> MockSpec {
        self.preset.spec(self.sample_count, self.sampling_rate_hz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg = AppConfig::from_json(r#"{"seed": 7, "theme": "light"}"#).expect("config");
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.theme, ThemePreference::Light);
        assert_eq!(cfg.sample_count, 60);
        assert_eq!(cfg.log_level(), Some(log::LevelFilter::Info));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            AppConfig::from_json(r#"{"sample_count": 0}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            AppConfig::from_json(r#"{"log_level": "chatty"}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            AppConfig::from_json("{"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn load_and_save_round_trip() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"preset": "six-channel", "sample_count": 30}}"#).expect("write");
        let cfg = AppConfig::load(file.path()).expect("load");
        assert_eq!(cfg.preset, MockPreset::SixChannel);
        assert_eq!(cfg.mock_spec().rows, 30);
        assert_eq!(cfg.mock_spec().channels.len(), 6);

        let dir = tempfile::tempdir().expect("temp dir");
        let out = dir.path().join("config.json");
        cfg.save(&out).expect("save");
        assert_eq!(AppConfig::load(&out).expect("reload"), cfg);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = AppConfig::load("/nonexistent/eeg-cloud.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/eeg-cloud.json"));
    }
}
