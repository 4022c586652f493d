use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use self::capture::CaptureConfig;
use self::editor::EditorConfig;
use self::ocr::OcrConfig;

pub mod capture;
pub mod editor;
pub mod ocr;
pub mod settings;

pub use settings::{SettingsError, SettingsStore, TOKEN_KEY};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ocr: OcrConfig,
    pub capture: CaptureConfig,
    pub editor: EditorConfig,
    /// Where the token settings live, `None` for the platform default
    pub settings_path: Option<PathBuf>,
    /// Capacity of the front-end to app channel
    pub request_queue: usize,
}

impl Config {
    /// Defaults with environment overrides applied
    pub fn new() -> Self {
        let mut config = Config {
            ocr: OcrConfig::default(),
            capture: CaptureConfig::default(),
            editor: EditorConfig::default(),
            settings_path: None,
            request_queue: 64,
        };
        config.apply_env(|key| env::var(key).ok());
        config
    }

    /// File contents with environment overrides applied on top

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Config =
            serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.apply_env(|key| env::var(key).ok());

        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        self.ocr.apply_env(&var);
        self.capture.apply_env(&var);
    }

    pub fn settings_path(&self) -> PathBuf {
        self.settings_path
            .clone()
            .unwrap_or_else(settings::default_settings_path)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}
