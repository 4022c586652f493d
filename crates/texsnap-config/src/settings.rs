//! Persistent key/value settings, used for the service token

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Key the service token is stored under
pub const TOKEN_KEY: &str = "DEFAULT/token";

/// `TEXSNAP_SETTINGS`, else `<config dir>/texsnap/settings.json`
pub fn default_settings_path() -> PathBuf {
    if let Ok(path) = env::var("TEXSNAP_SETTINGS") {
        return PathBuf::from(path);
    }

    dirs::config_dir()
        .map(|dir| dir.join("texsnap"))
        .unwrap_or_default()
        .join("settings.json")
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to read settings {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Invalid settings {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to write settings {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl SettingsStore {
    /// Load the store at `path`; a missing file is an empty store
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();

        let values = match fs::read_to_string(&path) {
            Ok(data) => serde_json::from_str(&data).map_err(|source| SettingsError::Parse {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("No settings at {}, starting empty", path.display());
                BTreeMap::new()
            }
            Err(source) => return Err(SettingsError::Read { path, source }),
        };

        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    /// Stored token, ignoring an empty value
    pub fn token(&self) -> Option<&str> {
        self.get(TOKEN_KEY).filter(|t| !t.trim().is_empty())
    }

    pub fn save(&self) -> Result<(), SettingsError> {
        let write_err = |source| SettingsError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let data = serde_json::to_string_pretty(&self.values).map_err(|source| {
            SettingsError::Parse {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, data).map_err(write_err)?;

        tracing::info!("Saved settings to {}", self.path.display());
        Ok(())
    }
}
