use std::env;
use std::path::{Path, PathBuf};

use anyhow::Context;
use texsnap_config::{Config, SettingsStore};
use texsnap_core::Document;

/// Config from `path`, `TEXSNAP_CONFIG`, or defaults with env overrides
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let path = path
        .map(Path::to_path_buf)
        .or_else(|| env::var("TEXSNAP_CONFIG").ok().map(PathBuf::from));

    match path {
        Some(path) => Ok(Config::from_file(&path)?),
        None => {
            tracing::debug!("No config file, using defaults");
            Ok(Config::new())
        }
    }
}

pub fn load_settings(config: &Config) -> anyhow::Result<SettingsStore> {
    let path = config.settings_path();
    SettingsStore::load(&path).with_context(|| format!("Failed to load settings {}", path.display()))
}

/// Configured token first, then the one saved in settings.
/// The settings store is only read when the config has no token.
pub fn resolve_token(config: &Config) -> anyhow::Result<Option<String>> {
    if let Some(token) = config.ocr.token.as_deref().filter(|t| !t.trim().is_empty()) {
        return Ok(Some(token.to_string()));
    }

    let settings = load_settings(config)?;
    Ok(settings.token().map(str::to_string))
}

/// Open `path` as the working document, or start a fresh one
pub fn load_document(path: Option<&Path>, config: &Config) -> anyhow::Result<Document> {
    match path {
        Some(path) if path.exists() => Ok(Document::open(path)?),
        Some(path) => {
            tracing::info!("{} does not exist yet, starting a new document", path.display());
            let mut document = Document::new(config.editor.default_text.clone());
            document.set_path(path);
            Ok(document)
        }
        None => Ok(Document::new(config.editor.default_text.clone())),
    }
}

/// Mask all but the last four characters
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    let visible = chars.len().saturating_sub(4);
    chars
        .iter()
        .enumerate()
        .map(|(i, c)| if i < visible { '*' } else { *c })
        .collect()
}
