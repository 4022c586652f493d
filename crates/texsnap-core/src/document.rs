use std::fs;
use std::path::{Path, PathBuf};

use texsnap_types::InsertMode;

use crate::error::DocumentError;

/// Suffix added by `save_as` when the target has no extension
pub const DEFAULT_SUFFIX: &str = "md";

/// Markdown buffer that recognized formulas are written into
#[derive(Debug, Clone)]
pub struct Document {
    text: String,
    path: Option<PathBuf>,
    modified: bool,
}

impl Document {
    pub fn new(default_text: impl Into<String>) -> Self {
        Self {
            text: default_text.into(),
            path: None,
            modified: false,
        }
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| DocumentError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!("Opened {}", path.display());
        Ok(Self {
            text,
            path: Some(path.to_path_buf()),
            modified: false,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Target for the next `save`
    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = Some(path.into());
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.text {
            self.text = text;
            self.modified = true;
        }
    }

    /// Wrap `latex` in `delimiter` on both sides and put it into the buffer
    pub fn insert_formula(&mut self, latex: &str, delimiter: &str, mode: InsertMode) {
        let formula = format!("{delimiter}{}{delimiter}", latex.trim());
        let text = match mode {
            InsertMode::Replace => formula,
            InsertMode::Append if self.text.trim().is_empty() => formula,
            InsertMode::Append => format!("{}\n\n{}\n", self.text.trim_end(), formula),
        };
        self.set_text(text);
    }

    pub fn save(&mut self) -> Result<PathBuf, DocumentError> {
        let path = self.path.clone().ok_or(DocumentError::NoPath)?;

        fs::write(&path, self.text.as_bytes()).map_err(|source| DocumentError::Write {
            path: path.clone(),
            source,
        })?;

        self.modified = false;
        tracing::info!("Wrote {}", path.display());
        Ok(path)
    }

    pub fn save_as(&mut self, path: impl AsRef<Path>) -> Result<PathBuf, DocumentError> {
        let mut path = path.as_ref().to_path_buf();
        if path.extension().is_none() {
            path.set_extension(DEFAULT_SUFFIX);
        }
        self.path = Some(path);
        self.save()
    }
}
