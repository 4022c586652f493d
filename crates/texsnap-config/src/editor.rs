use serde::{Deserialize, Serialize};
use texsnap_types::InsertMode;

fn default_formula_delimiter() -> String {
    "$$".to_string()
}

fn default_text() -> String {
    "## New document".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct EditorConfig {
    #[serde(default = "default_formula_delimiter")]
    pub formula_delimiter: String,
    #[serde(default)]
    pub insert_mode: InsertMode,
    /// Content of a document that was not opened from disk
    #[serde(default = "default_text")]
    pub default_text: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            formula_delimiter: default_formula_delimiter(),
            insert_mode: InsertMode::default(),
            default_text: default_text(),
        }
    }
}
