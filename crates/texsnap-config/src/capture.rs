use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_output_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("texsnap").join("screen"))
        .unwrap_or_else(|| PathBuf::from("data").join("screen"))
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct CaptureConfig {
    /// Directory receiving cropped captures and service responses
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl CaptureConfig {
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = var("TEXSNAP_CAPTURE_DIR").filter(|v| !v.is_empty()) {
            self.output_dir = PathBuf::from(dir);
        }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}
