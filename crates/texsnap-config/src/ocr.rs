use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "https://server.simpletex.cn/api/latex_ocr";

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_save_response() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct OcrConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Takes precedence over the token in the settings store
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Keep the raw service response as JSON next to the capture
    #[serde(default = "default_save_response")]
    pub save_response: bool,
}

impl OcrConfig {
    /// `TEXSNAP_API_URL`, `TEXSNAP_TOKEN` and `TEXSNAP_TIMEOUT_SECONDS` win over
    /// whatever the defaults or a config file set
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(api_url) = var("TEXSNAP_API_URL").filter(|v| !v.is_empty()) {
            self.api_url = api_url;
        }

        if let Some(token) = var("TEXSNAP_TOKEN").filter(|t| !t.is_empty()) {
            self.token = Some(token);
        }

        match var("TEXSNAP_TIMEOUT_SECONDS").map(|v| v.parse::<u64>()) {
            Some(Ok(timeout_seconds)) => self.timeout_seconds = timeout_seconds,
            Some(Err(e)) => tracing::warn!("Ignoring TEXSNAP_TIMEOUT_SECONDS: {}", e),
            None => {}
        }
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            token: None,
            timeout_seconds: default_timeout_seconds(),
            save_response: default_save_response(),
        }
    }
}
