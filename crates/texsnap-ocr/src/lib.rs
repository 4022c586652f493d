mod simpletex;

use texsnap_core::ParseError;
use texsnap_types::Recognition;

pub use simpletex::{SimpleTexClient, parse_response};

/// Formula recognition provider interface
#[async_trait::async_trait]
pub trait FormulaRecognizer: Send + Sync {
    /// Recognize the formula in a PNG image
    async fn recognize(&self, png: &[u8], file_name: &str)
    -> Result<RecognitionResponse, OcrError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct RecognitionResponse {
    pub recognition: Recognition,
    /// Service response as received, kept for saving next to the capture
    pub raw: serde_json::Value,
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub requires_token: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("No API token configured")]
    MissingToken,

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid confidence: {0}")]
    Confidence(#[from] ParseError),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,
}
