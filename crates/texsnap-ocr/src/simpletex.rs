use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use texsnap_core::confidence_from_json;
use texsnap_types::Recognition;

use crate::{FormulaRecognizer, OcrError, ProviderMetadata, RecognitionResponse};

/// Client for the SimpleTex `latex_ocr` endpoint
#[derive(Clone)]
pub struct SimpleTexClient {
    client: reqwest::Client,
    api_url: String,
    token: String,
}

impl SimpleTexClient {
    pub fn new(
        api_url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, OcrError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_url: api_url.into(),
            token: token.into(),
        })
    }
}

#[async_trait]
impl FormulaRecognizer for SimpleTexClient {
    async fn recognize(
        &self,
        png: &[u8],
        file_name: &str,
    ) -> Result<RecognitionResponse, OcrError> {
        if self.token.trim().is_empty() {
            return Err(OcrError::MissingToken);
        }

        let part = Part::bytes(png.to_vec())
            .file_name(file_name.to_string())
            .mime_str("image/png")?;
        let form = Form::new().part("file", part);

        tracing::info!(
            "Uploading {} ({} bytes) to {}",
            file_name,
            png.len(),
            self.api_url
        );

        let response = self
            .client
            .post(&self.api_url)
            .header("token", &self.token)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Service answered {}", status);

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(OcrError::RateLimitExceeded);
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(OcrError::AuthenticationError);
        }

        if !status.is_success() {
            return Err(OcrError::ApiError(format!("HTTP {}", status)));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| OcrError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        parse_response(body)
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "SimpleTex".to_string(),
            requires_token: true,
        }
    }
}

/// Decode `{"status": bool, "res": {"latex": .., "conf": ..}, "request_id": ..}`
pub fn parse_response(body: Value) -> Result<RecognitionResponse, OcrError> {
    if body.get("status").and_then(Value::as_bool) == Some(false) {
        let message = body
            .get("message")
            .or_else(|| body.get("err_info"))
            .and_then(Value::as_str)
            .unwrap_or("request rejected");
        return Err(OcrError::ApiError(message.to_string()));
    }

    let res = body
        .get("res")
        .ok_or_else(|| OcrError::InvalidResponse("missing `res`".to_string()))?;

    let latex = res
        .get("latex")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| OcrError::InvalidResponse("missing `res.latex`".to_string()))?;

    let confidence = confidence_from_json(res.get("conf").unwrap_or(&Value::Null))?;

    let request_id = body
        .get("request_id")
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(RecognitionResponse {
        recognition: Recognition {
            latex,
            confidence,
            request_id,
        },
        raw: body,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use texsnap_core::ParseError;

    use super::*;

    #[test]
    fn test_parse_success() {
        let body = json!({
            "status": true,
            "res": { "latex": "\\frac{1}{2}", "conf": 0.93 },
            "request_id": "tr_123"
        });

        let response = parse_response(body.clone()).unwrap();
        assert_eq!(response.recognition.latex, "\\frac{1}{2}");
        assert_eq!(response.recognition.confidence, 0.93);
        assert_eq!(response.recognition.request_id.as_deref(), Some("tr_123"));
        assert_eq!(response.raw, body);
    }

    #[test]
    fn test_parse_string_confidence() {
        let body = json!({ "status": true, "res": { "latex": "x", "conf": "0.5" } });
        let response = parse_response(body).unwrap();
        assert_eq!(response.recognition.confidence, 0.5);
        assert_eq!(response.recognition.request_id, None);
    }

    #[test]
    fn test_parse_rejected_request() {
        let body = json!({ "status": false, "message": "token invalid" });
        match parse_response(body) {
            Err(OcrError::ApiError(message)) => assert_eq!(message, "token invalid"),
            other => panic!("unexpected result: {:?}", other.map(|r| r.recognition)),
        }
    }

    #[test]
    fn test_parse_missing_fields() {
        assert!(matches!(
            parse_response(json!({ "status": true })),
            Err(OcrError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_response(json!({ "res": { "conf": 0.4 } })),
            Err(OcrError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_parse_bad_confidence() {
        let body = json!({ "status": true, "res": { "latex": "x", "conf": "1/0" } });
        assert!(matches!(
            parse_response(body),
            Err(OcrError::Confidence(ParseError::NotANumber(_)))
        ));
    }

    #[tokio::test]
    async fn test_missing_token_fails_before_upload() {
        let client =
            SimpleTexClient::new("http://127.0.0.1:9/unused", "  ", Duration::from_secs(1))
                .unwrap();

        assert!(matches!(
            client.recognize(&[0u8; 4], "screen.png").await,
            Err(OcrError::MissingToken)
        ));
        assert!(client.metadata().requires_token);
    }
}
