use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::AdviceGenerator;
use crate::config::GeminiConfig;
use crate::error::{ProviderError, ProviderErrorKind, Result, ShambaOpsError};

const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const SERVICE: &str = "gemini";
// Generation is slower than a forecast fetch; give it more room.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct GeminiClient {
    client: reqwest::Client,
    config: GeminiConfig,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        Self::with_base_url(config, API_BASE_URL.to_string())
    }

    /// Custom base URL, for pointing tests at a stub server.
    pub fn with_base_url(config: GeminiConfig, base_url: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ShambaOpsError::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            config,
            base_url,
        })
    }
}

impl AdviceGenerator for GeminiClient {
    /// Run one text completion and return the joined candidate text.
    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.config.model, self.config.api_key
        );
        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::new(
                SERVICE,
                status_kind(status),
                format!("{}: {}", status, body),
            )
            .into());
        }

        let generated: GenerateResponse = response.json().await.map_err(|e| {
            ProviderError::new(
                SERVICE,
                ProviderErrorKind::Unknown,
                format!("failed to parse generation response: {}", e),
            )
        })?;

        let text = generated
            .candidates
            .first()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .iter()
                    .map(|part| part.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(ProviderError::new(
                SERVICE,
                ProviderErrorKind::Unknown,
                "generation returned no candidates",
            )
            .into());
        }

        Ok(text)
    }
}

fn status_kind(status: reqwest::StatusCode) -> ProviderErrorKind {
    match status.as_u16() {
        401 | 403 => ProviderErrorKind::Auth,
        404 => ProviderErrorKind::NotFound,
        429 => ProviderErrorKind::RateLimited,
        500..=599 => ProviderErrorKind::Server,
        _ => ProviderErrorKind::Unknown,
    }
}

fn transport_error(e: reqwest::Error) -> ShambaOpsError {
    let kind = if e.is_timeout() {
        ProviderErrorKind::Timeout
    } else {
        ProviderErrorKind::Unknown
    };
    ProviderError::new(SERVICE, kind, e.to_string()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forbidden_and_unauthorized_both_map_to_auth() {
        use reqwest::StatusCode;
        assert_eq!(status_kind(StatusCode::UNAUTHORIZED), ProviderErrorKind::Auth);
        assert_eq!(status_kind(StatusCode::FORBIDDEN), ProviderErrorKind::Auth);
        assert_eq!(
            status_kind(StatusCode::BAD_REQUEST),
            ProviderErrorKind::Unknown
        );
    }

    #[test]
    fn candidate_parts_join_into_one_text() {
        let raw = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "{\"a\":"}, {"text": "1}"}]}}
            ]
        }"#;
        let response: GenerateResponse = serde_json::from_str(raw).unwrap();
        let text: String = response.candidates[0]
            .content
            .parts
            .iter()
            .map(|p| p.text.as_str())
            .collect();
        assert_eq!(text, "{\"a\":1}");
    }
}
