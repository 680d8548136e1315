use crate::llm::client::LLMClient;
use crate::types::{AppError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Build a shared HTTP client for the Generative Language API.
pub fn http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))
}

/// Turn a non-success Generative Language response into a readable message.
pub(crate) fn api_error(status: StatusCode, body: &str) -> String {
    #[derive(Deserialize)]
    struct Envelope {
        error: Detail,
    }

    #[derive(Deserialize)]
    struct Detail {
        message: String,
    }

    match serde_json::from_str::<Envelope>(body) {
        Ok(envelope) => format!("{} ({})", envelope.error.message, status),
        Err(_) => format!("{}: {}", status, body.trim()),
    }
}

#[derive(Serialize)]
pub(crate) struct Part<'a> {
    pub text: &'a str,
}

#[derive(Serialize)]
pub(crate) struct Content<'a> {
    pub parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// Gemini `generateContent` client.
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(client: Client, api_base: &str, api_key: String, model: String) -> Self {
        let endpoint = format!(
            "{}/v1beta/models/{}:generateContent",
            api_base.trim_end_matches('/'),
            model.trim_start_matches("models/")
        );

        Self {
            client,
            endpoint,
            api_key,
            model,
        }
    }
}

#[async_trait]
impl LLMClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::LLM(format!("Gemini request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::LLM(format!("Failed to read Gemini response: {}", e)))?;

        if !status.is_success() {
            return Err(AppError::LLM(format!(
                "Gemini API error: {}",
                api_error(status, &body)
            )));
        }

        let parsed: GenerateResponse = serde_json::from_str(&body)
            .map_err(|e| AppError::LLM(format!("Invalid Gemini response: {}", e)))?;

        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| content.parts.into_iter().map(|p| p.text).collect())
            .ok_or_else(|| AppError::LLM("No response from Gemini".to_string()))?;

        Ok(text.trim().to_string())
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_strips_models_prefix() {
        let client = GeminiClient::new(
            Client::new(),
            "https://example.test/",
            "k".into(),
            "models/gemini-1.5-flash".into(),
        );
        assert_eq!(
            client.endpoint,
            "https://example.test/v1beta/models/gemini-1.5-flash:generateContent"
        );
        assert_eq!(client.model_name(), "models/gemini-1.5-flash");
    }

    #[test]
    fn test_api_error_uses_message_field() {
        let body = r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#;
        let message = api_error(StatusCode::BAD_REQUEST, body);
        assert!(message.starts_with("API key not valid"));
    }

    #[test]
    fn test_api_error_falls_back_to_body() {
        let message = api_error(StatusCode::BAD_GATEWAY, "upstream down\n");
        assert!(message.contains("502"));
        assert!(message.ends_with("upstream down"));
    }
}
