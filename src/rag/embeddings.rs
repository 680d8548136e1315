//! Text embeddings via the Gemini `embedContent` endpoint.

use crate::llm::gemini::{api_error, Content, Part};
use crate::types::{AppError, Result};
use async_trait::async_trait;
use futures::{stream, StreamExt, TryStreamExt};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

/// Turns a piece of text into a dense vector.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    fn model_name(&self) -> &str;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbedRequest<'a> {
    model: &'a str,
    content: Content<'a>,
    task_type: &'a str,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embedding: EmbeddingValues,
}

#[derive(Deserialize)]
struct EmbeddingValues {
    values: Vec<f32>,
}

/// Gemini embedding client. Vectors are returned exactly as the API sends them.
pub struct GeminiEmbedder {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    task_type: String,
}

impl GeminiEmbedder {
    pub fn new(
        client: Client,
        api_base: &str,
        api_key: String,
        model: &str,
        task_type: String,
    ) -> Self {
        let model = if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{}", model)
        };
        let endpoint = format!(
            "{}/v1beta/{}:embedContent",
            api_base.trim_end_matches('/'),
            model
        );

        Self {
            client,
            endpoint,
            api_key,
            model,
            task_type,
        }
    }
}

#[async_trait]
impl Embedder for GeminiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let request = EmbedRequest {
            model: &self.model,
            content: Content {
                parts: vec![Part { text }],
            },
            task_type: &self.task_type,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Embedding(format!("Embedding request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::Embedding(format!("Failed to read embedding response: {}", e)))?;

        if !status.is_success() {
            return Err(AppError::Embedding(format!(
                "Gemini API error: {}",
                api_error(status, &body)
            )));
        }

        let parsed: EmbedResponse = serde_json::from_str(&body)
            .map_err(|e| AppError::Embedding(format!("Invalid embedding response: {}", e)))?;

        Ok(parsed.embedding.values)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Embed every text with at most `workers` requests in flight.
///
/// Output order matches input order. The first failure aborts the batch and
/// requests still pending are dropped; nothing is retried.
pub async fn embed_many(
    embedder: &dyn Embedder,
    texts: &[String],
    workers: usize,
) -> Result<Vec<Vec<f32>>> {
    let start = Instant::now();

    // Boxed futures are collected up front so the stream is Send for any lifetime.
    let pending: Vec<_> = texts.iter().map(|text| embedder.embed(text)).collect();
    let vectors: Vec<Vec<f32>> = stream::iter(pending)
        .buffered(workers.max(1))
        .try_collect()
        .await?;

    debug!(
        count = vectors.len(),
        workers,
        model = embedder.model_name(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Embedded batch"
    );

    Ok(vectors)
}
