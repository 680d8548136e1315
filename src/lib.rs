//! # HackRx RAG - policy document question answering
//!
//! A retrieval-augmented-generation service: a document (local file or URL)
//! is extracted, split into sentence-aligned chunks, embedded through the
//! Gemini embedding API and indexed in an exact flat L2 index. Questions are
//! embedded, matched against the closest chunks and answered by a Gemini
//! generation model instructed to stay within the retrieved clauses.
//!
//! ## Usage
//!
//! 1. **As a server** - `hackrx serve` exposes `POST /hackrx/run`
//! 2. **As scripts** - `hackrx ingest <source>` persists an index that
//!    `hackrx query` answers from
//! 3. **As a library** - drive [`rag::pipeline::RagPipeline`] directly
//!
//! ```rust,ignore
//! use hackrx::{rag::pipeline::RagPipeline, utils::config::Config};
//!
//! let config = Config::load(None)?;
//! let pipeline = RagPipeline::from_config(&config, config.google_api_key()?)?;
//! let index = pipeline.ingest("https://example.com/policy.pdf").await?;
//! let answer = pipeline.answer("What is the grace period?", &index).await?;
//! ```
//!
//! ## Modules
//!
//! - [`api`] - REST API handlers and routes
//! - [`auth`] - Static bearer-token middleware
//! - [`cli`] - Command-line interface
//! - [`llm`] - Generation model clients
//! - [`rag`] - Extraction, chunking, embeddings, indexing, retrieval, answering
//! - [`types`] - Request/response types and error handling
//! - [`utils`] - Configuration

#![cfg_attr(docsrs, feature(doc_cfg))]

/// HTTP API handlers and routes.
pub mod api;
/// Bearer-token authentication middleware.
pub mod auth;
/// Command-line interface.
pub mod cli;
/// LLM provider clients and abstractions.
pub mod llm;
/// Retrieval Augmented Generation (RAG) components.
pub mod rag;
/// Core types (requests, responses, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use llm::LLMClient;
pub use rag::pipeline::RagPipeline;
pub use types::{AppError, Result};
pub use utils::config::Config;

use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<Config>,
    /// Ingestion and answering pipeline
    pub pipeline: Arc<RagPipeline>,
    /// Secret expected in `Authorization: Bearer <token>`
    pub bearer_token: Arc<str>,
}
