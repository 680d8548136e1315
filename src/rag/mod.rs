//! Retrieval Augmented Generation (RAG) pipeline over policy documents.
//!
//! # Module Structure
//!
//! - [`rag::extractor`](crate::rag::extractor) - PDF / DOCX / MSG text extraction from paths or URLs
//! - [`rag::chunker`](crate::rag::chunker) - Sentence-aligned chunking
//! - [`rag::embeddings`](crate::rag::embeddings) - Gemini embeddings and bounded parallel fan-out
//! - [`rag::indexer`](crate::rag::indexer) - Flat L2 chunk index with persist / load
//! - [`rag::search`](crate::rag::search) - Nearest-chunk retrieval
//! - [`rag::answer`](crate::rag::answer) - Prompt construction and answer generation
//! - [`rag::pipeline`](crate::rag::pipeline) - Orchestration used by the server and the CLI
//!
//! # Example
//!
//! ```ignore
//! use hackrx::rag::pipeline::RagPipeline;
//!
//! let pipeline = RagPipeline::from_config(&config, api_key)?;
//! let index = pipeline.ingest("data/policy.pdf").await?;
//! let answer = pipeline.answer("What is the grace period?", &index).await?;
//! ```

pub mod answer;
pub mod chunker;
pub mod embeddings;
pub mod extractor;
pub mod indexer;
pub mod pipeline;
pub mod search;

pub use answer::{build_prompt, Answerer, FALLBACK_ANSWER};
pub use chunker::{Chunk, TextChunker};
pub use embeddings::{embed_many, Embedder, GeminiEmbedder};
pub use extractor::{DocumentFormat, Extractor};
pub use indexer::{ChunkIndex, IndexPaths};
pub use pipeline::{PipelineOptions, RagPipeline};
pub use search::{search, SearchHits};
