#![allow(dead_code)]

pub mod fixtures;
pub mod mocks;

use hackrx::rag::extractor::Extractor;
use hackrx::rag::pipeline::{PipelineOptions, RagPipeline};
use mocks::{MockEmbedder, MockLLMClient};
use std::sync::Arc;

/// Chunk size small enough to split the two-topic policy per sentence pair.
pub const TEST_CHUNK_SIZE: usize = 170;

pub fn test_options() -> PipelineOptions {
    PipelineOptions {
        chunk_size: TEST_CHUNK_SIZE,
        top_k: 1,
        workers: 2,
    }
}

/// Pipeline wired to the given mocks and a real HTTP client.
pub fn mock_pipeline(
    embedder: Arc<MockEmbedder>,
    llm: Arc<MockLLMClient>,
    options: PipelineOptions,
) -> RagPipeline {
    RagPipeline::new(
        Extractor::new(reqwest::Client::new()),
        embedder,
        llm,
        options,
    )
}
