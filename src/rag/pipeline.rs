//! End-to-end ingestion and question answering.
//!
//! Ingestion: extract → chunk → embed → index. Answering, per question:
//! embed the question → retrieve the closest chunks → generate.

use crate::llm::gemini::{http_client, GeminiClient};
use crate::llm::LLMClient;
use crate::rag::answer::Answerer;
use crate::rag::chunker::TextChunker;
use crate::rag::embeddings::{embed_many, Embedder, GeminiEmbedder};
use crate::rag::extractor::Extractor;
use crate::rag::indexer::{ChunkIndex, IndexPaths};
use crate::rag::search::search;
use crate::types::{AppError, HackrxRequest, HackrxResponse, QueryOutcome, Result};
use crate::utils::config::{Config, RagConfig};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

/// Reasoning note attached to structured query outcomes.
pub const QUERY_REASONING: &str = "Answer derived from retrieved policy clauses.";

/// Summary of one ingestion, used to correlate its log lines.
#[derive(Debug, Clone)]
pub struct IngestionRun {
    pub id: Uuid,
    pub source: String,
    pub chunks: usize,
    pub dimensions: usize,
}

/// Tunables of the pipeline.
#[derive(Debug, Clone, Copy)]
pub struct PipelineOptions {
    pub chunk_size: usize,
    pub top_k: usize,
    pub workers: usize,
}

impl From<&RagConfig> for PipelineOptions {
    fn from(config: &RagConfig) -> Self {
        Self {
            chunk_size: config.chunk_size,
            top_k: config.top_k,
            workers: config.workers(),
        }
    }
}

pub struct RagPipeline {
    extractor: Extractor,
    chunker: TextChunker,
    embedder: Arc<dyn Embedder>,
    answerer: Answerer,
    top_k: usize,
    workers: usize,
}

impl RagPipeline {
    pub fn new(
        extractor: Extractor,
        embedder: Arc<dyn Embedder>,
        llm: Arc<dyn LLMClient>,
        options: PipelineOptions,
    ) -> Self {
        Self {
            extractor,
            chunker: TextChunker::new(options.chunk_size),
            embedder,
            answerer: Answerer::new(llm),
            top_k: options.top_k,
            workers: options.workers.max(1),
        }
    }

    /// Wire the pipeline to the Gemini APIs described by `config`.
    pub fn from_config(config: &Config, api_key: String) -> Result<Self> {
        let client = http_client(Duration::from_secs(config.gemini.timeout_secs))?;

        let embedder = GeminiEmbedder::new(
            client.clone(),
            &config.gemini.api_base,
            api_key.clone(),
            &config.gemini.embedding_model,
            config.gemini.task_type.clone(),
        );
        let llm = GeminiClient::new(
            client.clone(),
            &config.gemini.api_base,
            api_key,
            config.gemini.generation_model.clone(),
        );

        Ok(Self::new(
            Extractor::new(client),
            Arc::new(embedder),
            Arc::new(llm),
            PipelineOptions::from(&config.rag),
        ))
    }

    async fn build(&self, source: &str) -> Result<(IngestionRun, ChunkIndex)> {
        let id = Uuid::new_v4();
        let span = info_span!("ingest", run_id = %id);

        async move {
            let start = Instant::now();
            info!(source, "Extracting text from document");
            let text = self.extractor.extract(source).await?;

            let chunks: Vec<String> = self
                .chunker
                .chunk(&text)
                .into_iter()
                .map(|chunk| chunk.text)
                .collect();
            if chunks.is_empty() {
                return Err(AppError::Extraction(format!(
                    "No text could be extracted from {}",
                    source
                )));
            }
            info!(chunks = chunks.len(), "Chunked document");

            let vectors = embed_many(self.embedder.as_ref(), &chunks, self.workers).await?;
            let index = ChunkIndex::build(&vectors, chunks)?;

            let run = IngestionRun {
                id,
                source: source.to_string(),
                chunks: index.len(),
                dimensions: index.dimensions(),
            };
            info!(
                chunks = run.chunks,
                dimensions = run.dimensions,
                duration_ms = start.elapsed().as_millis() as u64,
                "Built chunk index"
            );
            Ok::<_, AppError>((run, index))
        }
        .instrument(span)
        .await
    }

    /// Build an index for `source`, round-tripping it through a scratch
    /// directory that is removed before returning.
    pub async fn ingest(&self, source: &str) -> Result<ChunkIndex> {
        let (_, index) = self.build(source).await?;

        tokio::task::spawn_blocking(move || {
            let scratch = tempfile::TempDir::new()?;
            let paths = IndexPaths::for_base(scratch.path(), "index");
            index.persist(&paths)?;
            ChunkIndex::load(&paths)
        })
        .await
        .map_err(|e| AppError::Internal(format!("Index persistence task failed: {}", e)))?
    }

    /// Build an index for `source` and persist it at `paths`.
    pub async fn ingest_to_dir(&self, source: &str, paths: &IndexPaths) -> Result<IngestionRun> {
        let (run, index) = self.build(source).await?;
        let paths = paths.clone();

        tokio::task::spawn_blocking(move || index.persist(&paths))
            .await
            .map_err(|e| AppError::Internal(format!("Index persistence task failed: {}", e)))??;

        Ok(run)
    }

    /// Retrieve the distinct chunk texts closest to `question`.
    pub async fn retrieve<'a>(&self, question: &str, index: &'a ChunkIndex) -> Result<Vec<&'a str>> {
        let query = self.embedder.embed(question).await?;
        let hits = search(index, &query, self.top_k)?;
        Ok(hits.unique_texts(index))
    }

    /// Answer one question from `index`.
    pub async fn answer(&self, question: &str, index: &ChunkIndex) -> Result<String> {
        let contexts = self.retrieve(question, index).await?;
        info!(contexts = contexts.len(), "Retrieved context clauses");
        self.answerer.answer(question, &contexts).await
    }

    /// Answer one question and wrap it in a structured outcome.
    pub async fn query(&self, question: &str, index: &ChunkIndex) -> Result<QueryOutcome> {
        let answer = self.answer(question, index).await?;
        Ok(QueryOutcome {
            question: question.to_string(),
            answer,
            explainable_reasoning: QUERY_REASONING.to_string(),
        })
    }

    /// Ingest the request's document and answer its questions in order.
    pub async fn run(&self, request: &HackrxRequest) -> Result<HackrxResponse> {
        let index = self.ingest(&request.documents).await?;

        let mut answers = Vec::with_capacity(request.questions.len());
        for question in &request.questions {
            info!(question = %question, "Processing question");
            answers.push(self.answer(question, &index).await?);
        }

        Ok(HackrxResponse { answers })
    }
}
