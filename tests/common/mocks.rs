//! Mock implementations for testing.
//!
//! Deterministic stand-ins for the Gemini embedding and generation models,
//! shared by the pipeline and API tests.

use async_trait::async_trait;
use hackrx::llm::LLMClient;
use hackrx::rag::embeddings::Embedder;
use hackrx::rag::FALLBACK_ANSWER;
use hackrx::types::{AppError, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Dimensionality of [`MockEmbedder`] vectors.
pub const MOCK_DIMENSIONS: usize = 64;

const STOPWORDS: &[&str] = &[
    "what", "which", "does", "this", "that", "with", "from", "under", "there", "their", "have",
    "policy", "after", "about", "tell",
];

/// Lowercased words longer than three characters that carry meaning.
pub fn keywords(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .map(str::to_lowercase)
        .filter(|w| w.chars().count() > 3 && !STOPWORDS.contains(&w.as_str()))
        .collect()
}

fn bucket(word: &str) -> usize {
    // FNV-1a
    let mut hash: u64 = 0xcbf29ce484222325;
    for byte in word.bytes() {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    (hash % MOCK_DIMENSIONS as u64) as usize
}

/// Bag-of-words embedder: keyword counts hashed into buckets, L2-normalized.
///
/// Texts sharing keywords land close together, so retrieval behaves like a
/// crude lexical search.
pub struct MockEmbedder {
    calls: AtomicUsize,
    should_fail: bool,
}

impl MockEmbedder {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            should_fail: false,
        }
    }

    /// Create an embedder that always returns an error.
    pub fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            should_fail: true,
        }
    }

    /// Number of `embed` calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The vector `embed` would return, without counting a call.
    pub fn vector_for(text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; MOCK_DIMENSIONS];
        for word in keywords(text) {
            vector[bucket(&word)] += 1.0;
        }

        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            vector.iter_mut().for_each(|v| *v /= norm);
        }
        vector
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            return Err(AppError::Embedding("Mock embedding quota exceeded".to_string()));
        }
        Ok(Self::vector_for(text))
    }

    fn model_name(&self) -> &str {
        "mock-embedding"
    }
}

/// Mock generation model that only answers from the clauses it is given.
///
/// When a clause shares a keyword with the question, the first such clause
/// is quoted back; otherwise the fallback phrase is returned.
pub struct MockLLMClient {
    prompts: Mutex<Vec<String>>,
    should_fail: bool,
}

impl MockLLMClient {
    pub fn new() -> Self {
        Self {
            prompts: Mutex::new(Vec::new()),
            should_fail: false,
        }
    }

    /// Create a mock client that always returns an error.
    pub fn failing() -> Self {
        Self {
            prompts: Mutex::new(Vec::new()),
            should_fail: true,
        }
    }

    /// Prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

/// Split a prompt into its question and its clause texts.
pub fn parse_prompt(prompt: &str) -> (String, Vec<String>) {
    let context = prompt
        .split_once("Context:\n")
        .and_then(|(_, rest)| rest.split_once("\n\nQuestion:\n"))
        .map(|(context, _)| context)
        .unwrap_or("");
    let question = prompt
        .split_once("\n\nQuestion:\n")
        .and_then(|(_, rest)| rest.split_once("\n\nAnswer:"))
        .map(|(question, _)| question.to_string())
        .unwrap_or_default();

    let clauses = context
        .split("\n\n")
        .filter_map(|block| block.split_once(": ").map(|(_, text)| text.to_string()))
        .collect();
    (question, clauses)
}

#[async_trait]
impl LLMClient for MockLLMClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if self.should_fail {
            return Err(AppError::LLM("Mock LLM failure".to_string()));
        }

        let (question, clauses) = parse_prompt(prompt);
        let wanted = keywords(&question);
        let grounded = clauses.iter().find(|clause| {
            let have = keywords(clause);
            wanted.iter().any(|w| have.contains(w))
        });

        Ok(match grounded {
            Some(clause) => format!("  According to the policy: {}\n", clause),
            None => FALLBACK_ANSWER.to_string(),
        })
    }

    fn model_name(&self) -> &str {
        "mock-llm"
    }
}
