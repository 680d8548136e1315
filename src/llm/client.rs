//! LLM client abstraction
//!
//! The answer generator only ever needs a single-turn completion, so the
//! trait is deliberately small. Providers implement it and tests substitute
//! scripted clients.

use crate::types::Result;
use async_trait::async_trait;

/// Generic LLM client trait for provider abstraction
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Generate a completion from a prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Get the model name/identifier
    fn model_name(&self) -> &str;
}
