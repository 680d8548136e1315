//! Grounded answer generation.

use crate::llm::LLMClient;
use crate::types::Result;
use std::sync::Arc;
use tracing::debug;

/// Phrase the model is instructed to use when the context lacks the answer.
pub const FALLBACK_ANSWER: &str = "Not mentioned in the policy.";

const INSTRUCTIONS: &str = "You are a policy analyst. Use the following clauses to answer the question accurately. \
Only answer based on the provided context. If not found, say 'Not mentioned in the policy.' \
Example: 'The policy covers maternity expenses.' \
Do not invent new clauses.";

/// Render the retrieved contexts as numbered clauses followed by the question.
pub fn build_prompt(question: &str, contexts: &[&str]) -> String {
    let clauses = contexts
        .iter()
        .enumerate()
        .map(|(i, text)| format!("Clause {}: {}", i + 1, text))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "{}\n\nContext:\n{}\n\nQuestion:\n{}\n\nAnswer:",
        INSTRUCTIONS, clauses, question
    )
}

/// Produces answers from a generation model.
#[derive(Clone)]
pub struct Answerer {
    llm: Arc<dyn LLMClient>,
}

impl Answerer {
    pub fn new(llm: Arc<dyn LLMClient>) -> Self {
        Self { llm }
    }

    pub fn model_name(&self) -> &str {
        self.llm.model_name()
    }

    /// Send `prompt` to the model and return its trimmed reply.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        debug!(model = self.llm.model_name(), prompt_chars = prompt.len(), "Generating answer");
        let answer = self.llm.generate(prompt).await?;
        Ok(answer.trim().to_string())
    }

    /// Build the prompt for `question` over `contexts` and generate.
    pub async fn answer(&self, question: &str, contexts: &[&str]) -> Result<String> {
        self.generate(&build_prompt(question, contexts)).await
    }
}
