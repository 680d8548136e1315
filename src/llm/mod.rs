//! LLM provider clients.
//!
//! - [`llm::client`](crate::llm::client) - The [`LLMClient`] trait
//! - [`llm::gemini`](crate::llm::gemini) - Google Gemini `generateContent` client

/// Provider-agnostic completion trait.
pub mod client;
/// Google Gemini REST client.
pub mod gemini;

pub use client::LLMClient;
pub use gemini::GeminiClient;
