//! API request handlers.

/// Document question-answering handler.
pub mod hackrx;
/// Health check handler.
pub mod health;
