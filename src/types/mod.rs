use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============= API Request/Response Types =============

/// Body of `POST /hackrx/run`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HackrxRequest {
    /// Local path or HTTP(S) URL of the document to answer from.
    pub documents: String,
    /// Questions to answer, in order.
    pub questions: Vec<String>,
}

/// Response of `POST /hackrx/run`: one answer per question, same order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HackrxResponse {
    pub answers: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Error body returned for every non-2xx response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub detail: String,
}

// ============= RAG Types =============

/// Structured answer printed by the standalone query command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryOutcome {
    pub question: String,
    pub answer: String,
    pub explainable_reasoning: String,
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Unknown file extension or content type; the message is surfaced verbatim.
    #[error("{0}")]
    UnsupportedFormat(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("LLM error: {0}")]
    LLM(String),

    #[error("Index error: {0}")]
    Index(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<policy_vector::Error> for AppError {
    fn from(err: policy_vector::Error) -> Self {
        match err {
            policy_vector::Error::NotFound(path) => AppError::NotFound(format!(
                "Index or texts file not found ({}). Run the ingestion first.",
                path
            )),
            other => AppError::Index(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Http(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(format!("JSON error: {}", err))
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        // Only authentication gets its own status; every pipeline failure is a 500.
        let status = match &self {
            AppError::Auth(_) => axum::http::StatusCode::UNAUTHORIZED,
            _ => axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        };

        let detail = match self {
            AppError::Auth(msg) => msg,
            other => other.to_string(),
        };

        (status, axum::Json(ErrorResponse { detail })).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
