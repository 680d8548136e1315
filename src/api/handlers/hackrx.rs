//! Document question-answering endpoint.

use crate::{
    types::{HackrxRequest, HackrxResponse, Result},
    AppState,
};
use axum::{extract::State, Json};
use std::time::Instant;

/// Answer questions about a single document.
///
/// The document is downloaded (or read), indexed and queried within the
/// request; nothing is cached between requests.
#[utoipa::path(
    post,
    path = "/hackrx/run",
    request_body = HackrxRequest,
    responses(
        (status = 200, description = "One answer per question, in order", body = HackrxResponse),
        (status = 401, description = "Missing or invalid bearer token", body = crate::types::ErrorResponse),
        (status = 500, description = "Ingestion or generation failed", body = crate::types::ErrorResponse)
    ),
    tag = "hackrx",
    security(("bearer" = []))
)]
pub async fn run(
    State(state): State<AppState>,
    Json(payload): Json<HackrxRequest>,
) -> Result<Json<HackrxResponse>> {
    let start = Instant::now();

    let response = state.pipeline.run(&payload).await.inspect_err(|e| {
        tracing::error!(documents = %payload.documents, error = %e, "Run failed");
    })?;

    tracing::info!(
        documents = %payload.documents,
        questions = payload.questions.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Answered questions"
    );

    Ok(Json(response))
}
