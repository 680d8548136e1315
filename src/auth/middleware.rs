use crate::types::AppError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

/// Reject requests whose `Authorization` header is not `Bearer <token>`
/// for the configured token. Runs before the body is read.
pub async fn require_bearer(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let authorized = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .is_some_and(|token| token == state.bearer_token.as_ref());

    if !authorized {
        tracing::warn!(path = %req.uri().path(), "Rejected request with missing or invalid bearer token");
        return Err(AppError::Auth("Unauthorized".to_string()));
    }

    Ok(next.run(req).await)
}
