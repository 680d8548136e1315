//! Static bearer-token authentication.
//!
//! Protected routes require `Authorization: Bearer <token>` where the token
//! is read from the environment variable named by `[auth] token_env`
//! (`API_KEY` by default). A mismatch is answered with
//! `401 {"detail": "Unauthorized"}` before the request body is parsed.

/// Axum middleware guarding protected routes.
pub mod middleware;
