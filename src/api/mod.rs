//! HTTP API handlers and routes.
//!
//! # API Endpoints
//!
//! - `POST /hackrx/run` - Answer questions about one document (bearer token required)
//! - `GET /health` - Health check
//! - `GET /openapi.json` - OpenAPI description of the above
//!
//! # Authentication
//!
//! `/hackrx/run` requires:
//! ```text
//! Authorization: Bearer <token>
//! ```
//!
//! # Errors
//!
//! Every failure is answered with `{"detail": "<message>"}`: 401 for
//! authentication, 500 for anything that goes wrong while answering.

/// Request handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;
