use crate::api::handlers::{hackrx, health};
use crate::types::{ErrorResponse, HackrxRequest, HackrxResponse, HealthResponse};
use crate::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(hackrx::run, health::health),
    components(schemas(HackrxRequest, HackrxResponse, HealthResponse, ErrorResponse)),
    modifiers(&BearerAuth),
    tags(
        (name = "hackrx", description = "Document question answering"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

/// Registers the `bearer` scheme referenced by protected paths.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.server.body_limit;

    let protected_routes = Router::new()
        .route("/hackrx/run", post(hackrx::run))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            crate::auth::middleware::require_bearer,
        ));

    Router::new()
        .route("/health", get(health::health))
        .route("/openapi.json", get(openapi))
        .merge(protected_routes)
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
