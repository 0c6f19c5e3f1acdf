mod error;
mod handlers;
mod middleware;

pub use error::{ApiError, ApiErrorBody, ApiErrorMessage, codes};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;

use crate::application::templates::TemplateService;
use crate::config::ServerSettings;

use middleware::{log_responses, set_request_context};

#[derive(Clone)]
pub struct HttpState {
    pub templates: TemplateService,
}

impl HttpState {
    pub fn new(templates: TemplateService) -> Self {
        Self { templates }
    }
}

/// Routes served to the browser editor. The editor runs on another origin,
/// so CORS is wide open.
pub fn build_router(state: HttpState, server: &ServerSettings) -> Router {
    Router::new()
        .route("/", get(handlers::banner))
        .route("/health", get(handlers::health))
        .route("/layout", get(handlers::layout))
        .route("/upload", post(handlers::upload))
        .route("/data", get(handlers::history))
        .route("/render", post(handlers::render))
        .with_state(state)
        .layer(DefaultBodyLimit::max(server.max_body_bytes))
        .layer(axum_middleware::from_fn(log_responses))
        .layer(axum_middleware::from_fn(set_request_context))
        .layer(CorsLayer::permissive())
}
