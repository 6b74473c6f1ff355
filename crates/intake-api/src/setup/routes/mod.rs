//! Route configuration and setup.

mod health;

use crate::constants::{API_PREFIX, LOCAL_FILES_ROUTE, MULTIPART_OVERHEAD_BYTES};
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use intake_core::{Config, StorageBackend};
use intake_infra::request_id_middleware;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;
    let body_limit = request_body_limit(config)?;

    let api_routes = Router::new()
        .route("/upload", post(handlers::upload::upload_id_image))
        .route("/openapi.json", get(openapi_json))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit));

    let mut app = Router::new()
        .route("/health", get(health::liveness_check))
        .nest(API_PREFIX, api_routes);

    if config.storage_backend() == StorageBackend::Local {
        tracing::info!(
            route = LOCAL_FILES_ROUTE,
            path = %config.local_storage_path(),
            "Serving local storage files"
        );
        app = app.nest_service(LOCAL_FILES_ROUTE, ServeDir::new(config.local_storage_path()));
    }

    let app = app
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .with_state(state);

    Ok(app)
}

/// Upload limit plus room for the multipart framing around the file.
pub(crate) fn request_body_limit(config: &Config) -> Result<usize, anyhow::Error> {
    config
        .max_upload_size_bytes()
        .checked_add(MULTIPART_OVERHEAD_BYTES)
        .ok_or_else(|| anyhow::anyhow!("MAX_UPLOAD_SIZE_MB is too large"))
}

async fn openapi_json() -> impl IntoResponse {
    Json(crate::get_openapi_spec())
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|e| anyhow::anyhow!("Invalid CORS origin '{}': {}", o, e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}
