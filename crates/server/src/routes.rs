pub mod categories;
pub mod menu_items;

use axum::{
    extract::{DefaultBodyLimit, OriginalUri},
    http::{Method, StatusCode},
    routing::{get, patch},
    Json, Router,
};
use common::types::Health;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use crate::errors::JsonApiError;
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// JSON request bodies above this size are rejected.
pub const BODY_LIMIT_BYTES: usize = 10 * 1024;

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok", timestamp: chrono::Utc::now().to_rfc3339() })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn not_found(method: Method, OriginalUri(uri): OriginalUri) -> JsonApiError {
    JsonApiError::new(StatusCode::NOT_FOUND, format!("Route {} {} not found", method, uri.path()))
}

/// Category and menu item routes, relative to the API prefix.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(categories::list).post(categories::create))
        .route(
            "/categories/:id",
            get(categories::get).patch(categories::update).delete(categories::delete),
        )
        .route("/categories/:id/items", get(categories::items))
        .route("/menu-items", get(menu_items::list).post(menu_items::create))
        .route(
            "/menu-items/:id",
            get(menu_items::get).patch(menu_items::update).delete(menu_items::delete),
        )
        .route("/menu-items/:id/availability", patch(menu_items::update_availability))
        .route("/menu-items/:id/category", patch(menu_items::assign_category))
}

/// Build the full application router.
///
/// API routes live under `api_prefix` (empty mounts them at the root);
/// `/health` and the OpenAPI document always stay at the root.
pub fn build_router(state: AppState, api_prefix: &str, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json));

    let api = if api_prefix.is_empty() {
        api_routes()
    } else {
        Router::new().nest(api_prefix, api_routes())
    };

    public
        .merge(api.with_state(state))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one INFO span per request with method and path
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // status code and latency
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx is logged at ERROR
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
