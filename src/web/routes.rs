//! Web API router construction and shared response utilities.

use axum::Router;
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use std::time::Duration;
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer};

use crate::state::AppState;
use crate::web::{middleware, search, status};

/// Cache-Control presets for public endpoints.
pub mod cache {
    /// Catalog search results: always revalidate at the client, cache a day
    /// at the edge.
    pub const SEARCH: &str = "max-age=0, s-maxage=86400";
}

/// Wraps a JSON response with a `Cache-Control` header.
pub fn with_cache_control<T: serde::Serialize>(value: T, header: &'static str) -> Response {
    let mut response = Json(value).into_response();
    response.headers_mut().insert(
        axum::http::header::CACHE_CONTROL,
        HeaderValue::from_static(header),
    );
    response
}

/// Creates the web server router
pub fn create_router(app_state: AppState) -> Router {
    let api_router = Router::new()
        .route("/health", get(status::health))
        .route("/unipa/search", get(search::search_unipa))
        .with_state(app_state);

    Router::new().nest("/api", api_router).layer((
        // Outermost: per-request ID span + severity-proportional response logging.
        axum::middleware::from_fn(middleware::request_id),
        CompressionLayer::new(),
        TimeoutLayer::new(Duration::from_secs(60)),
    ))
}
