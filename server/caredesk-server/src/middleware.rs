//! HTTP middleware configuration

use axum::http::{header, Method};
use tower_http::cors::{Any, CorsLayer};

/// CORS layer for the browser client
///
/// The API is consumed by a single-page client served from a different
/// origin in development, so the policy is open.
pub fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}
