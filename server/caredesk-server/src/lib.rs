//! CareDesk Server - hospital management REST API
//!
//! This library provides the core functionality of the CareDesk HTTP
//! server: the in-memory hospital repository and the RESTful API
//! endpoints over it.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod storage;
pub mod validation;

// Re-export commonly used types
pub use error::*;
pub use server::{CareDeskServer, ServerConfig};
pub use storage::HospitalStorage;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Create the main application router with all routes and middleware
pub fn create_app(server: CareDeskServer) -> Router {
    routes::create_routes()
        .merge(openapi::swagger_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::create_cors_layer()),
        )
        .with_state(server)
}
