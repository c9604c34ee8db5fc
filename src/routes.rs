//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`          - Liveness + DB ping (public)
//! - `GET  /{code}`          - Short link redirect (public)
//! - `POST /user/register`   - Account creation (public)
//! - `POST /user/login`      - Token issuance (public)
//! - `/api/v1/shorten*`      - Link CRUD (Bearer token required)
//!
//! # Middleware
//!
//! - **Tracing** - request span + response latency logging
//! - **Authentication** - Bearer token validated before protected handlers
//! - **Path normalization** - trailing slash handling

use axum::{Router, middleware, routing::get};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{auth, tracing};
use crate::state::AppState;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let api_router = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .nest("/user", api::routes::user_routes())
        .nest("/api/v1", api_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
