//! REST API route tables.

use axum::{
    Router,
    routing::{get, post},
};

use crate::api::handlers::{
    create_link_handler, delete_link_handler, get_link_handler, login_handler, register_handler,
    update_link_handler,
};
use crate::state::AppState;

/// Public account routes, nested under `/user`.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
}

/// Bearer-token-protected link routes, nested under `/api/v1`.
///
/// The auth middleware is attached by the caller so tests can mount these
/// routes without it.
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(create_link_handler))
        .route(
            "/shorten/{code}",
            get(get_link_handler)
                .put(update_link_handler)
                .delete(delete_link_handler),
        )
}
