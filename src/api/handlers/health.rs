//! Health check handler.

use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::state::AppState;

/// Liveness check with a database ping.
///
/// # Endpoint
///
/// `GET /health`
///
/// Always responds 200; the body reports whether the database answered.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let database_up = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(state.db.as_ref())
        .await
        .is_ok();

    Json(json!({
        "status": if database_up { "ok" } else { "degraded" },
        "database": if database_up { "up" } else { "down" },
    }))
}
