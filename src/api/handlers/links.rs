//! Handlers for link management endpoints (create, read, update, delete).

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_auth::AuthBearer;
use chrono::{DateTime, Utc};
use serde::Serialize;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, UpdateLinkRequest};
use crate::domain::entities::Link;
use crate::error::AppError;
use crate::state::AppState;

/// JSON representation of a link returned by the API.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub code: String,
    pub long_url: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn link_response(state: &AppState, link: Link) -> LinkResponse {
    let short_url = state.link_service.short_url(&link.code);
    LinkResponse {
        code: link.code,
        long_url: link.long_url,
        short_url,
        created_at: link.created_at,
        updated_at: link.updated_at,
    }
}

/// Creates a short link for the authenticated caller.
///
/// # Endpoint
///
/// `POST /api/v1/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com" }
/// ```
///
/// The owner is resolved from the bearer token's subject claim; the
/// middleware has already verified the token, so a failure here means the
/// subject no longer maps to a user.
///
/// # Errors
///
/// Returns 400 for an invalid URL, 401 for an unresolvable subject, 500 if a
/// unique code could not be allocated.
pub async fn create_link_handler(
    State(state): State<AppState>,
    AuthBearer(token): AuthBearer,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    payload.validate()?;

    let user = state.token_service.resolve_user(&token).await?;

    let link = state.link_service.create_link(payload.url, user.id).await?;

    tracing::info!(code = %link.code, user_id = user.id, "short link created");

    Ok((StatusCode::CREATED, Json(link_response(&state, link))))
}

/// Fetches a short link by its code.
///
/// # Endpoint
///
/// `GET /api/v1/shorten/{code}`
pub async fn get_link_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.get_link(&code).await?;

    Ok(Json(link_response(&state, link)))
}

/// Replaces the destination URL of a short link.
///
/// # Endpoint
///
/// `PUT /api/v1/shorten/{code}`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/new" }
/// ```
pub async fn update_link_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(payload): Json<UpdateLinkRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    payload.validate()?;

    let link = state.link_service.update_link(&code, payload.url).await?;

    Ok(Json(link_response(&state, link)))
}

/// Deletes a short link.
///
/// # Endpoint
///
/// `DELETE /api/v1/shorten/{code}`
///
/// Returns 204 on success, 404 if the code does not exist.
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<StatusCode, AppError> {
    state.link_service.delete_link(&code).await?;

    tracing::info!(%code, "short link deleted");

    Ok(StatusCode::NO_CONTENT)
}
