//! Handlers for registration and login endpoints.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::users::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new user.
///
/// # Endpoint
///
/// `POST /user/register`
///
/// # Request Body
///
/// ```json
/// { "username": "alice", "email": "a@x.com", "password": "pw123" }
/// ```
///
/// # Errors
///
/// Returns 400 on validation failure, 409 when the username or email is
/// already taken.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    payload.validate()?;

    let user = state
        .user_service
        .register(payload.username, payload.email, &payload.password)
        .await?;

    tracing::info!(username = %user.username, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User created successfully",
            username: user.username,
        }),
    ))
}

/// Verifies credentials and returns a fresh session token.
///
/// # Endpoint
///
/// `POST /user/login`
///
/// # Response
///
/// ```json
/// { "username": "alice", "token": "<jwt>" }
/// ```
///
/// # Errors
///
/// Returns 401 with a generic body on unknown username or wrong password.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    payload.validate()?;

    let (user, token) = state
        .user_service
        .login(&payload.username, &payload.password)
        .await?;

    Ok(Json(LoginResponse {
        username: user.username,
        token,
    }))
}
