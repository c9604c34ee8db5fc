//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::{error::AppError, state::AppState};

/// Authenticates requests using Bearer tokens from the Authorization header.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// The token's signature, issuer, and expiry are verified before the request
/// reaches business logic. Handlers that need the caller's identity resolve
/// it from the token themselves (see `TokenService::resolve_user`); this
/// layer only gates access.
///
/// # Errors
///
/// Returns `401 Unauthorized` (with a `WWW-Authenticate: Bearer` challenge)
/// if the header is missing or malformed, or the token is invalid or expired.
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                serde_json::json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    let req = Request::from_parts(parts, body);

    st.token_service.validate(&token)?;

    Ok(next.run(req).await)
}
