//! Public redirect handler.

use axum::{
    extract::{Path, State},
    response::Redirect,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its destination URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Responds with `307 Temporary Redirect` so clients keep re-resolving codes
/// whose destination may be updated. Unknown codes return 404.
pub async fn redirect_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Redirect, AppError> {
    let link = state.link_service.get_link(&code).await?;

    Ok(Redirect::temporary(&link.long_url))
}
