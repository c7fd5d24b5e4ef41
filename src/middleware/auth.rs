use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the static shared secret for token-gated routes.
pub const TOKEN_HEADER: &str = "x-architecte-token";

/// Shared-secret middleware for the token-gated route subset.
///
/// A missing header is 401, a wrong value is 403. When no secret is
/// configured server-side, enforcement is off - explicit development mode,
/// announced with a warning at startup rather than silently here.
pub async fn token_auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(expected) = state.config.shared_secret.as_deref() else {
        tracing::debug!("shared-secret check skipped: no token configured (development mode)");
        return Ok(next.run(request).await);
    };

    let presented = request
        .headers()
        .get(TOKEN_HEADER)
        .ok_or_else(|| ApiError::unauthorized(format!("missing {TOKEN_HEADER} header")))?;

    match presented.to_str() {
        Ok(token) if token == expected => Ok(next.run(request).await),
        _ => Err(ApiError::forbidden("invalid token")),
    }
}
