use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use tracing::debug;

use super::response::ApiError;
use crate::AppState;

/// Middleware that requires a valid `Authorization: Bearer <token>` header.
///
/// The verified [`TokenClaims`](crate::domain::models::TokenClaims) are added
/// to the request extensions for handlers that need the caller's identity.
pub async fn require_auth(State(state): State<AppState>, mut req: Request, next: Next) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_owned)
        .ok_or_else(|| ApiError::unauthorized("Missing bearer token"))?;

    let claims = state.auth_service.verify_token(&token).await?;
    debug!("Authenticated request from user {}", claims.sub);

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
