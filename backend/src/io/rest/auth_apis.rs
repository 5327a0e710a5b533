//! # REST API for Authentication

use axum::{extract::State, Extension};
use tracing::info;

use super::mappers::UserMapper;
use super::response::{ok, ApiJson, ApiResult};
use crate::domain::models::TokenClaims;
use crate::AppState;
use shared::LoginRequest;

/// Exchange credentials for a bearer token
pub async fn login(State(state): State<AppState>, ApiJson(request): ApiJson<LoginRequest>) -> ApiResult {
    info!("POST /v1/auth - email: {}", request.email);

    let token = state
        .auth_service
        .authenticate(UserMapper::to_login_command(request))
        .await?;
    ok(UserMapper::to_token_dto(token))
}

/// E-mail of the user the token belongs to
pub async fn current_user(Extension(claims): Extension<TokenClaims>) -> ApiResult {
    info!("GET /v1/auth - user: {}", claims.sub);
    ok(claims.email)
}
