//! # REST API for User Accounts
//!
//! Registration is public. Updating and deleting act on the authenticated
//! user taken from the bearer token.

use axum::{extract::State, Extension};
use tracing::info;

use super::mappers::UserMapper;
use super::response::{created, ok, ok_empty, ApiJson, ApiResult};
use crate::domain::models::TokenClaims;
use crate::AppState;
use shared::{RegisterUserRequest, UpdateUserRequest};

pub async fn register_user(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterUserRequest>,
) -> ApiResult {
    info!("POST /v1/user - email: {}", request.email);

    let user = state
        .user_service
        .register(UserMapper::to_register_command(request))
        .await?;
    created(UserMapper::to_dto(user))
}

pub async fn update_user(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    ApiJson(request): ApiJson<UpdateUserRequest>,
) -> ApiResult {
    info!("PUT /v1/user - user: {}", claims.sub);

    let user = state
        .user_service
        .update(UserMapper::to_update_command(claims.sub, request))
        .await?;
    ok(UserMapper::to_dto(user))
}

pub async fn delete_user(State(state): State<AppState>, Extension(claims): Extension<TokenClaims>) -> ApiResult {
    info!("DELETE /v1/user - user: {}", claims.sub);

    state.user_service.delete(&claims.sub).await?;
    ok_empty()
}
