//! # REST API for Family Members

use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use tracing::info;

use super::mappers::{to_page, to_rows_dto, MemberMapper};
use super::response::{created, ok, ok_empty, ApiError, ApiJson, ApiQuery, ApiResult};
use crate::AppState;
use shared::{CreateMemberRequest, PageQuery, UpdateMemberRequest};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_members).post(create_member).put(update_member))
        .route("/:id", get(get_member).delete(delete_member))
}

pub async fn list_members(State(state): State<AppState>, ApiQuery(query): ApiQuery<PageQuery>) -> ApiResult {
    info!("GET /v1/member - query: {:?}", query);

    let members = state.member_service.list(to_page(query)).await?;
    ok(to_rows_dto(members, MemberMapper::to_dto))
}

pub async fn get_member(State(state): State<AppState>, Path(member_id): Path<String>) -> ApiResult {
    info!("GET /v1/member/{}", member_id);

    match state.member_service.get(&member_id).await? {
        Some(member) => ok(MemberMapper::to_dto(member)),
        None => Err(ApiError::not_found(format!("Member not found: {}", member_id))),
    }
}

pub async fn create_member(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateMemberRequest>,
) -> ApiResult {
    info!("POST /v1/member - request: {:?}", request);

    let member = state
        .member_service
        .create(MemberMapper::to_create_command(request))
        .await?;
    created(MemberMapper::to_dto(member))
}

pub async fn update_member(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<UpdateMemberRequest>,
) -> ApiResult {
    info!("PUT /v1/member - request: {:?}", request);

    let member = state
        .member_service
        .update(MemberMapper::to_update_command(request))
        .await?;
    ok(MemberMapper::to_dto(member))
}

pub async fn delete_member(State(state): State<AppState>, Path(member_id): Path<String>) -> ApiResult {
    info!("DELETE /v1/member/{}", member_id);

    state.member_service.delete(&member_id).await?;
    ok_empty()
}
