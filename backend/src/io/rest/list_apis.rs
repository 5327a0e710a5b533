//! # REST API for Task Lists

use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use tracing::info;

use super::mappers::{to_page, to_rows_dto, ListMapper};
use super::response::{created, ok, ok_empty, ApiJson, ApiQuery, ApiResult};
use crate::AppState;
use shared::{CreateListRequest, PageQuery, UpdateListStatusRequest};

/// Create a router for list related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_lists).post(create_list).put(update_list_status))
        .route("/:id", get(get_list).delete(delete_list))
}

pub async fn list_lists(State(state): State<AppState>, ApiQuery(query): ApiQuery<PageQuery>) -> ApiResult {
    info!("GET /v1/list - query: {:?}", query);

    let lists = state.list_service.list(to_page(query)).await?;
    ok(to_rows_dto(lists, ListMapper::to_dto))
}

/// Get a list with its discount and failed activity count
pub async fn get_list(State(state): State<AppState>, Path(list_id): Path<String>) -> ApiResult {
    info!("GET /v1/list/{}", list_id);

    let details = state.list_service.get_details(&list_id).await?;
    ok(ListMapper::to_details_dto(details))
}

pub async fn create_list(State(state): State<AppState>, ApiJson(request): ApiJson<CreateListRequest>) -> ApiResult {
    info!("POST /v1/list - request: {:?}", request);

    let list = state.list_service.create(ListMapper::to_create_command(request)).await?;
    created(ListMapper::to_dto(list))
}

/// Move a list to a new status
pub async fn update_list_status(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<UpdateListStatusRequest>,
) -> ApiResult {
    info!("PUT /v1/list - request: {:?}", request);

    let list = state
        .list_service
        .update_status(ListMapper::to_update_status_command(request))
        .await?;
    ok(ListMapper::to_dto(list))
}

pub async fn delete_list(State(state): State<AppState>, Path(list_id): Path<String>) -> ApiResult {
    info!("DELETE /v1/list/{}", list_id);

    state.list_service.delete(&list_id).await?;
    ok_empty()
}
