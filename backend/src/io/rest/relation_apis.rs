//! # REST API for List/Activity Relations
//!
//! Attaching scored activities to a list, detaching them from one list, and
//! removing an activity from every open list at once.

use axum::{
    extract::{Path, State},
    routing::{delete, post},
    Router,
};
use tracing::info;

use super::mappers::{ActivityMapper, ListMapper};
use super::response::{ok, ApiJson, ApiResult};
use crate::AppState;
use shared::{AttachActivityRequest, DetachActivityRequest};

/// Create a router for relation APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(attach_activity))
        .route("/:id", delete(remove_activity_from_all_lists).patch(detach_activity))
}

/// Add a scored activity to a list
pub async fn attach_activity(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AttachActivityRequest>,
) -> ApiResult {
    info!("POST /v1/relation - request: {:?}", request);

    let list = state
        .relation_service
        .attach_activity_to_list(ListMapper::to_attach_command(request))
        .await?;
    ok(ListMapper::to_dto(list))
}

/// Remove an activity from one list
pub async fn detach_activity(
    State(state): State<AppState>,
    Path(list_id): Path<String>,
    ApiJson(request): ApiJson<DetachActivityRequest>,
) -> ApiResult {
    info!("PATCH /v1/relation/{} - request: {:?}", list_id, request);

    let list = state
        .relation_service
        .detach_activity_from_list(ListMapper::to_detach_command(list_id, request))
        .await?;
    ok(ListMapper::to_dto(list))
}

/// Remove an activity from every list that is not closed
pub async fn remove_activity_from_all_lists(
    State(state): State<AppState>,
    Path(activity_id): Path<String>,
) -> ApiResult {
    info!("DELETE /v1/relation/{}", activity_id);

    let report = state.relation_service.remove_activity_from_all_lists(&activity_id).await?;
    ok(ActivityMapper::to_cascade_dto(report))
}
