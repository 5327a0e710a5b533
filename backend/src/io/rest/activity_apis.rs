//! # REST API for the Activity Catalog
//!
//! Listing, lookup, creation, update and deletion of catalog activities.
//! Updates and deletions cascade into the lists that use the activity.

use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use tracing::{info, warn};

use super::mappers::{to_page, to_rows_dto, ActivityMapper};
use super::response::{created, ok, ApiError, ApiJson, ApiQuery, ApiResult};
use crate::AppState;
use shared::{CreateActivityRequest, PageQuery, UpdateActivityRequest};

/// Create a router for activity related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_activities).post(create_activity).put(update_activity))
        .route("/:id", get(get_activity).delete(delete_activity))
}

/// List catalog activities, one page at a time
pub async fn list_activities(State(state): State<AppState>, ApiQuery(query): ApiQuery<PageQuery>) -> ApiResult {
    info!("GET /v1/activity - query: {:?}", query);

    let activities = state.activity_service.list(to_page(query)).await?;
    ok(to_rows_dto(activities, ActivityMapper::to_dto))
}

pub async fn get_activity(State(state): State<AppState>, Path(activity_id): Path<String>) -> ApiResult {
    info!("GET /v1/activity/{}", activity_id);

    match state.activity_service.get(&activity_id).await? {
        Some(activity) => ok(ActivityMapper::to_dto(activity)),
        None => Err(ApiError::not_found(format!("Activity not found: {}", activity_id))),
    }
}

/// Create a new activity
pub async fn create_activity(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateActivityRequest>,
) -> ApiResult {
    info!("POST /v1/activity - request: {:?}", request);

    let activity = state
        .activity_service
        .insert(ActivityMapper::to_create_command(request))
        .await?;
    created(ActivityMapper::to_dto(activity))
}

/// Update an activity's description
pub async fn update_activity(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<UpdateActivityRequest>,
) -> ApiResult {
    info!("PUT /v1/activity - request: {:?}", request);

    let result = state
        .activity_service
        .update(ActivityMapper::to_update_command(request))
        .await?;
    if !result.cascade.is_complete() {
        warn!("Lists not refreshed for activity {}: {:?}", result.activity.id, result.cascade.failed);
    }
    ok(ActivityMapper::to_dto(result.activity))
}

/// Delete an activity and strip it out of open lists
pub async fn delete_activity(State(state): State<AppState>, Path(activity_id): Path<String>) -> ApiResult {
    info!("DELETE /v1/activity/{}", activity_id);

    let result = state.activity_service.delete(&activity_id).await?;
    ok(ActivityMapper::to_delete_dto(result))
}
