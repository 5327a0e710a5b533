//! # REST API for List History

use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use tracing::info;

use super::mappers::ListMapper;
use super::response::{ok, ApiResult};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:name/closed", get(closed_history))
        .route("/:name/inprogress", get(in_progress_history))
}

/// Closed lists of a member and how many activities failed in each
pub async fn closed_history(State(state): State<AppState>, Path(name): Path<String>) -> ApiResult {
    info!("GET /v1/historic/{}/closed", name);

    let history = state.historic_service.closed(&name).await?;
    ok(ListMapper::to_closed_history_dto(history))
}

/// Running lists of a member with the discount against their allowance
pub async fn in_progress_history(State(state): State<AppState>, Path(name): Path<String>) -> ApiResult {
    info!("GET /v1/historic/{}/inprogress", name);

    let history = state.historic_service.in_progress(&name).await?;
    ok(ListMapper::to_in_progress_history_dto(history))
}
