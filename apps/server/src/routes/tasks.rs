//! # Task Handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use tracing::info;

use opsdesk_core::Task;

use crate::error::ApiResult;
use crate::state::AppState;

/// Stores a new task and echoes it back.
pub async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<Task>, JsonRejection>,
) -> ApiResult<Json<Task>> {
    let Json(task) = payload?;

    let stored = state.db.tasks().insert(&task).await?;
    info!(id = %stored.id, assigned_to = %stored.assigned_to, "Task created");

    Ok(Json(stored))
}
