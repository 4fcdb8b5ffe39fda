//! # Ticket Handlers
//!
//! `customer_id` is stored as given; it is not checked against customers.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use tracing::info;

use opsdesk_core::Ticket;

use crate::error::ApiResult;
use crate::state::AppState;

/// Stores a new support ticket and echoes it back.
pub async fn create_ticket(
    State(state): State<AppState>,
    payload: Result<Json<Ticket>, JsonRejection>,
) -> ApiResult<Json<Ticket>> {
    let Json(ticket) = payload?;

    let stored = state.db.tickets().insert(&ticket).await?;
    info!(id = %stored.id, customer_id = %stored.customer_id, status = %stored.status, "Ticket created");

    Ok(Json(stored))
}
