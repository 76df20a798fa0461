//! Routes for the dashboard summaries.

use axum::extract::{Path, State};
use axum::{Json, Router, routing::get};
use washflow_appointments::application::query_handlers::{
    AdminOverview, PartnerBoard, RequesterHistory,
};

use crate::error::ApiError;
use crate::state::AppState;

/// GET /requester/{requester_id}
async fn requester_history(
    State(state): State<AppState>,
    Path(requester_id): Path<String>,
) -> Json<RequesterHistory> {
    Json(state.engine.requester_history(&requester_id).await)
}

/// GET /partner/{partner_id}
async fn partner_board(
    State(state): State<AppState>,
    Path(partner_id): Path<String>,
) -> Result<Json<PartnerBoard>, ApiError> {
    Ok(Json(state.engine.partner_board(&partner_id).await?))
}

/// GET /admin
async fn admin_overview(State(state): State<AppState>) -> Json<AdminOverview> {
    Json(state.engine.admin_overview().await)
}

/// Returns the router for reports.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/requester/{requester_id}", get(requester_history))
        .route("/partner/{partner_id}", get(partner_board))
        .route("/admin", get(admin_overview))
}
