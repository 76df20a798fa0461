//! Routes for the Catalog Store.

use std::sync::Arc;

use axum::extract::State;
use axum::{Json, Router, routing::get};
use washflow_catalog::domain::entities::{Partner, Service};

use crate::state::AppState;

/// GET /services
async fn list_services(State(state): State<AppState>) -> Json<Vec<Arc<Service>>> {
    Json(state.engine.list_services().to_vec())
}

/// GET /partners
async fn list_partners(State(state): State<AppState>) -> Json<Vec<Partner>> {
    Json(state.engine.list_partners().to_vec())
}

/// Returns the router for the catalog.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/services", get(list_services))
        .route("/partners", get(list_partners))
}
