//! Routes for the Appointment Lifecycle.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Json, Router, routing::get, routing::post};
use serde::Deserialize;
use tracing::instrument;
use washflow_appointments::application::engine::BookingRequest;
use washflow_appointments::domain::appointment::{Appointment, VehicleDetails};
use washflow_appointments::domain::lifecycle::AppointmentStatus;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /.
#[derive(Debug, Deserialize)]
pub struct CreateAppointmentRequest {
    /// The user booking the job.
    pub requester_id: String,
    /// The requester's display name.
    pub requester_name: String,
    /// The partner selected.
    pub partner_id: String,
    /// The service selected.
    pub service_id: String,
    /// The vehicle to wash.
    pub vehicle: VehicleDetails,
}

/// Request body for POST /{appointment_id}/status.
#[derive(Debug, Deserialize)]
pub struct AdvanceStatusRequest {
    /// The requested status.
    pub status: AppointmentStatus,
}

/// POST /
#[instrument(skip(state, request), fields(partner_id = %request.partner_id, service_id = %request.service_id))]
async fn create_appointment(
    State(state): State<AppState>,
    Json(request): Json<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<Appointment>), ApiError> {
    let appointment = state
        .engine
        .create_appointment(BookingRequest {
            requester_id: request.requester_id,
            requester_name: request.requester_name,
            partner_id: request.partner_id,
            service_id: request.service_id,
            vehicle: request.vehicle,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(appointment)))
}

/// GET /
async fn list_all(State(state): State<AppState>) -> Json<Vec<Appointment>> {
    Json(state.engine.list_all_appointments().await)
}

/// GET /requester/{requester_id}
async fn list_by_requester(
    State(state): State<AppState>,
    Path(requester_id): Path<String>,
) -> Json<Vec<Appointment>> {
    Json(state.engine.list_appointments_by_requester(&requester_id).await)
}

/// GET /partner/{partner_id}
async fn list_by_partner(
    State(state): State<AppState>,
    Path(partner_id): Path<String>,
) -> Json<Vec<Appointment>> {
    Json(state.engine.list_appointments_by_partner(&partner_id).await)
}

/// POST /{appointment_id}/status
#[instrument(skip(state, request), fields(target = %request.status))]
async fn advance_status(
    State(state): State<AppState>,
    Path(appointment_id): Path<String>,
    Json(request): Json<AdvanceStatusRequest>,
) -> Result<Json<Appointment>, ApiError> {
    let appointment = state
        .engine
        .advance_appointment_status(&appointment_id, request.status)
        .await?;
    Ok(Json(appointment))
}

/// Returns the router for appointments.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_all).post(create_appointment))
        .route("/requester/{requester_id}", get(list_by_requester))
        .route("/partner/{partner_id}", get(list_by_partner))
        .route("/{appointment_id}/status", post(advance_status))
}
