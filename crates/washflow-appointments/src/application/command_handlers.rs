//! Command handlers for the Appointment Lifecycle context.
//!
//! This module contains application-level command handler functions that
//! orchestrate domain logic: validate input, apply the lifecycle rules, and
//! hand the result to the store for persistence.

use tracing::{info, instrument};
use washflow_catalog::application::catalog::Catalog;
use washflow_core::clock::Clock;
use washflow_core::command::Command;
use washflow_core::error::{DomainError, DomainResult};

use crate::application::store::AppointmentStore;
use crate::domain::appointment::{Appointment, AppointmentDraft, VehicleDetails};
use crate::domain::commands::{AdvanceStatus, BookAppointment};

/// Validates a booking against the catalog and turns it into a draft.
///
/// Checks run in a fixed order: partner, then service within that partner,
/// then plate.
///
/// # Errors
///
/// Returns `DomainError::UnknownPartner`, `DomainError::UnknownService` or
/// `DomainError::InvalidVehicle`.
pub fn validate_booking(
    command: &BookAppointment,
    catalog: &Catalog,
    clock: &dyn Clock,
) -> DomainResult<AppointmentDraft> {
    let partner = catalog
        .partner(&command.partner_id)
        .ok_or_else(|| DomainError::UnknownPartner(command.partner_id.clone()))?;

    let service = partner
        .offered_service(&command.service_id)
        .ok_or_else(|| DomainError::UnknownService {
            partner_id: partner.id.clone(),
            service_id: command.service_id.clone(),
        })?;

    let plate = command.vehicle.plate.trim();
    if plate.is_empty() {
        return Err(DomainError::InvalidVehicle("plate must not be empty".into()));
    }

    Ok(AppointmentDraft {
        requester_id: command.requester_id.clone(),
        requester_name: command.requester_name.clone(),
        partner_id: partner.id.clone(),
        partner_name: partner.name.clone(),
        service_id: service.id.clone(),
        service_name: service.name.clone(),
        price: service.price,
        vehicle: VehicleDetails {
            plate: plate.to_owned(),
            model: command.vehicle.model.trim().to_owned(),
            color: command.vehicle.color.trim().to_owned(),
        },
        date: clock.now(),
    })
}

/// Handles the `BookAppointment` command: validates the selection, snapshots
/// partner and service data, and appends one `Pending` appointment.
///
/// # Errors
///
/// Returns the validation errors of [`validate_booking`], or
/// `DomainError::Infrastructure` if persistence fails.
#[instrument(skip_all, fields(
    command = command.command_type(),
    correlation_id = %command.correlation_id,
    partner_id = %command.partner_id,
    service_id = %command.service_id
))]
pub async fn handle_book_appointment(
    command: &BookAppointment,
    catalog: &Catalog,
    clock: &dyn Clock,
    store: &AppointmentStore,
) -> DomainResult<Appointment> {
    let draft = validate_booking(command, catalog, clock)?;
    let appointment = store.create(draft).await?;

    info!(appointment_id = %appointment.id, price = %appointment.price, "appointment booked");
    Ok(appointment)
}

/// Handles the `AdvanceStatus` command: validates the transition against the
/// lifecycle and persists it.
///
/// # Errors
///
/// Returns `DomainError::NotFound`, `DomainError::InvalidTransition`, or
/// `DomainError::Infrastructure` if persistence fails.
#[instrument(skip_all, fields(
    command = command.command_type(),
    correlation_id = %command.correlation_id,
    appointment_id = %command.appointment_id,
    target = %command.target
))]
pub async fn handle_advance_status(
    command: &AdvanceStatus,
    store: &AppointmentStore,
) -> DomainResult<Appointment> {
    store
        .update_status(&command.appointment_id, command.target)
        .await
}
