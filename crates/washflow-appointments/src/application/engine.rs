//! The appointment lifecycle engine.
//!
//! A single entry point over the catalog, the user directory and the
//! appointment store. Outer surfaces (HTTP, CLI) call into this and never
//! touch the store directly.

use std::sync::Arc;

use uuid::Uuid;
use washflow_catalog::application::catalog::Catalog;
use washflow_catalog::application::directory::Directory;
use washflow_catalog::domain::entities::{Partner, Service, User};
use washflow_core::clock::Clock;
use washflow_core::error::DomainResult;
use washflow_core::ids::IdGenerator;
use washflow_core::slot::DurableSlot;

use crate::application::command_handlers;
use crate::application::query_handlers::{self, AdminOverview, PartnerBoard, RequesterHistory};
use crate::application::seed::seed_appointments;
use crate::application::store::{AppointmentStore, StoreOrigin};
use crate::domain::appointment::{Appointment, VehicleDetails};
use crate::domain::commands::{AdvanceStatus, BookAppointment};
use crate::domain::lifecycle::AppointmentStatus;

/// Booking request as received from a requester.
#[derive(Debug, Clone)]
pub struct BookingRequest {
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

/// Shared engine state. Cheap to clone behind an `Arc`.
#[derive(Clone)]
pub struct WashflowEngine {
    catalog: Arc<Catalog>,
    directory: Arc<Directory>,
    store: Arc<AppointmentStore>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for WashflowEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WashflowEngine")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl WashflowEngine {
    /// Opens the engine over `slot`, seeding the store from `clock` when the
    /// slot holds no usable collection.
    pub async fn open(
        catalog: Catalog,
        directory: Directory,
        slot: Arc<dyn DurableSlot>,
        ids: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let store = AppointmentStore::open(slot, ids, seed_appointments(clock.as_ref())).await;
        Self {
            catalog: Arc::new(catalog),
            directory: Arc::new(directory),
            store: Arc::new(store),
            clock,
        }
    }

    /// How the store's initial collection was obtained.
    #[must_use]
    pub fn store_origin(&self) -> StoreOrigin {
        self.store.origin()
    }

    /// All services in catalog order.
    #[must_use]
    pub fn list_services(&self) -> &[Arc<Service>] {
        self.catalog.list_services()
    }

    /// All partners in catalog order.
    #[must_use]
    pub fn list_partners(&self) -> &[Partner] {
        self.catalog.list_partners()
    }

    /// Finds the user registered under `email`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if no user has that email.
    pub fn lookup_user(&self, email: &str) -> DomainResult<&User> {
        self.directory.find_by_email(email)
    }

    /// Books a wash.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownPartner`, `DomainError::UnknownService`,
    /// `DomainError::InvalidVehicle`, or `DomainError::Infrastructure` if
    /// the collection cannot be persisted.
    pub async fn create_appointment(&self, request: BookingRequest) -> DomainResult<Appointment> {
        let command = BookAppointment {
            correlation_id: Uuid::new_v4(),
            requester_id: request.requester_id,
            requester_name: request.requester_name,
            partner_id: request.partner_id,
            service_id: request.service_id,
            vehicle: request.vehicle,
        };
        command_handlers::handle_book_appointment(
            &command,
            &self.catalog,
            self.clock.as_ref(),
            &self.store,
        )
        .await
    }

    /// A requester's appointments, newest first.
    pub async fn list_appointments_by_requester(&self, requester_id: &str) -> Vec<Appointment> {
        self.store.list_by_requester(requester_id).await
    }

    /// A partner's appointments, newest first.
    pub async fn list_appointments_by_partner(&self, partner_id: &str) -> Vec<Appointment> {
        self.store.list_by_partner(partner_id).await
    }

    /// Every appointment in canonical order.
    pub async fn list_all_appointments(&self) -> Vec<Appointment> {
        self.store.list_all().await
    }

    /// The appointments visible to `user_id` under their role.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if the user is unknown.
    pub async fn list_appointments_for_user(&self, user_id: &str) -> DomainResult<Vec<Appointment>> {
        let user = self.directory.find_by_id(user_id)?;
        Ok(query_handlers::list_for_role(&self.store, user).await)
    }

    /// Moves an appointment to `target`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound`, `DomainError::InvalidTransition`, or
    /// `DomainError::Infrastructure` if the change cannot be persisted.
    pub async fn advance_appointment_status(
        &self,
        appointment_id: &str,
        target: AppointmentStatus,
    ) -> DomainResult<Appointment> {
        let command = AdvanceStatus {
            correlation_id: Uuid::new_v4(),
            appointment_id: appointment_id.to_owned(),
            target,
        };
        command_handlers::handle_advance_status(&command, &self.store).await
    }

    /// Requester history report.
    pub async fn requester_history(&self, requester_id: &str) -> RequesterHistory {
        query_handlers::requester_history(&self.store, requester_id).await
    }

    /// Partner board report.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if the partner is not in the catalog.
    pub async fn partner_board(&self, partner_id: &str) -> DomainResult<PartnerBoard> {
        query_handlers::partner_board(&self.store, &self.catalog, partner_id).await
    }

    /// Platform-wide admin report.
    pub async fn admin_overview(&self) -> AdminOverview {
        query_handlers::admin_overview(&self.store, &self.catalog).await
    }
}
