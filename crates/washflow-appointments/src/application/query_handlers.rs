//! Query handlers for the Appointment Lifecycle context.
//!
//! Role-scoped listings and the summaries the requester, partner and admin
//! dashboards are built from. All handlers are read-only.

use serde::Serialize;
use washflow_catalog::application::catalog::Catalog;
use washflow_catalog::domain::entities::User;
use washflow_core::error::{DomainError, DomainResult};
use washflow_core::money::Money;
use washflow_core::role::Role;

use crate::application::store::AppointmentStore;
use crate::domain::appointment::Appointment;
use crate::domain::lifecycle::AppointmentStatus;

/// Share of booking revenue kept by the platform.
pub const PLATFORM_FEE_PERCENT: u64 = 15;

/// Returns the appointments `user` may see: their own bookings for a
/// requester, their partner's queue for partner staff, everything for an
/// admin.
pub async fn list_for_role(store: &AppointmentStore, user: &User) -> Vec<Appointment> {
    match &user.role {
        Role::Requester { .. } => store.list_by_requester(&user.id).await,
        Role::Partner { partner_id } => store.list_by_partner(partner_id).await,
        Role::Admin => store.list_all().await,
    }
}

/// A requester's bookings split into open and closed jobs, newest first.
#[derive(Debug, Serialize)]
pub struct RequesterHistory {
    /// The requester.
    pub requester_id: String,
    /// Jobs still pending, picked up, or washing.
    pub active: Vec<Appointment>,
    /// Finished, delivered, and cancelled jobs.
    pub past: Vec<Appointment>,
}

/// Builds the requester history view.
pub async fn requester_history(store: &AppointmentStore, requester_id: &str) -> RequesterHistory {
    let (active, past) = store
        .list_by_requester(requester_id)
        .await
        .into_iter()
        .partition(|a| a.status.is_active());
    RequesterHistory {
        requester_id: requester_id.to_owned(),
        active,
        past,
    }
}

/// A partner's work queue grouped by stage, newest first within each group.
#[derive(Debug, Serialize)]
pub struct PartnerBoard {
    /// The partner.
    pub partner_id: String,
    /// Waiting for pickup.
    pub pending: Vec<Appointment>,
    /// Picked up or washing.
    pub in_progress: Vec<Appointment>,
    /// Finished or delivered.
    pub completed: Vec<Appointment>,
    /// Cancelled at any stage.
    pub cancelled: Vec<Appointment>,
    /// Sum of prices in `completed`.
    pub completed_revenue: Money,
}

/// Builds the partner board.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if `partner_id` is not in the catalog.
pub async fn partner_board(
    store: &AppointmentStore,
    catalog: &Catalog,
    partner_id: &str,
) -> DomainResult<PartnerBoard> {
    if catalog.partner(partner_id).is_none() {
        return Err(DomainError::not_found(format!("partner {partner_id}")));
    }

    let mut board = PartnerBoard {
        partner_id: partner_id.to_owned(),
        pending: Vec::new(),
        in_progress: Vec::new(),
        completed: Vec::new(),
        cancelled: Vec::new(),
        completed_revenue: Money::ZERO,
    };
    for appointment in store.list_by_partner(partner_id).await {
        match appointment.status {
            AppointmentStatus::Pending => board.pending.push(appointment),
            AppointmentStatus::PickedUp | AppointmentStatus::Washing => {
                board.in_progress.push(appointment);
            }
            AppointmentStatus::Finished | AppointmentStatus::Delivered => {
                board.completed_revenue = board.completed_revenue.saturating_add(appointment.price);
                board.completed.push(appointment);
            }
            AppointmentStatus::Cancelled => board.cancelled.push(appointment),
        }
    }
    Ok(board)
}

/// Number of appointments currently in one status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    /// The status.
    pub status: AppointmentStatus,
    /// How many appointments are in it.
    pub count: usize,
}

/// Platform-wide totals.
#[derive(Debug, Serialize)]
pub struct AdminOverview {
    /// Sum of prices of every appointment that was not cancelled.
    pub total_revenue: Money,
    /// The platform's share of `total_revenue`.
    pub platform_fees: Money,
    /// Number of appointments ever booked, cancelled ones included.
    pub total_bookings: usize,
    /// Number of partners in the catalog.
    pub active_partners: usize,
    /// Appointment counts for every status, in lifecycle order.
    pub bookings_by_status: Vec<StatusCount>,
}

/// Builds the admin overview.
pub async fn admin_overview(store: &AppointmentStore, catalog: &Catalog) -> AdminOverview {
    let appointments = store.list_all().await;

    let total_revenue: Money = appointments
        .iter()
        .filter(|a| a.status != AppointmentStatus::Cancelled)
        .map(|a| a.price)
        .sum();
    let bookings_by_status = AppointmentStatus::ALL
        .into_iter()
        .map(|status| StatusCount {
            status,
            count: appointments.iter().filter(|a| a.status == status).count(),
        })
        .collect();

    AdminOverview {
        total_revenue,
        platform_fees: total_revenue.percent(PLATFORM_FEE_PERCENT),
        total_bookings: appointments.len(),
        active_partners: catalog.list_partners().len(),
        bookings_by_status,
    }
}
