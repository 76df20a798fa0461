//! The appointment entity and its embedded values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use washflow_core::money::Money;

use super::lifecycle::AppointmentStatus;

/// Snapshot of the vehicle a job is booked for. Owned by its appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Identifier assigned at booking.
    pub id: String,
    /// License plate. Never empty.
    pub plate: String,
    /// Make and model, free text.
    pub model: String,
    /// Color, free text.
    pub color: String,
}

/// Vehicle data as supplied by the requester, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleDetails {
    /// License plate.
    pub plate: String,
    /// Make and model. May be empty.
    #[serde(default)]
    pub model: String,
    /// Color. May be empty.
    #[serde(default)]
    pub color: String,
}

/// A tracked car-wash job.
///
/// Partner, service and price fields are copies taken at booking time. Only
/// `status` changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    /// Unique appointment identifier.
    pub id: String,
    /// The user who booked the job.
    pub requester_id: String,
    /// The requester's name when the job was booked.
    pub requester_name: String,
    /// The partner doing the job.
    pub partner_id: String,
    /// The partner's name when the job was booked.
    pub partner_name: String,
    /// The service booked.
    pub service_id: String,
    /// The service's name when the job was booked.
    pub service_name: String,
    /// The service's price when the job was booked.
    pub price: Money,
    /// The vehicle being washed.
    pub vehicle: Vehicle,
    /// Booking instant.
    pub date: DateTime<Utc>,
    /// Current lifecycle status.
    pub status: AppointmentStatus,
}

/// A validated booking waiting for the store to assign ids and an initial
/// status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentDraft {
    /// The user booking the job.
    pub requester_id: String,
    /// The requester's display name.
    pub requester_name: String,
    /// The partner doing the job.
    pub partner_id: String,
    /// Partner name snapshot.
    pub partner_name: String,
    /// The service booked.
    pub service_id: String,
    /// Service name snapshot.
    pub service_name: String,
    /// Price snapshot.
    pub price: Money,
    /// Vehicle data; the store assigns the vehicle id.
    pub vehicle: VehicleDetails,
    /// Booking instant.
    pub date: DateTime<Utc>,
}

impl AppointmentDraft {
    /// Materializes the draft as a `Pending` appointment.
    #[must_use]
    pub fn into_appointment(self, id: String, vehicle_id: String) -> Appointment {
        Appointment {
            id,
            requester_id: self.requester_id,
            requester_name: self.requester_name,
            partner_id: self.partner_id,
            partner_name: self.partner_name,
            service_id: self.service_id,
            service_name: self.service_name,
            price: self.price,
            vehicle: Vehicle {
                id: vehicle_id,
                plate: self.vehicle.plate,
                model: self.vehicle.model,
                color: self.vehicle.color,
            },
            date: self.date,
            status: AppointmentStatus::Pending,
        }
    }
}
