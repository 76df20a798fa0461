//! Commands for the Appointment Lifecycle context.

use uuid::Uuid;
use washflow_core::command::Command;

use super::appointment::VehicleDetails;
use super::lifecycle::AppointmentStatus;

/// Command to book a wash.
#[derive(Debug, Clone)]
pub struct BookAppointment {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The user booking the job.
    pub requester_id: String,
    /// The requester's display name.
    pub requester_name: String,
    /// The partner selected.
    pub partner_id: String,
    /// The service selected; must be offered by the partner.
    pub service_id: String,
    /// The vehicle to wash.
    pub vehicle: VehicleDetails,
}

impl Command for BookAppointment {
    fn command_type(&self) -> &'static str {
        "appointments.book"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to move an appointment to a new status.
#[derive(Debug, Clone)]
pub struct AdvanceStatus {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The appointment to change.
    pub appointment_id: String,
    /// The requested status.
    pub target: AppointmentStatus,
}

impl Command for AdvanceStatus {
    fn command_type(&self) -> &'static str {
        "appointments.advance_status"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
