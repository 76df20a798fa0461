//! Appointment lifecycle state machine.
//!
//! The happy path is strictly forward, one step at a time:
//!
//! ```text
//! Pending -> PickedUp -> Washing -> Finished -> Delivered
//! ```
//!
//! Any non-terminal status may also exit to `Cancelled`. `Delivered` and
//! `Cancelled` are terminal.

use std::fmt;

use serde::{Deserialize, Serialize};
use washflow_core::error::{DomainError, DomainResult};

use super::appointment::Appointment;

/// Status of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppointmentStatus {
    /// Booked, waiting for the partner to collect the vehicle.
    Pending,
    /// The partner has the vehicle.
    PickedUp,
    /// The wash is in progress.
    Washing,
    /// The wash is done; the vehicle has not been returned yet.
    Finished,
    /// The vehicle is back with its owner.
    Delivered,
    /// The job will not be completed.
    Cancelled,
}

impl AppointmentStatus {
    /// Every status, in lifecycle order with `Cancelled` last.
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::PickedUp,
        Self::Washing,
        Self::Finished,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// The statuses this one may move to.
    #[must_use]
    pub const fn allowed_next(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::PickedUp, Self::Cancelled],
            Self::PickedUp => &[Self::Washing, Self::Cancelled],
            Self::Washing => &[Self::Finished, Self::Cancelled],
            Self::Finished => &[Self::Delivered, Self::Cancelled],
            Self::Delivered | Self::Cancelled => &[],
        }
    }

    /// The forward successor on the happy path, if any.
    #[must_use]
    pub const fn next_step(self) -> Option<Self> {
        match self {
            Self::Pending => Some(Self::PickedUp),
            Self::PickedUp => Some(Self::Washing),
            Self::Washing => Some(Self::Finished),
            Self::Finished => Some(Self::Delivered),
            Self::Delivered | Self::Cancelled => None,
        }
    }

    /// Returns `true` if no transition leaves this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Returns `true` while the requester is still waiting on the job.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::PickedUp | Self::Washing)
    }

    /// Returns `true` if moving to `target` is legal.
    #[must_use]
    pub fn can_transition_to(self, target: Self) -> bool {
        self.allowed_next().contains(&target)
    }

    /// Stable name, identical to the serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::PickedUp => "PickedUp",
            Self::Washing => "Washing",
            Self::Finished => "Finished",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Computes the appointment that results from moving `appointment` to
/// `target`. The input is not modified and nothing is persisted.
///
/// # Errors
///
/// Returns `DomainError::InvalidTransition` if `target` is not in the allowed
/// set of the current status, which includes every target when the current
/// status is terminal.
pub fn transition(appointment: &Appointment, target: AppointmentStatus) -> DomainResult<Appointment> {
    let current = appointment.status;
    if !current.can_transition_to(target) {
        return Err(DomainError::InvalidTransition {
            from: current.to_string(),
            to: target.to_string(),
        });
    }
    Ok(Appointment {
        status: target,
        ..appointment.clone()
    })
}
