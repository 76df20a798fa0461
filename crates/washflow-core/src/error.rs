//! Domain error types.

use thiserror::Error;

/// Result type used across the domain and application layers.
pub type DomainResult<T> = Result<T, DomainError>;

/// Top-level domain error type.
///
/// Every variant leaves persisted and in-memory state unchanged; callers may
/// correct their input and retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The referenced partner is not in the catalog.
    #[error("unknown partner: {0}")]
    UnknownPartner(String),

    /// The referenced service is not offered by the selected partner.
    #[error("service {service_id} is not offered by partner {partner_id}")]
    UnknownService {
        /// The partner the booking targeted.
        partner_id: String,
        /// The service that was requested.
        service_id: String,
    },

    /// The vehicle snapshot is missing mandatory data.
    #[error("invalid vehicle: {0}")]
    InvalidVehicle(String),

    /// A referenced record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A status change violates the appointment lifecycle.
    #[error("invalid transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
    },

    /// Static data (catalog, directory, configuration) breaks an invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl DomainError {
    /// Shorthand for a `NotFound` error.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Shorthand for a `Validation` error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Shorthand for an `Infrastructure` error.
    pub fn infrastructure(msg: impl Into<String>) -> Self {
        Self::Infrastructure(msg.into())
    }

    /// Returns `true` for errors caused by the caller's booking input.
    #[must_use]
    pub fn is_booking_input(&self) -> bool {
        matches!(
            self,
            Self::UnknownPartner(_) | Self::UnknownService { .. } | Self::InvalidVehicle(_)
        )
    }
}
