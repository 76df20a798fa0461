//! Command abstractions.

use uuid::Uuid;

/// Trait implemented by every write-side request handled by the engine
/// (bookings and status changes).
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Stable name for this command, used as a tracing field.
    fn command_type(&self) -> &'static str;

    /// Correlation ID to trace this command through the system.
    fn correlation_id(&self) -> Uuid;
}
