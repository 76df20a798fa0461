//! Identifier generation abstraction for determinism.
//!
//! In production, identifiers are time-ordered UUIDs. In tests, a sequence
//! implementation is injected so assertions can name the ids up front.

use uuid::Uuid;

/// Abstraction over fresh identifier generation.
pub trait IdGenerator: Send + Sync {
    /// Returns a new identifier of the form `{prefix}-{unique}`.
    ///
    /// Implementations must never return the same value twice for the same
    /// prefix.
    fn next_id(&self, prefix: &str) -> String;
}

/// Production generator backed by UUIDv7.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self, prefix: &str) -> String {
        format!("{prefix}-{}", Uuid::now_v7().simple())
    }
}
