//! Durable slot abstraction.

use async_trait::async_trait;

use crate::error::DomainError;

/// A persisted key-value slot holding one serialized document per key.
///
/// Writers replace the whole document; there is no partial update.
#[async_trait]
pub trait DurableSlot: Send + Sync {
    /// Reads the document stored under `key`, or `None` if nothing was ever
    /// written there.
    async fn read(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Replaces the document stored under `key`.
    async fn write(&self, key: &str, value: &str) -> Result<(), DomainError>;
}
