//! Test slots: `DurableSlot` implementations for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use washflow_core::error::DomainError;
use washflow_core::slot::DurableSlot;

/// A slot that keeps documents in memory and counts writes. Reads and writes
/// always succeed.
#[derive(Debug, Default)]
pub struct InMemorySlot {
    documents: Mutex<HashMap<String, String>>,
    writes: Mutex<Vec<String>>,
}

impl InMemorySlot {
    /// Create an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot that already holds `value` under `key`.
    #[must_use]
    pub fn with_document(key: &str, value: &str) -> Self {
        let slot = Self::default();
        slot.documents
            .lock()
            .unwrap()
            .insert(key.to_owned(), value.to_owned());
        slot
    }

    /// Returns the document currently stored under `key`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn document(&self, key: &str) -> Option<String> {
        self.documents.lock().unwrap().get(key).cloned()
    }

    /// Returns the keys written so far, in write order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn written_keys(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl DurableSlot for InMemorySlot {
    async fn read(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.documents.lock().unwrap().get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), DomainError> {
        self.documents
            .lock()
            .unwrap()
            .insert(key.to_owned(), value.to_owned());
        self.writes.lock().unwrap().push(key.to_owned());
        Ok(())
    }
}

/// A slot whose reads and/or writes return an infrastructure error. Useful for
/// testing seed fallback and all-or-nothing mutation paths.
#[derive(Debug, Clone, Copy)]
pub struct FailingSlot {
    fail_reads: bool,
    fail_writes: bool,
}

impl FailingSlot {
    /// Every read and write fails.
    #[must_use]
    pub fn always() -> Self {
        Self {
            fail_reads: true,
            fail_writes: true,
        }
    }

    /// Reads report an empty slot; every write fails.
    #[must_use]
    pub fn on_write() -> Self {
        Self {
            fail_reads: false,
            fail_writes: true,
        }
    }
}

#[async_trait]
impl DurableSlot for FailingSlot {
    async fn read(&self, _key: &str) -> Result<Option<String>, DomainError> {
        if self.fail_reads {
            return Err(DomainError::Infrastructure("connection refused".into()));
        }
        Ok(None)
    }

    async fn write(&self, _key: &str, _value: &str) -> Result<(), DomainError> {
        if self.fail_writes {
            return Err(DomainError::Infrastructure("disk full".into()));
        }
        Ok(())
    }
}
