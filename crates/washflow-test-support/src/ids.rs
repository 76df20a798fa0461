//! Test id generator: predictable `IdGenerator` implementation for tests.

use std::sync::atomic::{AtomicU64, Ordering};

use washflow_core::ids::IdGenerator;

/// An id generator that yields `{prefix}-1`, `{prefix}-2`, ... in call order,
/// starting after an optional offset.
#[derive(Debug, Default)]
pub struct SequenceIds {
    next: AtomicU64,
}

impl SequenceIds {
    /// Create a generator whose first id is `{prefix}-1`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a generator whose first id is `{prefix}-{start}`.
    #[must_use]
    pub fn starting_at(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start.saturating_sub(1)),
        }
    }
}

impl IdGenerator for SequenceIds {
    fn next_id(&self, prefix: &str) -> String {
        let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{prefix}-{n}")
    }
}
