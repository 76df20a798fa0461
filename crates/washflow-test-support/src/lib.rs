//! Shared test doubles and utilities for the Washflow appointment engine.

mod clock;
mod ids;
mod slot;

pub use clock::FixedClock;
pub use ids::SequenceIds;
pub use slot::{FailingSlot, InMemorySlot};
