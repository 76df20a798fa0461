//! Catalog domain types.

pub mod definitions;
pub mod entities;
