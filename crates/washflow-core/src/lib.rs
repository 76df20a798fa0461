//! Washflow Core: shared domain abstractions.
//!
//! This crate defines the fundamental traits and types that the catalog and
//! appointment contexts depend on. It contains no infrastructure code.

pub mod clock;
pub mod command;
pub mod error;
pub mod ids;
pub mod money;
pub mod role;
pub mod slot;
