//! Route modules organized by engine capability.

pub mod appointments;
pub mod catalog;
pub mod health;
pub mod reports;
pub mod users;
