//! Appointment domain types and rules.

pub mod appointment;
pub mod commands;
pub mod lifecycle;
