//! Washflow: Appointment Lifecycle bounded context.
//!
//! Responsible for the appointment state machine, the durable appointment
//! store with its role-scoped views, and the booking transaction.

pub mod application;
pub mod domain;
