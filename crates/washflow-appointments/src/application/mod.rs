//! Application services for the Appointment Lifecycle context.

pub mod command_handlers;
pub mod engine;
pub mod query_handlers;
pub mod seed;
pub mod store;
