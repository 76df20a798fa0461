//! Washflow: durable slot backends.
//!
//! Implementations of `washflow_core::slot::DurableSlot`: a directory of JSON
//! files for single-node deployments and a PostgreSQL table for shared ones.

pub mod file_slot;
pub mod pg_slot;
pub mod schema;
