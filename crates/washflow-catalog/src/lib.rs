//! Washflow: Catalog & Directory bounded context.
//!
//! Read-only registries of the services partners sell, the partners that
//! sell them, and the users whose role scopes what they may query.

pub mod application;
pub mod domain;
