//! Serialized catalog definitions.
//!
//! A definition is the on-disk shape of a catalog: services are listed once
//! and partners refer to them by id. `Catalog::from_definition` resolves the
//! references into shared records.

use serde::Deserialize;

use super::entities::{Service, User};

/// A partner as written in a catalog file.
#[derive(Debug, Clone, Deserialize)]
pub struct PartnerDefinition {
    /// Unique partner identifier.
    pub id: String,
    /// Business name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// Average customer rating, 0.0 to 5.0.
    pub rating: f32,
    /// Ids of the services offered, in display order.
    pub services: Vec<String>,
}

/// A complete catalog file.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogDefinition {
    /// The canonical service list.
    pub services: Vec<Service>,
    /// Partners referencing `services` by id.
    pub partners: Vec<PartnerDefinition>,
    /// Users known to the directory. Optional; the built-in directory is used
    /// when the file has none.
    #[serde(default)]
    pub users: Vec<User>,
}
