//! Catalog entities.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use washflow_core::money::Money;
use washflow_core::role::Role;

/// A wash package sold by one or more partners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Unique service identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// What the package includes.
    pub description: String,
    /// List price in minor units.
    pub price: Money,
    /// Expected duration of the job.
    pub duration_minutes: u32,
}

/// A car-wash business offering a subset of the catalog's services.
///
/// `services` holds shared handles into the catalog's canonical service list;
/// two partners offering the same service point at the same record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Partner {
    /// Unique partner identifier.
    pub id: String,
    /// Business name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// Average customer rating, 0.0 to 5.0.
    pub rating: f32,
    /// Services offered, in display order.
    pub services: Vec<Arc<Service>>,
}

impl Partner {
    /// Returns the offered service with the given id, if this partner sells it.
    #[must_use]
    pub fn offered_service(&self, service_id: &str) -> Option<&Arc<Service>> {
        self.services.iter().find(|s| s.id == service_id)
    }

    /// Returns `true` if this partner sells the given service.
    #[must_use]
    pub fn offers(&self, service_id: &str) -> bool {
        self.offered_service(service_id).is_some()
    }
}

/// A person who can act against the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier; requesters' appointments are keyed by it.
    pub id: String,
    /// Display name, snapshotted into appointments at booking time.
    pub name: String,
    /// Login email.
    pub email: String,
    /// The role scoping this user's view.
    pub role: Role,
}
