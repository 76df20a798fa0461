//! The catalog store.
//!
//! Holds the canonical service list and the partners that reference it. The
//! catalog is built once, validated, and read-only afterwards.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;
use washflow_core::error::{DomainError, DomainResult};

use crate::application::seed;
use crate::domain::definitions::CatalogDefinition;
use crate::domain::entities::{Partner, Service};

/// Read-only registry of services and partners.
#[derive(Debug, Clone)]
pub struct Catalog {
    services: Vec<Arc<Service>>,
    partners: Vec<Partner>,
}

/// Parses a YAML catalog file.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the document is not a valid
/// catalog definition.
pub fn parse_definition(yaml: &str) -> DomainResult<CatalogDefinition> {
    serde_yaml::from_str(yaml)
        .map_err(|e| DomainError::validation(format!("catalog parse failed: {e}")))
}

impl Catalog {
    /// The standard catalog shipped with the engine.
    #[must_use]
    pub fn builtin() -> Self {
        let services: Vec<Arc<Service>> = seed::services().into_iter().map(Arc::new).collect();
        let partners = seed::partners(&services);
        Self { services, partners }
    }

    /// Builds a catalog from a definition, resolving partner service ids into
    /// shared records.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if ids are duplicated, a duration is
    /// zero, a rating is outside 0.0–5.0, or a partner references a service
    /// that is not defined.
    pub fn from_definition(definition: &CatalogDefinition) -> DomainResult<Self> {
        let mut seen = HashSet::new();
        for service in &definition.services {
            if !seen.insert(service.id.as_str()) {
                return Err(DomainError::validation(format!(
                    "duplicate service id {}",
                    service.id
                )));
            }
            if service.duration_minutes == 0 {
                return Err(DomainError::validation(format!(
                    "service {} must have a positive duration",
                    service.id
                )));
            }
        }
        let services: Vec<Arc<Service>> = definition
            .services
            .iter()
            .cloned()
            .map(Arc::new)
            .collect();

        let mut partner_ids = HashSet::new();
        let mut partners = Vec::with_capacity(definition.partners.len());
        for def in &definition.partners {
            if !partner_ids.insert(def.id.as_str()) {
                return Err(DomainError::validation(format!(
                    "duplicate partner id {}",
                    def.id
                )));
            }
            if !(0.0..=5.0).contains(&def.rating) {
                return Err(DomainError::validation(format!(
                    "partner {} rating {} is outside 0.0-5.0",
                    def.id, def.rating
                )));
            }
            let mut offered = Vec::with_capacity(def.services.len());
            for service_id in &def.services {
                let service = services
                    .iter()
                    .find(|s| &s.id == service_id)
                    .ok_or_else(|| {
                        DomainError::validation(format!(
                            "partner {} references undefined service {service_id}",
                            def.id
                        ))
                    })?;
                if offered.iter().any(|s: &Arc<Service>| &s.id == service_id) {
                    return Err(DomainError::validation(format!(
                        "partner {} lists service {service_id} twice",
                        def.id
                    )));
                }
                offered.push(Arc::clone(service));
            }
            partners.push(Partner {
                id: def.id.clone(),
                name: def.name.clone(),
                address: def.address.clone(),
                rating: def.rating,
                services: offered,
            });
        }

        debug!(
            services = services.len(),
            partners = partners.len(),
            "catalog built from definition"
        );
        Ok(Self { services, partners })
    }

    /// Parses and builds a catalog from YAML.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` on parse or validation failure.
    pub fn from_yaml(yaml: &str) -> DomainResult<Self> {
        Self::from_definition(&parse_definition(yaml)?)
    }

    /// All services, in catalog order.
    #[must_use]
    pub fn list_services(&self) -> &[Arc<Service>] {
        &self.services
    }

    /// All partners, in catalog order.
    #[must_use]
    pub fn list_partners(&self) -> &[Partner] {
        &self.partners
    }

    /// Looks up a partner by id.
    #[must_use]
    pub fn partner(&self, partner_id: &str) -> Option<&Partner> {
        self.partners.iter().find(|p| p.id == partner_id)
    }

    /// Looks up a service by id in the global list.
    #[must_use]
    pub fn service(&self, service_id: &str) -> Option<&Arc<Service>> {
        self.services.iter().find(|s| s.id == service_id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
