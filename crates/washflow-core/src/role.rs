//! Caller roles.

use serde::{Deserialize, Serialize};

/// The role a caller acts under. Each variant carries exactly the data needed
/// to scope its appointment view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Role {
    /// An employee booking washes for their own vehicles.
    Requester {
        /// The employer shown next to the requester's name, if known.
        company_name: Option<String>,
    },
    /// Staff of a car-wash partner working that partner's queue.
    Partner {
        /// The catalog partner this user works for.
        partner_id: String,
    },
    /// Platform operator with visibility over every appointment.
    Admin,
}

impl Role {
    /// Short machine-readable name of the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Requester { .. } => "requester",
            Self::Partner { .. } => "partner",
            Self::Admin => "admin",
        }
    }
}
