//! Built-in catalog and directory data.

use std::sync::Arc;

use washflow_core::money::Money;
use washflow_core::role::Role;

use crate::domain::entities::{Partner, Service, User};

/// The standard service list.
pub(crate) fn services() -> Vec<Service> {
    vec![
        Service {
            id: "s1".into(),
            name: "Eco Lavagem Simples".into(),
            description: "Lavagem externa a seco + pretinho".into(),
            price: Money::from_units(35),
            duration_minutes: 40,
        },
        Service {
            id: "s2".into(),
            name: "Completa Interiores".into(),
            description: "Aspiração, limpeza de painel, couro".into(),
            price: Money::from_units(60),
            duration_minutes: 60,
        },
        Service {
            id: "s3".into(),
            name: "Detalhamento Premium".into(),
            description: "Completa + cera externa + motor".into(),
            price: Money::from_units(120),
            duration_minutes: 120,
        },
    ]
}

/// The standard partners. `p1` sells everything; `p2` sells the first two
/// services.
pub(crate) fn partners(services: &[Arc<Service>]) -> Vec<Partner> {
    vec![
        Partner {
            id: "p1".into(),
            name: "Lava-Rápido Brilho Total".into(),
            address: "Rua da Inovação, 123 (Bloco B)".into(),
            rating: 4.8,
            services: services.to_vec(),
        },
        Partner {
            id: "p2".into(),
            name: "QuickClean Móvel".into(),
            address: "Av. Tecnológica, 456".into(),
            rating: 4.5,
            services: services.iter().take(2).cloned().collect(),
        },
    ]
}

/// The standard directory: one user per role.
pub(crate) fn users() -> Vec<User> {
    vec![
        User {
            id: "u1".into(),
            name: "João Silva".into(),
            email: "funcionario@empresa.com.br".into(),
            role: Role::Requester {
                company_name: Some("TechCorp Ltda.".into()),
            },
        },
        User {
            id: "u2".into(),
            name: "Alice Gerente".into(),
            email: "parceiro@lavagem.com.br".into(),
            role: Role::Partner {
                partner_id: "p1".into(),
            },
        },
        User {
            id: "u3".into(),
            name: "Admin do Sistema".into(),
            email: "admin@plataforma.com.br".into(),
            role: Role::Admin,
        },
    ]
}
