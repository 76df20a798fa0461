//! Seed appointment dataset.
//!
//! Used as the store's initial collection when the durable slot is empty or
//! unusable.

use chrono::Duration;
use washflow_core::clock::Clock;
use washflow_core::money::Money;

use crate::domain::appointment::{Appointment, Vehicle};
use crate::domain::lifecycle::AppointmentStatus;

fn corolla() -> Vehicle {
    Vehicle {
        id: "v1".into(),
        plate: "ABC-1234".into(),
        model: "Toyota Corolla".into(),
        color: "Silver".into(),
    }
}

/// Two appointments for requester `u1`: one in progress today at `p1`, one
/// delivered yesterday by `p2`. Dates are relative to `clock`.
#[must_use]
pub fn seed_appointments(clock: &dyn Clock) -> Vec<Appointment> {
    let now = clock.now();
    vec![
        Appointment {
            id: "appt-1".into(),
            requester_id: "u1".into(),
            requester_name: "João Silva".into(),
            partner_id: "p1".into(),
            partner_name: "Lava-Rápido Brilho Total".into(),
            service_id: "s1".into(),
            service_name: "Eco Lavagem Simples".into(),
            price: Money::from_units(35),
            vehicle: corolla(),
            date: now,
            status: AppointmentStatus::Washing,
        },
        Appointment {
            id: "appt-2".into(),
            requester_id: "u1".into(),
            requester_name: "João Silva".into(),
            partner_id: "p2".into(),
            partner_name: "QuickClean Móvel".into(),
            service_id: "s2".into(),
            service_name: "Completa Interiores".into(),
            price: Money::from_units(60),
            vehicle: corolla(),
            date: now - Duration::days(1),
            status: AppointmentStatus::Delivered,
        },
    ]
}
