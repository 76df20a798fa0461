//! The appointment store.
//!
//! Owns the appointment collection. Every mutation runs under one lock that
//! covers reading the collection, computing the change, and writing the whole
//! collection to the durable slot; the in-memory collection is replaced only
//! after the write succeeds.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};
use washflow_core::error::{DomainError, DomainResult};
use washflow_core::ids::IdGenerator;
use washflow_core::slot::DurableSlot;

use crate::domain::appointment::{Appointment, AppointmentDraft};
use crate::domain::lifecycle::{self, AppointmentStatus};

/// Slot key the appointment collection is stored under.
pub const APPOINTMENTS_SLOT_KEY: &str = "washflow.appointments";

/// Schema tag written into every persisted document. Documents carrying any
/// other tag are discarded at startup.
pub const APPOINTMENTS_SCHEMA: &str = "washflow.appointments.v1";

#[derive(Serialize)]
struct SlotDocumentRef<'a> {
    schema: &'a str,
    appointments: &'a [Appointment],
}

#[derive(Deserialize)]
struct RawSlotDocument {
    schema: String,
    appointments: serde_json::Value,
}

/// How the store obtained its initial collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreOrigin {
    /// Loaded from the durable slot.
    Restored,
    /// The slot was empty; the seed dataset was used.
    Seeded,
    /// The slot could not be read or decoded; the seed dataset was used.
    Recovered,
}

/// Serializes a collection into a slot document.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if serialization fails.
pub fn encode_document(appointments: &[Appointment]) -> DomainResult<String> {
    serde_json::to_string(&SlotDocumentRef {
        schema: APPOINTMENTS_SCHEMA,
        appointments,
    })
    .map_err(|e| DomainError::infrastructure(format!("appointment serialization failed: {e}")))
}

/// Parses a slot document, rejecting foreign schemas, unknown statuses and
/// duplicate ids.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` describing why the document is
/// unusable.
pub fn decode_document(document: &str) -> DomainResult<Vec<Appointment>> {
    let raw: RawSlotDocument = serde_json::from_str(document)
        .map_err(|e| DomainError::infrastructure(format!("slot document parse failed: {e}")))?;
    if raw.schema != APPOINTMENTS_SCHEMA {
        return Err(DomainError::infrastructure(format!(
            "slot schema mismatch: expected {APPOINTMENTS_SCHEMA}, found {}",
            raw.schema
        )));
    }
    let appointments: Vec<Appointment> = serde_json::from_value(raw.appointments)
        .map_err(|e| DomainError::infrastructure(format!("appointment decode failed: {e}")))?;
    let mut ids = HashSet::new();
    for appointment in &appointments {
        if !ids.insert(appointment.id.as_str()) {
            return Err(DomainError::infrastructure(format!(
                "duplicate appointment id {}",
                appointment.id
            )));
        }
    }
    Ok(appointments)
}

fn newest_first(mut appointments: Vec<Appointment>) -> Vec<Appointment> {
    appointments.sort_by(|a, b| b.date.cmp(&a.date));
    appointments
}

/// Durable, lock-guarded appointment collection.
///
/// The canonical order is most-recent-first by creation: new appointments are
/// prepended.
pub struct AppointmentStore {
    slot: Arc<dyn DurableSlot>,
    ids: Arc<dyn IdGenerator>,
    appointments: Mutex<Vec<Appointment>>,
    origin: StoreOrigin,
}

impl fmt::Debug for AppointmentStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppointmentStore")
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

impl AppointmentStore {
    /// Opens the store over `slot`.
    ///
    /// Loads the persisted collection if there is one. If the slot is empty,
    /// unreadable, or holds a document that does not decode under the current
    /// schema, the store starts from `seed` instead. Opening never fails.
    #[instrument(skip_all)]
    pub async fn open(
        slot: Arc<dyn DurableSlot>,
        ids: Arc<dyn IdGenerator>,
        seed: Vec<Appointment>,
    ) -> Self {
        let (appointments, origin) = match slot.read(APPOINTMENTS_SLOT_KEY).await {
            Ok(Some(document)) => match decode_document(&document) {
                Ok(appointments) => (appointments, StoreOrigin::Restored),
                Err(e) => {
                    warn!(error = %e, "discarding persisted appointments; using seed data");
                    (seed, StoreOrigin::Recovered)
                }
            },
            Ok(None) => {
                debug!("appointment slot is empty; using seed data");
                (seed, StoreOrigin::Seeded)
            }
            Err(e) => {
                warn!(error = %e, "appointment slot unreadable; using seed data");
                (seed, StoreOrigin::Recovered)
            }
        };

        info!(count = appointments.len(), ?origin, "appointment store opened");
        Self {
            slot,
            ids,
            appointments: Mutex::new(appointments),
            origin,
        }
    }

    /// How the initial collection was obtained.
    #[must_use]
    pub fn origin(&self) -> StoreOrigin {
        self.origin
    }

    async fn persist(&self, appointments: &[Appointment]) -> DomainResult<()> {
        let document = encode_document(appointments)?;
        self.slot.write(APPOINTMENTS_SLOT_KEY, &document).await?;
        debug!(count = appointments.len(), "appointments persisted");
        Ok(())
    }

    fn fresh_id(&self, existing: &[Appointment]) -> String {
        loop {
            let id = self.ids.next_id("appt");
            if !existing.iter().any(|a| a.id == id) {
                return id;
            }
        }
    }

    /// Stores `draft` as a new `Pending` appointment at the front of the
    /// collection.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the slot write fails; the
    /// collection is then unchanged.
    #[instrument(skip(self, draft), fields(requester_id = %draft.requester_id, partner_id = %draft.partner_id))]
    pub async fn create(&self, draft: AppointmentDraft) -> DomainResult<Appointment> {
        let mut appointments = self.appointments.lock().await;

        let id = self.fresh_id(&appointments);
        let appointment = draft.into_appointment(id, self.ids.next_id("veh"));

        let mut next = Vec::with_capacity(appointments.len() + 1);
        next.push(appointment.clone());
        next.extend(appointments.iter().cloned());

        self.persist(&next).await?;
        *appointments = next;

        info!(appointment_id = %appointment.id, "appointment created");
        Ok(appointment)
    }

    /// Moves an appointment to `target` if the lifecycle allows it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if no appointment has `id`,
    /// `DomainError::InvalidTransition` if the lifecycle forbids the move, and
    /// `DomainError::Infrastructure` if the slot write fails. In every error
    /// case the collection is unchanged.
    #[instrument(skip(self, target), fields(target = %target))]
    pub async fn update_status(
        &self,
        id: &str,
        target: AppointmentStatus,
    ) -> DomainResult<Appointment> {
        let mut appointments = self.appointments.lock().await;

        let index = appointments
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| DomainError::not_found(format!("appointment {id}")))?;
        let from = appointments[index].status;
        let updated = lifecycle::transition(&appointments[index], target)?;

        let mut next = appointments.clone();
        next[index] = updated.clone();

        self.persist(&next).await?;
        *appointments = next;

        info!(appointment_id = %id, %from, to = %target, "appointment status changed");
        Ok(updated)
    }

    /// Returns one appointment by id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if no appointment has `id`.
    pub async fn get(&self, id: &str) -> DomainResult<Appointment> {
        self.appointments
            .lock()
            .await
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("appointment {id}")))
    }

    /// Appointments booked by `requester_id`, newest first.
    pub async fn list_by_requester(&self, requester_id: &str) -> Vec<Appointment> {
        let matching = self
            .appointments
            .lock()
            .await
            .iter()
            .filter(|a| a.requester_id == requester_id)
            .cloned()
            .collect();
        newest_first(matching)
    }

    /// Appointments assigned to `partner_id`, newest first.
    pub async fn list_by_partner(&self, partner_id: &str) -> Vec<Appointment> {
        let matching = self
            .appointments
            .lock()
            .await
            .iter()
            .filter(|a| a.partner_id == partner_id)
            .cloned()
            .collect();
        newest_first(matching)
    }

    /// Every appointment, in the store's canonical order.
    pub async fn list_all(&self) -> Vec<Appointment> {
        self.appointments.lock().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use washflow_core::money::Money;
    use washflow_test_support::{FailingSlot, InMemorySlot, SequenceIds};

    use super::*;
    use crate::domain::appointment::VehicleDetails;

    fn draft(requester_id: &str, partner_id: &str, hours_after: i64) -> AppointmentDraft {
        AppointmentDraft {
            requester_id: requester_id.into(),
            requester_name: format!("name of {requester_id}"),
            partner_id: partner_id.into(),
            partner_name: format!("name of {partner_id}"),
            service_id: "s1".into(),
            service_name: "Eco Lavagem Simples".into(),
            price: Money::from_units(35),
            vehicle: VehicleDetails {
                plate: "ABC-1234".into(),
                model: "Toyota Corolla".into(),
                color: "Silver".into(),
            },
            date: Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap() + Duration::hours(hours_after),
        }
    }

    async fn empty_store(slot: Arc<InMemorySlot>) -> AppointmentStore {
        AppointmentStore::open(slot, Arc::new(SequenceIds::new()), Vec::new()).await
    }

    #[tokio::test]
    async fn test_create_assigns_id_pending_status_and_prepends() {
        // Arrange
        let slot = Arc::new(InMemorySlot::new());
        let store = empty_store(slot.clone()).await;

        // Act
        let first = store.create(draft("u1", "p1", 0)).await.unwrap();
        let second = store.create(draft("u1", "p1", 1)).await.unwrap();

        // Assert
        assert_eq!(first.id, "appt-1");
        assert_eq!(first.vehicle.id, "veh-2");
        assert_eq!(first.status, AppointmentStatus::Pending);
        assert_eq!(second.id, "appt-3");
        assert_ne!(first.id, second.id);

        let all = store.list_all().await;
        assert_eq!(all, vec![second, first]);
        assert_eq!(slot.written_keys(), vec![APPOINTMENTS_SLOT_KEY; 2]);
    }

    #[tokio::test]
    async fn test_create_skips_ids_already_in_use() {
        // Arrange
        let seed = vec![draft("u1", "p1", 0).into_appointment("appt-1".into(), "veh-0".into())];
        let store = AppointmentStore::open(
            Arc::new(InMemorySlot::new()),
            Arc::new(SequenceIds::new()),
            seed,
        )
        .await;

        // Act
        let created = store.create(draft("u1", "p1", 1)).await.unwrap();

        // Assert
        assert_eq!(created.id, "appt-2");
    }

    #[tokio::test]
    async fn test_create_persists_full_collection_before_returning() {
        // Arrange
        let slot = Arc::new(InMemorySlot::new());
        let store = empty_store(slot.clone()).await;

        // Act
        store.create(draft("u1", "p1", 0)).await.unwrap();
        store.create(draft("u2", "p2", 1)).await.unwrap();

        // Assert
        let document = slot.document(APPOINTMENTS_SLOT_KEY).unwrap();
        let persisted = decode_document(&document).unwrap();
        assert_eq!(persisted, store.list_all().await);
    }

    #[tokio::test]
    async fn test_create_leaves_collection_unchanged_when_write_fails() {
        // Arrange
        let store = AppointmentStore::open(
            Arc::new(FailingSlot::on_write()),
            Arc::new(SequenceIds::new()),
            Vec::new(),
        )
        .await;

        // Act
        let result = store.create(draft("u1", "p1", 0)).await;

        // Assert
        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
        assert!(store.list_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_update_status_applies_valid_transition() {
        // Arrange
        let slot = Arc::new(InMemorySlot::new());
        let store = empty_store(slot.clone()).await;
        let created = store.create(draft("u1", "p1", 0)).await.unwrap();

        // Act
        let updated = store
            .update_status(&created.id, AppointmentStatus::PickedUp)
            .await
            .unwrap();

        // Assert
        assert_eq!(updated.status, AppointmentStatus::PickedUp);
        assert_eq!(
            updated,
            Appointment {
                status: AppointmentStatus::PickedUp,
                ..created.clone()
            }
        );
        assert_eq!(store.get(&created.id).await.unwrap(), updated);
        let persisted = decode_document(&slot.document(APPOINTMENTS_SLOT_KEY).unwrap()).unwrap();
        assert_eq!(persisted[0].status, AppointmentStatus::PickedUp);
    }

    #[tokio::test]
    async fn test_update_status_rejects_invalid_transition_without_mutation() {
        // Arrange
        let slot = Arc::new(InMemorySlot::new());
        let store = empty_store(slot.clone()).await;
        let created = store.create(draft("u1", "p1", 0)).await.unwrap();
        let document_before = slot.document(APPOINTMENTS_SLOT_KEY);

        // Act
        let result = store
            .update_status(&created.id, AppointmentStatus::Washing)
            .await;

        // Assert
        match result.unwrap_err() {
            DomainError::InvalidTransition { from, to } => {
                assert_eq!(from, "Pending");
                assert_eq!(to, "Washing");
            }
            other => panic!("expected InvalidTransition, got {other:?}"),
        }
        assert_eq!(store.get(&created.id).await.unwrap(), created);
        assert_eq!(slot.document(APPOINTMENTS_SLOT_KEY), document_before);
        assert_eq!(slot.written_keys().len(), 1);
    }

    #[tokio::test]
    async fn test_update_status_returns_not_found_for_unknown_id() {
        // Arrange
        let store = empty_store(Arc::new(InMemorySlot::new())).await;

        // Act
        let result = store
            .update_status("appt-404", AppointmentStatus::PickedUp)
            .await;

        // Assert
        match result.unwrap_err() {
            DomainError::NotFound(msg) => assert!(msg.contains("appt-404")),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_update_status_leaves_record_unchanged_when_write_fails() {
        // Arrange
        let seed = vec![draft("u1", "p1", 0).into_appointment("appt-1".into(), "veh-1".into())];
        let store = AppointmentStore::open(
            Arc::new(FailingSlot::on_write()),
            Arc::new(SequenceIds::new()),
            seed.clone(),
        )
        .await;

        // Act
        let result = store
            .update_status("appt-1", AppointmentStatus::PickedUp)
            .await;

        // Assert
        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
        assert_eq!(store.list_all().await, seed);
    }

    #[tokio::test]
    async fn test_list_by_requester_filters_and_sorts_newest_first() {
        // Arrange
        let store = empty_store(Arc::new(InMemorySlot::new())).await;
        let older = store.create(draft("u1", "p1", 5)).await.unwrap();
        let newest = store.create(draft("u1", "p2", 9)).await.unwrap();
        store.create(draft("u2", "p1", 7)).await.unwrap();
        let oldest = store.create(draft("u1", "p1", 1)).await.unwrap();

        // Act
        let listed = store.list_by_requester("u1").await;

        // Assert
        assert_eq!(listed, vec![newest, older, oldest]);
    }

    #[tokio::test]
    async fn test_list_by_partner_filters_and_sorts_newest_first() {
        // Arrange
        let store = empty_store(Arc::new(InMemorySlot::new())).await;
        let a = store.create(draft("u1", "p1", 2)).await.unwrap();
        store.create(draft("u1", "p2", 3)).await.unwrap();
        let b = store.create(draft("u2", "p1", 4)).await.unwrap();

        // Act
        let listed = store.list_by_partner("p1").await;

        // Assert
        assert_eq!(listed, vec![b, a]);
        assert!(store.list_by_partner("p9").await.is_empty());
    }

    #[tokio::test]
    async fn test_list_all_is_stable_between_mutations() {
        // Arrange
        let store = empty_store(Arc::new(InMemorySlot::new())).await;
        store.create(draft("u1", "p1", 0)).await.unwrap();
        store.create(draft("u2", "p2", 1)).await.unwrap();

        // Act
        let first = store.list_all().await;
        let second = store.list_all().await;

        // Assert
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_reopen_restores_persisted_collection() {
        // Arrange
        let slot = Arc::new(InMemorySlot::new());
        let store = empty_store(slot.clone()).await;
        let created = store.create(draft("u1", "p1", 0)).await.unwrap();
        store
            .update_status(&created.id, AppointmentStatus::PickedUp)
            .await
            .unwrap();
        store.create(draft("u2", "p2", 1)).await.unwrap();
        let before = store.list_all().await;

        // Act
        let reopened = AppointmentStore::open(
            slot.clone(),
            Arc::new(SequenceIds::new()),
            vec![draft("u9", "p9", 0).into_appointment("seed".into(), "veh".into())],
        )
        .await;

        // Assert
        assert_eq!(reopened.origin(), StoreOrigin::Restored);
        assert_eq!(reopened.list_all().await, before);
    }

    #[tokio::test]
    async fn test_open_uses_seed_when_slot_is_empty() {
        // Arrange
        let seed = vec![draft("u1", "p1", 0).into_appointment("appt-1".into(), "veh-1".into())];

        // Act
        let store = AppointmentStore::open(
            Arc::new(InMemorySlot::new()),
            Arc::new(SequenceIds::new()),
            seed.clone(),
        )
        .await;

        // Assert
        assert_eq!(store.origin(), StoreOrigin::Seeded);
        assert_eq!(store.list_all().await, seed);
    }

    #[tokio::test]
    async fn test_open_recovers_with_seed_when_slot_read_fails() {
        // Arrange
        let seed = vec![draft("u1", "p1", 0).into_appointment("appt-1".into(), "veh-1".into())];

        // Act
        let store = AppointmentStore::open(
            Arc::new(FailingSlot::always()),
            Arc::new(SequenceIds::new()),
            seed.clone(),
        )
        .await;

        // Assert
        assert_eq!(store.origin(), StoreOrigin::Recovered);
        assert_eq!(store.list_all().await, seed);
    }

    #[tokio::test]
    async fn test_open_recovers_with_seed_when_document_is_corrupt() {
        for document in [
            "not json at all",
            r#"{"schema":"washflow.appointments.v0","appointments":[]}"#,
            r#"{"schema":"washflow.appointments.v1","appointments":[{"id":"x"}]}"#,
            r#"[]"#,
        ] {
            // Arrange
            let slot = Arc::new(InMemorySlot::with_document(APPOINTMENTS_SLOT_KEY, document));
            let seed = vec![draft("u1", "p1", 0).into_appointment("appt-1".into(), "veh-1".into())];

            // Act
            let store = AppointmentStore::open(slot, Arc::new(SequenceIds::new()), seed.clone()).await;

            // Assert
            assert_eq!(store.origin(), StoreOrigin::Recovered, "{document}");
            assert_eq!(store.list_all().await, seed);
        }
    }

    #[test]
    fn test_decode_rejects_unknown_status() {
        let appointment = draft("u1", "p1", 0).into_appointment("appt-1".into(), "veh-1".into());
        let document = encode_document(&[appointment]).unwrap().replace("Pending", "Teleported");

        let result = decode_document(&document);

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }

    #[test]
    fn test_decode_rejects_duplicate_ids() {
        let appointment = draft("u1", "p1", 0).into_appointment("appt-1".into(), "veh-1".into());
        let document = encode_document(&[appointment.clone(), appointment]).unwrap();

        match decode_document(&document).unwrap_err() {
            DomainError::Infrastructure(msg) => assert!(msg.contains("duplicate appointment id")),
            other => panic!("expected Infrastructure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_concurrent_creates_are_serialized() {
        // Arrange
        let slot = Arc::new(InMemorySlot::new());
        let store = Arc::new(empty_store(slot.clone()).await);

        // Act
        let mut handles = Vec::new();
        for i in 0..16 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.create(draft("u1", "p1", i)).await.unwrap()
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        // Assert
        let all = store.list_all().await;
        assert_eq!(all.len(), 16);
        let ids: HashSet<&str> = all.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids.len(), 16);
        let persisted = decode_document(&slot.document(APPOINTMENTS_SLOT_KEY).unwrap()).unwrap();
        assert_eq!(persisted, all);
    }
}
