//! In-memory `ClinicStore` backed by `RwLock`-guarded maps.
//!
//! Suitable for a single-process deployment and for tests. A single
//! write lock per entity map gives the closure-taking operations their
//! critical section; `commit_consultation` takes both the appointment
//! and record locks before applying, so the pair lands together.

use std::collections::HashMap;
use std::sync::RwLock;

use clinic_types::{AppointmentStatus, Role};
use uuid::Uuid;

use crate::error::{WorkflowError, WorkflowResult};
use crate::model::{Appointment, MedicalRecord, User};
use crate::store::ClinicStore;

#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    appointments: RwLock<HashMap<Uuid, Appointment>>,
    records: RwLock<HashMap<Uuid, MedicalRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted_by_registration(mut appointments: Vec<Appointment>) -> Vec<Appointment> {
        appointments.sort_by_key(|apt| apt.created_at);
        appointments
    }
}

impl ClinicStore for MemoryStore {
    fn user(&self, id: Uuid) -> Option<User> {
        self.users.read().expect("users lock poisoned").get(&id).cloned()
    }

    fn users_with_role(&self, role: Role) -> Vec<User> {
        let mut users: Vec<User> = self
            .users
            .read()
            .expect("users lock poisoned")
            .values()
            .filter(|u| u.role == role)
            .cloned()
            .collect();
        users.sort_by_key(|u| u.created_at);
        users
    }

    fn users_with_status(&self, status: &str) -> Vec<User> {
        let mut users: Vec<User> = self
            .users
            .read()
            .expect("users lock poisoned")
            .values()
            .filter(|u| u.status == status)
            .cloned()
            .collect();
        users.sort_by_key(|u| u.created_at);
        users
    }

    fn save_user(&self, user: User) -> User {
        self.users
            .write()
            .expect("users lock poisoned")
            .insert(user.id, user.clone());
        user
    }

    fn appointment(&self, id: Uuid) -> Option<Appointment> {
        self.appointments
            .read()
            .expect("appointments lock poisoned")
            .get(&id)
            .cloned()
    }

    fn appointments_with_status(&self, status: AppointmentStatus) -> Vec<Appointment> {
        let appointments = self
            .appointments
            .read()
            .expect("appointments lock poisoned")
            .values()
            .filter(|apt| apt.status == status)
            .cloned()
            .collect();
        Self::sorted_by_registration(appointments)
    }

    fn appointments_for_doctor(&self, doctor_id: Uuid) -> Vec<Appointment> {
        let appointments = self
            .appointments
            .read()
            .expect("appointments lock poisoned")
            .values()
            .filter(|apt| apt.doctor_id == Some(doctor_id))
            .cloned()
            .collect();
        Self::sorted_by_registration(appointments)
    }

    fn appointments_for_patient(&self, patient_id: Uuid) -> Vec<Appointment> {
        let appointments = self
            .appointments
            .read()
            .expect("appointments lock poisoned")
            .values()
            .filter(|apt| apt.patient_id == patient_id)
            .cloned()
            .collect();
        Self::sorted_by_registration(appointments)
    }

    fn save_appointment(&self, appointment: Appointment) -> Appointment {
        self.appointments
            .write()
            .expect("appointments lock poisoned")
            .insert(appointment.id, appointment.clone());
        appointment
    }

    fn update_appointment(
        &self,
        id: Uuid,
        apply: &dyn Fn(&Appointment) -> WorkflowResult<Appointment>,
    ) -> WorkflowResult<Appointment> {
        let mut appointments = self.appointments.write().expect("appointments lock poisoned");
        let current = appointments
            .get(&id)
            .ok_or_else(|| WorkflowError::not_found("appointment", id))?;
        let updated = apply(current)?;
        appointments.insert(id, updated.clone());
        Ok(updated)
    }

    fn record(&self, id: Uuid) -> Option<MedicalRecord> {
        self.records
            .read()
            .expect("records lock poisoned")
            .get(&id)
            .cloned()
    }

    fn record_for_appointment(&self, appointment_id: Uuid) -> Option<MedicalRecord> {
        self.records
            .read()
            .expect("records lock poisoned")
            .values()
            .find(|r| r.appointment_id == appointment_id)
            .cloned()
    }

    fn save_record(&self, record: MedicalRecord) -> MedicalRecord {
        self.records
            .write()
            .expect("records lock poisoned")
            .insert(record.id, record.clone());
        record
    }

    fn commit_consultation(
        &self,
        appointment_id: Uuid,
        apply: &dyn Fn(&Appointment) -> WorkflowResult<(Appointment, MedicalRecord)>,
    ) -> WorkflowResult<(Appointment, MedicalRecord)> {
        // Lock order: appointments before records, everywhere.
        let mut appointments = self.appointments.write().expect("appointments lock poisoned");
        let mut records = self.records.write().expect("records lock poisoned");

        let current = appointments
            .get(&appointment_id)
            .ok_or_else(|| WorkflowError::not_found("appointment", appointment_id))?;
        let (updated, record) = apply(current)?;

        appointments.insert(appointment_id, updated.clone());
        records.insert(record.id, record.clone());
        Ok((updated, record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle;
    use clinic_types::{NonEmptyText, TriagePriority};

    fn store_with_waiting() -> (MemoryStore, Appointment) {
        let store = MemoryStore::new();
        let apt = store.save_appointment(Appointment::waiting(
            Uuid::new_v4(),
            TriagePriority::High,
        ));
        (store, apt)
    }

    #[test]
    fn test_save_is_upsert() {
        let (store, apt) = store_with_waiting();
        let mut renamed = apt.clone();
        renamed.rough_notes = "fever, cough".into();
        store.save_appointment(renamed.clone());

        let found = store.appointment(apt.id).expect("appointment should exist");
        assert_eq!(found.rough_notes, "fever, cough");
    }

    #[test]
    fn test_update_appointment_unknown_id_is_not_found() {
        let store = MemoryStore::new();
        let err = store
            .update_appointment(Uuid::new_v4(), &|apt| Ok(apt.clone()))
            .expect_err("unknown id should fail");
        assert!(matches!(err, WorkflowError::NotFound { kind: "appointment", .. }));
    }

    #[test]
    fn test_update_appointment_failure_writes_nothing() {
        let (store, apt) = store_with_waiting();
        let err = store
            .update_appointment(apt.id, &|snapshot| {
                lifecycle::complete(snapshot) // illegal from WAITING
            })
            .expect_err("illegal transition should fail");
        assert!(matches!(err, WorkflowError::InvalidTransition { .. }));

        let found = store.appointment(apt.id).expect("appointment should exist");
        assert_eq!(found.status, AppointmentStatus::Waiting);
    }

    #[test]
    fn test_accept_cas_lets_only_one_doctor_win() {
        let (store, apt) = store_with_waiting();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        store
            .update_appointment(apt.id, &|snapshot| lifecycle::accept(snapshot, first))
            .expect("first accept should win");
        let err = store
            .update_appointment(apt.id, &|snapshot| lifecycle::accept(snapshot, second))
            .expect_err("second accept should lose");
        assert!(matches!(err, WorkflowError::InvalidTransition { .. }));

        let found = store.appointment(apt.id).expect("appointment should exist");
        assert_eq!(found.doctor_id, Some(first));
    }

    #[test]
    fn test_commit_consultation_persists_both_or_neither() {
        let (store, apt) = store_with_waiting();
        let accepted = store
            .update_appointment(apt.id, &|s| lifecycle::accept(s, Uuid::new_v4()))
            .expect("accept should succeed");

        // Failing closure: nothing is written.
        let err = store
            .commit_consultation(apt.id, &|_| {
                Err(WorkflowError::InvalidInput("boom".into()))
            })
            .expect_err("failing closure should propagate");
        assert!(matches!(err, WorkflowError::InvalidInput(_)));
        assert!(store.record_for_appointment(apt.id).is_none());
        assert_eq!(
            store.appointment(apt.id).expect("exists").status,
            accepted.status
        );

        // Succeeding closure: both land together.
        store
            .commit_consultation(apt.id, &|snapshot| {
                let completed = lifecycle::complete(snapshot)?;
                let record = MedicalRecord::unsigned(
                    snapshot.id,
                    "note".into(),
                    "summary".into(),
                    None,
                );
                Ok((completed, record))
            })
            .expect("commit should succeed");

        assert_eq!(
            store.appointment(apt.id).expect("exists").status,
            AppointmentStatus::Completed
        );
        assert!(store.record_for_appointment(apt.id).is_some());
    }

    #[test]
    fn test_appointments_with_status_keeps_registration_order() {
        let store = MemoryStore::new();
        let mut ids = Vec::new();
        for i in 0..4 {
            let mut apt = Appointment::waiting(Uuid::new_v4(), TriagePriority::Low);
            apt.created_at = chrono::Utc::now() + chrono::Duration::seconds(i);
            ids.push(apt.id);
            store.save_appointment(apt);
        }

        let found: Vec<_> = store
            .appointments_with_status(AppointmentStatus::Waiting)
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(found, ids);
    }

    #[test]
    fn test_user_queries_filter_on_role_and_status() {
        let store = MemoryStore::new();
        let doctor = store.save_user(User::new(
            NonEmptyText::new("Dr. Emily Stone").expect("valid name"),
            Role::Doctor,
            "AVAILABLE",
        ));
        store.save_user(User::new(
            NonEmptyText::new("Nurse Sarah Johnson").expect("valid name"),
            Role::Nurse,
            "BUSY",
        ));

        let doctors = store.users_with_role(Role::Doctor);
        assert_eq!(doctors.len(), 1);
        assert_eq!(doctors[0].id, doctor.id);

        let available = store.users_with_status("AVAILABLE");
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].id, doctor.id);
    }
}
