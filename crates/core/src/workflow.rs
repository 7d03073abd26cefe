//! Clinic workflow service.
//!
//! This is the public face of the core: nurse registration, the triage
//! queue, acceptance, consultation notes, the documentation pipeline and
//! record signing. The presentation layer calls these operations and owns
//! everything HTTP.

use std::sync::Arc;

use clinic_types::{AppointmentStatus, NonEmptyText, Role, TriagePriority};
use uuid::Uuid;

use crate::error::{WorkflowError, WorkflowResult};
use crate::lifecycle;
use crate::model::{Appointment, MedicalRecord, User};
use crate::provider::CompletionProvider;
use crate::store::ClinicStore;
use crate::triage;

/// Coordinates the intake-to-documentation workflow over the store and
/// the completion provider.
#[derive(Clone)]
pub struct ClinicService {
    store: Arc<dyn ClinicStore>,
    provider: Arc<dyn CompletionProvider>,
}

impl ClinicService {
    pub fn new(store: Arc<dyn ClinicStore>, provider: Arc<dyn CompletionProvider>) -> Self {
        Self { store, provider }
    }

    pub fn store(&self) -> &Arc<dyn ClinicStore> {
        &self.store
    }

    /// Registers a walk-in patient and opens a WAITING appointment for
    /// them.
    ///
    /// The patient user is created with status `WAITING`; the
    /// appointment carries the nurse's triage priority and empty rough
    /// notes until a consultation is recorded.
    pub fn register_patient(
        &self,
        patient_name: NonEmptyText,
        priority: TriagePriority,
    ) -> (User, Appointment) {
        let patient = self
            .store
            .save_user(User::new(patient_name, Role::Patient, "WAITING"));
        let appointment = self
            .store
            .save_appointment(Appointment::waiting(patient.id, priority));

        tracing::info!(
            patient_id = %patient.id,
            appointment_id = %appointment.id,
            priority = %appointment.priority,
            "registered patient into triage queue"
        );

        (patient, appointment)
    }

    /// The WAITING appointments in consultation order: HIGH before
    /// MEDIUM before LOW, registration order within a priority.
    pub fn triage_queue(&self) -> Vec<Appointment> {
        triage::ranked_waiting(
            self.store
                .appointments_with_status(AppointmentStatus::Waiting),
        )
    }

    /// The appointment to call in next, if anyone is waiting.
    pub fn next_in_queue(&self) -> Option<Appointment> {
        triage::next_waiting(
            self.store
                .appointments_with_status(AppointmentStatus::Waiting),
        )
    }

    /// A doctor takes a WAITING appointment: WAITING → IN_CONSULT with
    /// the doctor attached.
    ///
    /// The precondition check and the save run as one compare-and-set
    /// inside the store, so of two simultaneous accepts only one
    /// succeeds.
    ///
    /// # Errors
    /// - `NotFound` if the doctor or the appointment does not exist.
    /// - `InvalidInput` if the user accepting is not a doctor.
    /// - `InvalidTransition` if the appointment is not WAITING.
    pub fn accept(&self, appointment_id: Uuid, doctor_id: Uuid) -> WorkflowResult<Appointment> {
        let doctor = self
            .store
            .user(doctor_id)
            .ok_or_else(|| WorkflowError::not_found("user", doctor_id))?;
        if doctor.role != Role::Doctor {
            return Err(WorkflowError::InvalidInput(format!(
                "user {} has role {}, only a DOCTOR can accept an appointment",
                doctor.id, doctor.role
            )));
        }

        let accepted = self
            .store
            .update_appointment(appointment_id, &|snapshot| {
                lifecycle::accept(snapshot, doctor_id)
            })?;

        tracing::info!(
            appointment_id = %accepted.id,
            doctor_id = %doctor_id,
            "appointment accepted for consultation"
        );
        Ok(accepted)
    }

    /// Updates the rough notes of an appointment still under
    /// consultation. Notes are mutable until the consultation is
    /// documented.
    ///
    /// # Errors
    /// - `NotFound` if the appointment does not exist.
    /// - `InvalidTransition` if the appointment is already COMPLETED.
    pub fn record_rough_notes(
        &self,
        appointment_id: Uuid,
        rough_notes: &str,
    ) -> WorkflowResult<Appointment> {
        self.store.update_appointment(appointment_id, &|snapshot| {
            if snapshot.status == AppointmentStatus::Completed {
                return Err(WorkflowError::InvalidTransition {
                    from: snapshot.status,
                    action: "amend notes on",
                });
            }
            let mut updated = snapshot.clone();
            updated.rough_notes = rough_notes.to_string();
            Ok(updated)
        })
    }

    /// The documentation pipeline: turns rough notes into a structured
    /// record and closes the appointment.
    ///
    /// Three strictly sequential provider calls (the summary and the
    /// prescription extraction both depend on the structured note), then
    /// one atomic commit that persists the unsigned record together with
    /// the IN_CONSULT → COMPLETED transition. If any provider call
    /// fails, nothing is persisted and the appointment stays IN_CONSULT.
    ///
    /// # Errors
    /// - `NotFound` if the appointment does not exist.
    /// - `InvalidTransition` if the appointment is not IN_CONSULT
    ///   (a COMPLETED appointment is already documented: at most one
    ///   record ever exists per appointment).
    /// - `Provider` if any generation stage fails.
    pub async fn generate_and_save(
        &self,
        appointment_id: Uuid,
        rough_notes: NonEmptyText,
    ) -> WorkflowResult<MedicalRecord> {
        let appointment = self
            .store
            .appointment(appointment_id)
            .ok_or_else(|| WorkflowError::not_found("appointment", appointment_id))?;
        // Checked again inside the atomic commit; failing early avoids
        // paying for provider calls that cannot be committed.
        if appointment.status != AppointmentStatus::InConsult {
            return Err(WorkflowError::InvalidTransition {
                from: appointment.status,
                action: "document",
            });
        }

        tracing::info!(appointment_id = %appointment_id, "starting documentation pipeline");

        let soap_note = self.provider.draft_clinical_note(rough_notes.as_str()).await?;
        let patient_summary = self.provider.simplify_for_patient(&soap_note).await?;
        let prescription = self.provider.extract_prescription(&soap_note).await?;

        let notes = rough_notes.as_str().to_string();
        let (_, record) = self.store.commit_consultation(appointment_id, &|snapshot| {
            let mut completed = lifecycle::complete(snapshot)?;
            completed.rough_notes = notes.clone();
            let record = MedicalRecord::unsigned(
                snapshot.id,
                soap_note.clone(),
                patient_summary.clone(),
                prescription.clone(),
            );
            Ok((completed, record))
        })?;

        tracing::info!(
            appointment_id = %appointment_id,
            record_id = %record.id,
            has_prescription = record.prescription.is_some(),
            "medical record generated and committed"
        );
        Ok(record)
    }

    /// Signs a medical record, finalising it.
    ///
    /// Signing is idempotent: re-signing an already-signed record
    /// returns it unchanged rather than failing, so the operation is
    /// safe to retry.
    ///
    /// # Errors
    /// - `NotFound` if the record does not exist.
    pub fn sign(&self, record_id: Uuid) -> WorkflowResult<MedicalRecord> {
        let mut record = self
            .store
            .record(record_id)
            .ok_or_else(|| WorkflowError::not_found("medical record", record_id))?;
        if record.signed {
            return Ok(record);
        }
        record.signed = true;
        let record = self.store.save_record(record);
        tracing::info!(record_id = %record.id, "medical record signed");
        Ok(record)
    }

    /// Updates a staff member's free-text status token
    /// (AVAILABLE/BUSY/ON_LEAVE by convention; not validated against a
    /// closed set).
    pub fn update_staff_status(&self, user_id: Uuid, status: &str) -> WorkflowResult<User> {
        let mut user = self
            .store
            .user(user_id)
            .ok_or_else(|| WorkflowError::not_found("user", user_id))?;
        user.status = status.to_string();
        Ok(self.store.save_user(user))
    }

    pub fn user(&self, id: Uuid) -> WorkflowResult<User> {
        self.store
            .user(id)
            .ok_or_else(|| WorkflowError::not_found("user", id))
    }

    pub fn users_with_role(&self, role: Role) -> Vec<User> {
        self.store.users_with_role(role)
    }

    /// Doctors currently marked AVAILABLE, for the nurse dashboard.
    pub fn available_doctors(&self) -> Vec<User> {
        self.store
            .users_with_status("AVAILABLE")
            .into_iter()
            .filter(|u| u.role == Role::Doctor)
            .collect()
    }

    pub fn doctor_appointments(&self, doctor_id: Uuid) -> Vec<Appointment> {
        self.store.appointments_for_doctor(doctor_id)
    }

    pub fn patient_appointments(&self, patient_id: Uuid) -> Vec<Appointment> {
        self.store.appointments_for_patient(patient_id)
    }

    pub fn appointment(&self, id: Uuid) -> WorkflowResult<Appointment> {
        self.store
            .appointment(id)
            .ok_or_else(|| WorkflowError::not_found("appointment", id))
    }

    pub fn record_for_appointment(&self, appointment_id: Uuid) -> Option<MedicalRecord> {
        self.store.record_for_appointment(appointment_id)
    }
}
