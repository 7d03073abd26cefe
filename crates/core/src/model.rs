//! Entity snapshots for the clinic workflow.
//!
//! Entities are plain immutable snapshots; state changes go through the
//! transition functions in [`crate::lifecycle`] and are only durably
//! observed once a snapshot is handed to the store. This keeps two
//! in-flight requests from mutating the same in-memory object.

use chrono::{DateTime, Utc};
use clinic_types::{AppointmentStatus, NonEmptyText, Role, TriagePriority};
use uuid::Uuid;

/// A person known to the clinic: doctor, nurse or patient.
///
/// `status` is a free-text token whose conventional values depend on the
/// role (AVAILABLE/BUSY/ON_LEAVE for staff, WAITING/ACTIVE for patients).
/// It is deliberately not validated against a closed set.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: NonEmptyText,
    pub role: Role,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a user snapshot with a fresh identity.
    pub fn new(name: NonEmptyText, role: Role, status: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            role,
            status: status.into(),
            created_at: Utc::now(),
        }
    }
}

/// A single patient visit moving through triage, consultation and
/// documentation.
///
/// `doctor_id` is `Some` exactly when the status is IN_CONSULT or
/// COMPLETED; [`crate::lifecycle::accept`] is the only writer. The queue
/// must never show a phantom assignment for a WAITING appointment.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Option<Uuid>,
    pub priority: TriagePriority,
    pub status: AppointmentStatus,
    pub rough_notes: String,
    /// Registration time; breaks priority ties in the triage queue.
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    /// Creates a WAITING appointment for a registered patient.
    pub fn waiting(patient_id: Uuid, priority: TriagePriority) -> Self {
        Self {
            id: Uuid::new_v4(),
            patient_id,
            doctor_id: None,
            priority,
            status: AppointmentStatus::Waiting,
            rough_notes: String::new(),
            created_at: Utc::now(),
        }
    }
}

/// The structured outcome of a consultation, produced by the
/// documentation pipeline.
///
/// `prescription: None` is the explicit "no prescription" state, distinct
/// from an empty string. `signed` only ever moves false → true.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MedicalRecord {
    pub id: Uuid,
    /// Back-reference to the owning appointment; at most one record
    /// exists per appointment.
    pub appointment_id: Uuid,
    pub soap_note: String,
    pub patient_summary: String,
    pub prescription: Option<String>,
    pub signed: bool,
}

impl MedicalRecord {
    /// Creates an unsigned record holding the three generated texts.
    pub fn unsigned(
        appointment_id: Uuid,
        soap_note: String,
        patient_summary: String,
        prescription: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            appointment_id,
            soap_note,
            patient_summary,
            prescription,
            signed: false,
        }
    }
}
