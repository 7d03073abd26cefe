//! Persistence seam for the three record kinds.
//!
//! The store serialises each individual save; the two closure-taking
//! operations are the only places cross-entity atomicity is required, and
//! implementations must run their closure under a single critical
//! section over the stored state.

use clinic_types::{AppointmentStatus, Role};
use uuid::Uuid;

use crate::error::WorkflowResult;
use crate::model::{Appointment, MedicalRecord, User};

/// Key-addressed persistence for users, appointments and medical
/// records. Saves are upserts.
pub trait ClinicStore: Send + Sync {
    fn user(&self, id: Uuid) -> Option<User>;
    fn users_with_role(&self, role: Role) -> Vec<User>;
    fn users_with_status(&self, status: &str) -> Vec<User>;
    fn save_user(&self, user: User) -> User;

    fn appointment(&self, id: Uuid) -> Option<Appointment>;
    /// Appointments in the given status, ordered by registration time.
    fn appointments_with_status(&self, status: AppointmentStatus) -> Vec<Appointment>;
    fn appointments_for_doctor(&self, doctor_id: Uuid) -> Vec<Appointment>;
    fn appointments_for_patient(&self, patient_id: Uuid) -> Vec<Appointment>;
    fn save_appointment(&self, appointment: Appointment) -> Appointment;

    /// Atomic read-modify-write of one appointment.
    ///
    /// The closure sees the currently stored snapshot and returns the
    /// replacement (or a domain failure, in which case nothing is
    /// written). Running the precondition check and the save inside one
    /// critical section makes WAITING → IN_CONSULT a compare-and-set:
    /// of two concurrent accepts, at most one succeeds.
    fn update_appointment(
        &self,
        id: Uuid,
        apply: &dyn Fn(&Appointment) -> WorkflowResult<Appointment>,
    ) -> WorkflowResult<Appointment>;

    fn record(&self, id: Uuid) -> Option<MedicalRecord>;
    fn record_for_appointment(&self, appointment_id: Uuid) -> Option<MedicalRecord>;
    fn save_record(&self, record: MedicalRecord) -> MedicalRecord;

    /// Atomic commit of a completed consultation: the updated
    /// appointment and its new medical record are persisted as one unit,
    /// or not at all.
    ///
    /// The closure re-reads the appointment under the store's critical
    /// section, so a concurrent completion of the same appointment fails
    /// its precondition instead of writing a duplicate record.
    fn commit_consultation(
        &self,
        appointment_id: Uuid,
        apply: &dyn Fn(&Appointment) -> WorkflowResult<(Appointment, MedicalRecord)>,
    ) -> WorkflowResult<(Appointment, MedicalRecord)>;
}
