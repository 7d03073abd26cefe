//! Appointment state machine.
//!
//! The only legal path is WAITING → IN_CONSULT → COMPLETED. Transitions
//! take an immutable snapshot and return a new one; persistence is the
//! caller's concern (the workflow service commits snapshots through the
//! store, re-checking the precondition under the store's lock).

use clinic_types::AppointmentStatus;
use uuid::Uuid;

use crate::error::{WorkflowError, WorkflowResult};
use crate::model::Appointment;

/// The events that can advance an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A doctor takes the case.
    Accept,
    /// The documentation pipeline commits a record.
    Complete,
}

impl Event {
    fn action(&self) -> &'static str {
        match self {
            Event::Accept => "accept",
            Event::Complete => "complete",
        }
    }
}

/// The transition table: maps (current status, event) to the next status,
/// or an `InvalidTransition` failure. There is no cancellation or
/// reopening path.
pub fn next_status(current: AppointmentStatus, event: Event) -> WorkflowResult<AppointmentStatus> {
    match (current, event) {
        (AppointmentStatus::Waiting, Event::Accept) => Ok(AppointmentStatus::InConsult),
        (AppointmentStatus::InConsult, Event::Complete) => Ok(AppointmentStatus::Completed),
        (from, event) => Err(WorkflowError::InvalidTransition {
            from,
            action: event.action(),
        }),
    }
}

/// WAITING → IN_CONSULT: assigns the accepting doctor.
///
/// This is the single place a doctor reference is attached, so a WAITING
/// appointment can never show a phantom assignment.
pub fn accept(appointment: &Appointment, doctor_id: Uuid) -> WorkflowResult<Appointment> {
    let status = next_status(appointment.status, Event::Accept)?;
    let mut accepted = appointment.clone();
    accepted.doctor_id = Some(doctor_id);
    accepted.status = status;
    Ok(accepted)
}

/// IN_CONSULT → COMPLETED.
///
/// Invoked exclusively by the documentation pipeline as the final step of
/// its atomic commit; completion must never happen without a persisted
/// record.
pub fn complete(appointment: &Appointment) -> WorkflowResult<Appointment> {
    let status = next_status(appointment.status, Event::Complete)?;
    let mut completed = appointment.clone();
    completed.status = status;
    Ok(completed)
}
