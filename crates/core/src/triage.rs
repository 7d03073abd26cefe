//! Triage queue ordering.
//!
//! Pure functions over in-memory appointment snapshots; callers supply
//! the current WAITING set, this module never touches the store.

use crate::model::Appointment;

/// Orders WAITING appointments for consultation: HIGH before MEDIUM
/// before LOW.
///
/// The sort is stable, so appointments of equal priority keep their
/// relative order from the input sequence, which reflects registration
/// order.
pub fn ranked_waiting(mut waiting: Vec<Appointment>) -> Vec<Appointment> {
    waiting.sort_by_key(|apt| apt.priority.rank());
    waiting
}

/// Returns the appointment to be seen next, or `None` when nobody is
/// waiting.
pub fn next_waiting(waiting: Vec<Appointment>) -> Option<Appointment> {
    ranked_waiting(waiting).into_iter().next()
}
