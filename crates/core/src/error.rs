use clinic_types::AppointmentStatus;
use uuid::Uuid;

use crate::provider::ProviderError;

/// Errors produced by the clinic workflow core.
///
/// All variants are recoverable by the caller; the presentation layer is
/// responsible for turning them into a retry affordance. The core never
/// retries on its own.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: Uuid },
    #[error("cannot {action} an appointment in status {from}")]
    InvalidTransition {
        from: AppointmentStatus,
        action: &'static str,
    },
    #[error("completion provider failed: {0}")]
    Provider(#[from] ProviderError),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl WorkflowError {
    pub(crate) fn not_found(kind: &'static str, id: Uuid) -> Self {
        WorkflowError::NotFound { kind, id }
    }
}

impl From<clinic_types::ParseEnumError> for WorkflowError {
    fn from(err: clinic_types::ParseEnumError) -> Self {
        WorkflowError::InvalidInput(err.to_string())
    }
}

impl From<clinic_types::TextError> for WorkflowError {
    fn from(err: clinic_types::TextError) -> Self {
        WorkflowError::InvalidInput(err.to_string())
    }
}

pub type WorkflowResult<T> = std::result::Result<T, WorkflowError>;
