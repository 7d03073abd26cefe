//! # Clinic Core
//!
//! Core business logic for the clinic intake-to-documentation workflow:
//! - Triage queue ordering (HIGH before MEDIUM before LOW, stable)
//! - Appointment lifecycle (WAITING → IN_CONSULT → COMPLETED)
//! - The documentation pipeline orchestrating the completion provider
//!   and committing its results atomically
//!
//! **No API concerns**: HTTP servers, routing and rendering belong in
//! `api-rest`; the provider transport lives in `clinic-ollama`.

pub mod config;
pub mod error;
pub mod lifecycle;
pub mod memory;
pub mod model;
pub mod provider;
pub mod seed;
pub mod store;
pub mod triage;
pub mod workflow;

pub use clinic_types::{
    AppointmentStatus, NonEmptyText, ParseEnumError, Role, TextError, TriagePriority,
};
pub use config::CoreConfig;
pub use error::{WorkflowError, WorkflowResult};
pub use memory::MemoryStore;
pub use model::{Appointment, MedicalRecord, User};
pub use provider::{CompletionProvider, ProviderError};
pub use store::ClinicStore;
pub use workflow::ClinicService;
