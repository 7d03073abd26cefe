//! Completion provider seam.
//!
//! The generative-text service is consumed as an opaque text-in/text-out
//! collaborator. A provider failure is always a typed error; it must
//! never be smuggled back as if it were generated content.

use async_trait::async_trait;

/// Errors from the external completion provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The provider could not be reached or the request failed in
    /// transit.
    #[error("completion provider unreachable: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// The provider answered, but the reply could not be used.
    #[error("completion provider returned an unusable reply: {0}")]
    MalformedReply(String),
}

/// The three semantic operations the documentation pipeline needs.
///
/// Implementations own prompt construction and transport; the core only
/// sees text in and text out. Calls are strictly sequential in the
/// pipeline because the later stages depend on the structured note.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Converts rough consultation notes into a structured SOAP note
    /// (subjective/objective/assessment/plan).
    async fn draft_clinical_note(&self, rough_notes: &str) -> Result<String, ProviderError>;

    /// Rewrites a structured note as a plain-language summary a patient
    /// can read, free of clinical jargon.
    async fn simplify_for_patient(&self, structured_note: &str) -> Result<String, ProviderError>;

    /// Extracts the prescription list from a structured note; `None`
    /// when the note prescribes nothing.
    async fn extract_prescription(
        &self,
        structured_note: &str,
    ) -> Result<Option<String>, ProviderError>;
}
