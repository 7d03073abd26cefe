//! Ollama-backed completion provider.
//!
//! Implements `clinic_core::CompletionProvider` against a local Ollama
//! instance's `/api/generate` endpoint. Transport and decoding failures
//! surface as typed `ProviderError`s; a failed call is never passed off
//! as generated content.

pub mod prompts;

use async_trait::async_trait;
use clinic_core::{CompletionProvider, CoreConfig, ProviderError};

#[derive(serde::Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(serde::Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: Option<String>,
}

/// HTTP client for an Ollama text-generation endpoint.
#[derive(Clone)]
pub struct OllamaClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(cfg: &CoreConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: cfg.ollama_base_url().to_string(),
            model: cfg.ollama_model().to_string(),
        }
    }

    /// Sends one prompt and returns the generated text.
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "calling ollama");

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(Box::new(e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::MalformedReply(format!(
                "ollama returned HTTP {status}"
            )));
        }

        let reply: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Transport(Box::new(e)))?;

        match reply.response {
            Some(text) if !text.trim().is_empty() => Ok(text),
            Some(_) => Err(ProviderError::MalformedReply(
                "ollama returned an empty completion".into(),
            )),
            None => Err(ProviderError::MalformedReply(
                "ollama reply is missing the response field".into(),
            )),
        }
    }
}

/// Maps the prescription-stage reply onto the domain's optional
/// prescription: the sentinel (or a blank reply) means none.
fn parse_prescription_reply(reply: &str) -> Option<String> {
    let trimmed = reply.trim();
    if trimmed.is_empty() {
        return None;
    }
    let sentinel = prompts::NO_PRESCRIPTION_SENTINEL;
    // Models tend to echo the sentinel with punctuation or casing
    // variations attached.
    if trimmed.len() <= sentinel.len() + 8
        && trimmed.to_ascii_lowercase().contains(&sentinel.to_ascii_lowercase())
    {
        return None;
    }
    Some(trimmed.to_string())
}

#[async_trait]
impl CompletionProvider for OllamaClient {
    async fn draft_clinical_note(&self, rough_notes: &str) -> Result<String, ProviderError> {
        self.generate(&prompts::soap_note(rough_notes)).await
    }

    async fn simplify_for_patient(&self, structured_note: &str) -> Result<String, ProviderError> {
        self.generate(&prompts::patient_summary(structured_note)).await
    }

    async fn extract_prescription(
        &self,
        structured_note: &str,
    ) -> Result<Option<String>, ProviderError> {
        let reply = self.generate(&prompts::prescription(structured_note)).await?;
        Ok(parse_prescription_reply(&reply))
    }
}
