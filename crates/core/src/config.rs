//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into
//! services. Request handlers never read process-wide environment
//! variables, which keeps behaviour consistent across multi-threaded
//! runtimes and test harnesses.

use crate::error::{WorkflowError, WorkflowResult};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    ollama_base_url: String,
    ollama_model: String,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    pub fn new(ollama_base_url: String, ollama_model: String) -> WorkflowResult<Self> {
        if ollama_base_url.trim().is_empty() {
            return Err(WorkflowError::InvalidInput(
                "ollama_base_url cannot be empty".into(),
            ));
        }
        if ollama_model.trim().is_empty() {
            return Err(WorkflowError::InvalidInput(
                "ollama_model cannot be empty".into(),
            ));
        }

        Ok(Self {
            ollama_base_url: ollama_base_url.trim_end_matches('/').to_string(),
            ollama_model,
        })
    }

    pub fn ollama_base_url(&self) -> &str {
        &self.ollama_base_url
    }

    pub fn ollama_model(&self) -> &str {
        &self.ollama_model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_trims_trailing_slash() {
        let cfg = CoreConfig::new("http://localhost:11434/".into(), "llama2".into())
            .expect("config should build");
        assert_eq!(cfg.ollama_base_url(), "http://localhost:11434");
    }

    #[test]
    fn test_config_rejects_blank_fields() {
        assert!(CoreConfig::new("  ".into(), "llama2".into()).is_err());
        assert!(CoreConfig::new("http://localhost:11434".into(), "".into()).is_err());
    }
}
