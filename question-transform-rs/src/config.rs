//! Service configuration, resolved once at startup and injected into
//! [`QuestionTransformService`](crate::service::QuestionTransformService).
//!
//! Environment:
//! - LLM_API_KEY: bearer credential for the completion provider (required)
//! - LLM_API_URL: chat-completions endpoint
//! - LLM_MODEL: model identifier sent with every request
//! - LLM_TIMEOUT_SECS: transport timeout for the upstream call

use std::time::Duration;

pub const SERVICE_NAME: &str = "QUESTION_TRANSFORM";
pub const DEFAULT_PORT: u16 = 8000;

pub const API_KEY_VAR: &str = "LLM_API_KEY";
pub const DEFAULT_API_URL: &str = "https://ai.gateway.lovable.dev/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "google/gemini-2.5-flash";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Clone)]
pub struct TransformConfig {
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl TransformConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: config_rs::get_secret(API_KEY_VAR),
            api_url: config_rs::get_env_string("LLM_API_URL", DEFAULT_API_URL),
            model: config_rs::get_env_string("LLM_MODEL", DEFAULT_MODEL),
            timeout: Duration::from_secs(config_rs::get_env_var(
                "LLM_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )),
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

// Keeps the credential out of logs.
impl std::fmt::Debug for TransformConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}
