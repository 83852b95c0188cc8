//! Wire types: the inbound endpoint contract and the upstream
//! chat-completion request/response.

use serde::{Deserialize, Serialize};

use crate::variation::VariationKind;

/// Body of `POST /manipulate-question`.
///
/// Both fields are optional at the wire level so that a missing question is
/// reported as a validation failure rather than a decode failure. The kind is
/// kept as raw JSON: a non-string value is an unknown kind, not a bad body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManipulateRequest {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default, rename = "manipulationType")]
    pub manipulation_type: Option<serde_json::Value>,
}

impl ManipulateRequest {
    /// Requested kind key, if one was sent as a string.
    pub fn variation_key(&self) -> Option<&str> {
        self.manipulation_type.as_ref().and_then(|value| value.as_str())
    }
}

/// Successful transform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformResult {
    pub original: String,
    pub manipulated: String,
    #[serde(rename = "type")]
    pub kind: VariationKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub healthy: bool,
    pub service_name: String,
    pub uptime_seconds: u64,
    pub status: String,
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Single-turn, non-streaming completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

impl ChatCompletionRequest {
    /// System message carries the kind's template, user message carries the
    /// question verbatim.
    pub fn for_transform(model: &str, kind: VariationKind, question: &str) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![
                ChatMessage::system(kind.system_prompt()),
                ChatMessage::user(question),
            ],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    #[serde(default)]
    pub message: Option<ChatResponseMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub total_tokens: Option<u32>,
}

impl ChatCompletionResponse {
    /// Text of the first choice, if the provider produced any.
    pub fn first_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .filter(|content| !content.is_empty())
    }
}
