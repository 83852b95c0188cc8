// question-transform-rs/src/llm_client.rs
//
// HTTP client for the upstream chat-completion provider (OpenAI-compatible API)
//
// One request, one outcome: the client never retries. Status classification
// into caller-facing errors happens in the service, the client only reports
// what the provider did.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::models::{ChatCompletionRequest, ChatCompletionResponse};

/// What happened on the single upstream call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamOutcome {
    /// Provider answered 2xx. `None` when it carried no usable text.
    Completed(Option<String>),
    /// Provider answered with a non-2xx status.
    HttpFailure { status: u16, body: String },
    /// The provider could not be reached (connect, timeout, broken transfer).
    TransportFailure(String),
}

/// Anything that can run one chat completion.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, api_key: &str, request: &ChatCompletionRequest) -> UpstreamOutcome;
}

#[derive(Debug, Clone)]
pub struct HttpCompletionClient {
    client: Client,
    api_url: String,
}

impl HttpCompletionClient {
    /// Fails only when the TLS backend cannot be initialised.
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_url: api_url.into(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

fn describe_transport_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("Request timed out: {}", err)
    } else if err.is_connect() {
        format!("Connection failed: {}", err)
    } else {
        format!("Network error: {}", err)
    }
}

#[async_trait]
impl CompletionProvider for HttpCompletionClient {
    async fn complete(&self, api_key: &str, request: &ChatCompletionRequest) -> UpstreamOutcome {
        log::debug!(
            "Sending completion request to {} (model: {}, messages: {})",
            self.api_url,
            request.model,
            request.messages.len()
        );

        let response = match self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(err) => return UpstreamOutcome::TransportFailure(describe_transport_error(&err)),
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return UpstreamOutcome::HttpFailure {
                status: status.as_u16(),
                body,
            };
        }

        // Read the body first so a broken transfer is told apart from a body
        // that arrived but is not a completion.
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(err) => return UpstreamOutcome::TransportFailure(describe_transport_error(&err)),
        };

        match serde_json::from_slice::<ChatCompletionResponse>(&bytes) {
            Ok(data) => {
                if let Some(total) = data.usage.as_ref().and_then(|u| u.total_tokens) {
                    log::info!("LLM request completed. Used {} tokens", total);
                }
                UpstreamOutcome::Completed(data.first_content())
            }
            Err(err) => {
                log::warn!("Failed to parse completion response: {}", err);
                UpstreamOutcome::Completed(None)
            }
        }
    }
}
