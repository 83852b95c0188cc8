//! The transform operation: validate, pick a template, call the provider
//! once, and classify the outcome.

use std::sync::Arc;

use crate::config::{TransformConfig, API_KEY_VAR};
use crate::error::{Result, TransformError};
use crate::llm_client::{CompletionProvider, HttpCompletionClient, UpstreamOutcome};
use crate::models::{ChatCompletionRequest, TransformResult};
use crate::variation::VariationKind;

pub struct QuestionTransformService {
    config: TransformConfig,
    provider: Arc<dyn CompletionProvider>,
}

impl QuestionTransformService {
    /// Build the service with the reqwest-backed provider described by `config`.
    pub fn new(config: TransformConfig) -> reqwest::Result<Self> {
        let provider = Arc::new(HttpCompletionClient::new(
            config.api_url.clone(),
            config.timeout,
        )?);
        Ok(Self::with_provider(config, provider))
    }

    pub fn with_provider(config: TransformConfig, provider: Arc<dyn CompletionProvider>) -> Self {
        if !config.is_configured() {
            log::warn!(
                "{} is not set; every transform request will fail until it is configured",
                API_KEY_VAR
            );
        }
        Self { config, provider }
    }

    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    /// Turn `question` into a variation of the requested kind.
    ///
    /// `variation` is resolved leniently: absent or unknown keys use
    /// [`VariationKind::Rephrase`]. Validation and configuration failures are
    /// reported before any network traffic.
    pub async fn transform(
        &self,
        question: Option<&str>,
        variation: Option<&str>,
    ) -> Result<TransformResult> {
        // Whitespace-only input is rejected too, which is stricter than a
        // plain emptiness check. Accepted questions are forwarded untrimmed.
        let question = match question {
            Some(q) if !q.trim().is_empty() => q,
            _ => return Err(TransformError::validation("Question is required")),
        };

        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| TransformError::configuration(API_KEY_VAR))?;

        let kind = VariationKind::resolve(variation);
        log::info!(
            "Processing question manipulation: kind={}, question_length={}",
            kind,
            question.chars().count()
        );

        let request = ChatCompletionRequest::for_transform(&self.config.model, kind, question);
        let outcome = self.provider.complete(api_key, &request).await;
        let manipulated = classify_outcome(outcome)?;

        log::info!("Successfully manipulated question (kind={})", kind);
        Ok(TransformResult {
            original: question.to_string(),
            manipulated,
            kind,
        })
    }
}

/// Map the provider's outcome onto the caller-facing taxonomy.
pub fn classify_outcome(outcome: UpstreamOutcome) -> Result<String> {
    match outcome {
        UpstreamOutcome::Completed(Some(text)) => Ok(text),
        UpstreamOutcome::Completed(None) => {
            log::error!("AI gateway returned success without completion content");
            Err(TransformError::UpstreamEmptyResponse)
        }
        UpstreamOutcome::HttpFailure { status: 429, .. } => {
            log::warn!("AI gateway rate limit hit (429)");
            Err(TransformError::RateLimit)
        }
        UpstreamOutcome::HttpFailure { status: 402, .. } => {
            log::warn!("AI gateway usage limit reached (402)");
            Err(TransformError::QuotaExceeded)
        }
        UpstreamOutcome::HttpFailure { status, body } => {
            log::error!("AI gateway error: {} {}", status, body);
            Err(TransformError::Upstream { status, body })
        }
        UpstreamOutcome::TransportFailure(reason) => {
            log::error!("AI gateway unreachable: {}", reason);
            Err(TransformError::UpstreamUnreachable(reason))
        }
    }
}
