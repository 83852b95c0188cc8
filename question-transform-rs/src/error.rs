//! Error taxonomy for the transform operation and its HTTP rendering.
//!
//! Every failure is converted to a `{ "error": message }` body whose HTTP
//! status tells the caller which kind of guidance to show.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::models::ErrorResponse;

pub type Result<T, E = TransformError> = std::result::Result<T, E>;

pub const RATE_LIMIT_MESSAGE: &str = "Rate limit exceeded. Please try again in a moment.";
pub const QUOTA_EXCEEDED_MESSAGE: &str = "AI usage limit reached. Please add credits to continue.";

#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    /// Bad or missing input; never reaches the upstream provider
    #[error("{0}")]
    Validation(String),

    /// Deployment misconfiguration, named by the missing setting
    #[error("{0} is not configured")]
    Configuration(String),

    /// Upstream answered 429
    #[error("Rate limit exceeded. Please try again in a moment.")]
    RateLimit,

    /// Upstream answered 402
    #[error("AI usage limit reached. Please add credits to continue.")]
    QuotaExceeded,

    /// Any other non-2xx from upstream. The body is kept for logging only.
    #[error("AI gateway error: {status}")]
    Upstream { status: u16, body: String },

    /// Upstream answered 2xx without usable completion text
    #[error("No response from AI")]
    UpstreamEmptyResponse,

    /// Connection, timeout or other transport failure
    #[error("AI gateway unreachable: {0}")]
    UpstreamUnreachable(String),
}

impl TransformError {
    pub fn validation(message: impl Into<String>) -> Self {
        TransformError::Validation(message.into())
    }

    pub fn configuration(setting: impl Into<String>) -> Self {
        TransformError::Configuration(setting.into())
    }

    /// HTTP status the caller sees for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::RateLimit => StatusCode::TOO_MANY_REQUESTS,
            Self::QuotaExceeded => StatusCode::PAYMENT_REQUIRED,
            Self::Configuration(_)
            | Self::Upstream { .. }
            | Self::UpstreamEmptyResponse
            | Self::UpstreamUnreachable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable label used in log lines
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::Configuration(_) => "configuration_error",
            Self::RateLimit => "rate_limit_error",
            Self::QuotaExceeded => "quota_exceeded_error",
            Self::Upstream { .. } => "upstream_error",
            Self::UpstreamEmptyResponse => "upstream_empty_response_error",
            Self::UpstreamUnreachable(_) => "upstream_unreachable_error",
        }
    }

    /// Convert to HTTP status code and error response
    pub fn to_response(&self) -> (StatusCode, Json<ErrorResponse>) {
        (
            self.status_code(),
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
    }
}

impl IntoResponse for TransformError {
    fn into_response(self) -> Response {
        self.to_response().into_response()
    }
}
