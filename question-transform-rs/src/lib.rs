//! Question transformation service.
//!
//! Accepts a chemistry question and a variation kind, asks an upstream
//! chat-completion provider for a transformed question, and answers with the
//! result or a structured `{ "error": ... }` payload. Every response carries
//! permissive CORS headers so a browser-hosted caller can read it.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    http::header::{HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use once_cell::sync::Lazy;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

pub mod config;
pub mod error;
pub mod llm_client;
pub mod models;
pub mod service;
pub mod variation;


pub use config::TransformConfig;
pub use error::TransformError;
pub use llm_client::{CompletionProvider, HttpCompletionClient, UpstreamOutcome};
pub use models::{ChatCompletionRequest, ChatMessage, ErrorResponse, ManipulateRequest, TransformResult};
pub use service::QuestionTransformService;
pub use variation::VariationKind;

/// Path of the transform endpoint
pub const MANIPULATE_PATH: &str = "/manipulate-question";

/// Maximum accepted request body (64 KiB)
pub const MAX_PAYLOAD_SIZE: usize = 64 * 1024;

/// Request headers a browser caller may send
pub const ALLOWED_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

static START_TIME: Lazy<Instant> = Lazy::new(Instant::now);

/// Shared application state
pub struct AppState {
    pub service: QuestionTransformService,
}

impl AppState {
    pub fn new(service: QuestionTransformService) -> Self {
        // Start the uptime clock when the first state is built.
        Lazy::force(&START_TIME);
        Self { service }
    }
}

/// CORS policy applied to every route, including preflight answers.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([
            AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            CONTENT_TYPE,
        ])
}

/// Create the Axum router with all routes and middleware
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route(
            MANIPULATE_PATH,
            post(manipulate_question_handler).fallback(method_not_allowed_handler),
        )
        .fallback(not_found_handler)
        .layer(DefaultBodyLimit::max(MAX_PAYLOAD_SIZE))
        .layer(cors_layer())
        // The CORS layer only lists allowed headers on preflight answers;
        // regular responses get the same list here.
        .layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static("access-control-allow-headers"),
            HeaderValue::from_static(ALLOWED_HEADERS),
        ))
        .with_state(state)
}

/// POST /manipulate-question
async fn manipulate_question_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ManipulateRequest>, JsonRejection>,
) -> Response {
    let request_id = uuid::Uuid::new_v4();

    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            log::warn!("[{}] Rejected request body: {}", request_id, rejection.body_text());
            return TransformError::validation(format!(
                "Invalid request body: {}",
                rejection.body_text()
            ))
            .into_response();
        }
    };

    log::info!(
        "[{}] Manipulate request: type={:?}",
        request_id,
        request.manipulation_type
    );

    match state
        .service
        .transform(
            request.question.as_deref(),
            request.variation_key(),
        )
        .await
    {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(err) => {
            log::warn!("[{}] Manipulation failed ({}): {}", request_id, err.kind(), err);
            err.into_response()
        }
    }
}

/// GET /health
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let configured = state.service.is_configured();
    let status = if configured { "SERVING" } else { "DEGRADED" };

    Json(models::HealthResponse {
        healthy: configured,
        service_name: config_rs::get_formatted_service_name(config::SERVICE_NAME),
        uptime_seconds: START_TIME.elapsed().as_secs(),
        status: status.to_string(),
        model: state.service.config().model.clone(),
    })
}

/// GET /
async fn root_handler() -> impl IntoResponse {
    let variations: Vec<serde_json::Value> = VariationKind::ALL
        .iter()
        .map(|kind| {
            serde_json::json!({
                "type": kind.as_str(),
                "description": kind.description(),
            })
        })
        .collect();

    Json(serde_json::json!({
        "service": "Question Transformation Service",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "GET /health",
            format!("POST {}", MANIPULATE_PATH),
        ],
        "variations": variations,
    }))
}

async fn method_not_allowed_handler() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse {
            error: "Method not allowed".to_string(),
        }),
    )
}

async fn not_found_handler() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Not found".to_string(),
        }),
    )
}
