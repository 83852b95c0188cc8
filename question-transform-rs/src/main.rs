// question-transform-rs/src/main.rs
// Main entry point for the question transformation service
// HTTP server exposing POST /manipulate-question

use std::sync::Arc;

use question_transform::config::{DEFAULT_PORT, SERVICE_NAME};
use question_transform::{create_router, AppState, QuestionTransformService, TransformConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    config_rs::load_dotenv();

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = TransformConfig::from_env();
    log::info!("Loaded configuration: {:?}", config);

    let service = QuestionTransformService::new(config)?;
    let state = Arc::new(AppState::new(service));
    let app = create_router(state);

    let addr = config_rs::get_bind_address(SERVICE_NAME, DEFAULT_PORT);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    log::info!(
        "{} starting on {}",
        config_rs::get_formatted_service_name(SERVICE_NAME),
        addr
    );
    println!("Question transformation service listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
