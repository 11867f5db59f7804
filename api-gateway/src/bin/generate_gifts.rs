//! Generate Gifts Lambda - Handles POST /generate-gifts.
//!
//! Turns gift preferences into a prompt, asks the generative-language backend
//! for ideas, and relays the validated `{"gifts": [...]}` payload.

use lambda_http::{run, service_fn, Error};
use shared::{Config, GiftService};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = Config::from_env();
    if config.api_key.is_none() {
        warn!("GEMINI_API_KEY is not set; requests will fail until it is configured");
    }
    info!(model = %config.model, validation = ?config.validation, "Starting generate_gifts");

    let service = Arc::new(GiftService::new(config));

    run(service_fn(move |event| {
        let service = Arc::clone(&service);
        async move { service.handle(event).await }
    }))
    .await
}
