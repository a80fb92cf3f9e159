//! Travel Concierge server binary.
//!
//! Loads configuration from the environment, wires adapters to the
//! application handlers, and serves the chat API.

use std::sync::Arc;
use std::time::Duration;

use http::{HeaderValue, Method};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use travel_concierge::adapters::http::chat::{routes, ChatAppState};
use travel_concierge::adapters::{
    FileSessionStore, InMemorySessionStore, OpenAIConfig, OpenAIProvider,
};
use travel_concierge::application::RetryPolicy;
use travel_concierge::config::{AppConfig, StorageBackend};
use travel_concierge::ports::{AIProvider, SessionStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone())),
        )
        .init();

    config.validate()?;

    let api_key = config
        .ai
        .openai_api_key
        .clone()
        .ok_or_else(|| "OPENAI_API_KEY is not configured".to_string())?;

    let mut provider_config = OpenAIConfig::new(api_key)
        .with_model(config.ai.model.clone())
        .with_timeout(config.ai.timeout());
    if let Some(base_url) = config.ai.base_url.clone() {
        provider_config = provider_config.with_base_url(base_url);
    }
    let provider: Arc<dyn AIProvider> = Arc::new(OpenAIProvider::new(provider_config));

    let store: Arc<dyn SessionStore> = match config.storage.backend {
        StorageBackend::File => Arc::new(FileSessionStore::new(&config.storage.data_dir)),
        StorageBackend::Memory => Arc::new(InMemorySessionStore::new()),
    };
    tracing::info!(backend = ?config.storage.backend, "session store initialized");

    let retry_policy = RetryPolicy {
        max_attempts: config.ai.retry_max_attempts,
        fallback_delay: config.ai.retry_fallback_delay(),
        ..RetryPolicy::default()
    };
    let state = ChatAppState::with_retry_policy(store, provider, retry_policy);

    let app = routes().with_state(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(&config.server.cors_origins_list()))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.server.request_timeout_secs,
            ))),
    );

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "travel concierge listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
}
