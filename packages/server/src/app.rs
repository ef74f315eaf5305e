//! Application setup and router construction.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::http::HeaderValue;
use axum::{
    routing::{get, post},
    Router,
};
use schemagen::ai::OpenAI;
use schemagen::{Generator, HttpFetcher, ValidatedFetcher};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::routes::{generate_handler, health_handler, schemas_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<Generator>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(generator: Arc<Generator>) -> Self {
        Self {
            generator,
            started_at: Instant::now(),
        }
    }
}

/// Build the generator from config: validated HTTP fetcher, plus the
/// OpenAI client when a key is configured.
pub fn build_generator(config: &Config) -> Generator {
    let fetcher = Arc::new(ValidatedFetcher::new(HttpFetcher::new()));
    let mut generator = Generator::new(fetcher);

    if let Some(api_key) = &config.openai_api_key {
        let mut ai = OpenAI::new(api_key.clone());
        if let Some(model) = &config.model {
            ai = ai.with_model(model.clone());
        }
        generator = generator.with_ai(Arc::new(ai));
        tracing::info!("AI extraction enabled");
    } else {
        tracing::info!("OPENAI_API_KEY not set; AI extraction disabled");
    }

    generator
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build the Axum application router
pub fn build_app(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/v1/generate", post(generate_handler))
        .route("/v1/schemas", get(schemas_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .with_state(state)
}
