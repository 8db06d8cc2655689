//! Minutes Server
//!
//! HTTP surface for meeting minutes extraction: `POST /extract` returns the
//! extracted record as JSON, `POST /generate` renders it to a Markdown
//! document and returns the file, `GET /health` reports liveness.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use axum::http::HeaderValue;
use config::ServerConfig;
use handlers::{create_router, AppState};
use minutes_extractor::Extractor;
use minutes_llm::OllamaProvider;
use minutes_render::MarkdownRenderer;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// CORS layer for the configured origins
///
/// An empty list (or `"*"`) allows any origin. Origins that are not valid
/// header values are skipped.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::permissive().allow_origin(AllowOrigin::list(allowed))
}

/// Start the HTTP server
///
/// Builds the Ollama-backed extractor from the configuration and serves
/// until the listener fails.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting minutes server");
    info!("Bind address: {}", config.bind_addr());
    info!(
        "Model: {} at {}",
        config.ollama_model, config.ollama_endpoint
    );
    info!("Output directory: {}", config.output_dir.display());

    let provider = OllamaProvider::new(&config.ollama_endpoint, &config.ollama_model)
        .with_timeout(config.extractor.llm_timeout());

    let state = AppState {
        extractor: Arc::new(Extractor::new(provider, config.extractor.clone())),
        renderer: Arc::new(MarkdownRenderer::new()),
        output_dir: config.output_dir.clone(),
    };

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_origins));

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_layer_variants() {
        // Construction must not panic for any input shape
        let _ = cors_layer(&[]);
        let _ = cors_layer(&["*".to_string()]);
        let _ = cors_layer(&["http://localhost:3000".to_string(), "bad\norigin".to_string()]);
    }
}
