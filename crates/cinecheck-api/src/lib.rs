//! Cinecheck API: REST endpoints
//!
//! - `POST /verify`   `{ "sentence" }` → report
//! - `POST /generate` `{ "prompt" }` → `{ "text" }`
//! - `GET /health`, `GET /metrics`
pub mod config;
pub mod generation;
pub mod handlers;
pub mod metrics;
pub mod middleware;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use cinecheck_core::VerificationOrchestrator;
use cinecheck_in::HeuristicExtractor;
use cinecheck_lookup::{CatalogLookup, FallbackLookup, OmdbLookup, TmdbLookup, WikidataLookup};
use cinecheck_verify::EvidenceVerifier;
use config::ApiConfig;
use generation::{GeminiGenerator, TextGenerator};
use metrics::Metrics;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<VerificationOrchestrator>,
    pub generator: Option<Arc<dyn TextGenerator>>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(orchestrator: VerificationOrchestrator) -> Result<Self, prometheus::Error> {
        Ok(Self {
            orchestrator: Arc::new(orchestrator),
            generator: None,
            metrics: Arc::new(Metrics::new()?),
        })
    }

    pub fn with_generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Wire extractor, knowledge sources, verifier and generator from config.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        // live sources first, the bundled catalog last
        let mut sources = FallbackLookup::new(Vec::new());
        if let Some(tmdb) = &config.tmdb {
            sources.push(Arc::new(TmdbLookup::new(tmdb.clone())?));
            info!(base_url = %tmdb.base_url, "TMDb lookups enabled");
        }
        if let Some(omdb) = &config.omdb {
            sources.push(Arc::new(OmdbLookup::new(omdb.clone())?));
            info!(base_url = %omdb.base_url, "OMDb lookups enabled");
        }
        if let Some(wikidata) = &config.wikidata {
            sources.push(Arc::new(WikidataLookup::new(wikidata.clone())?));
            info!(endpoint = %wikidata.endpoint, "Wikidata award lookups enabled");
        }
        if config.catalog_path.exists() {
            let catalog = CatalogLookup::load(&config.catalog_path)
                .with_context(|| format!("Failed to load catalog {}", config.catalog_path.display()))?;
            sources.push(Arc::new(catalog));
        } else {
            warn!(path = %config.catalog_path.display(), "catalog not found, skipping");
        }
        if sources.is_empty() {
            warn!("no knowledge sources configured; every claim will be unverifiable");
        }

        let orchestrator = VerificationOrchestrator::new(
            Arc::new(HeuristicExtractor::new()),
            Arc::new(sources),
            Arc::new(EvidenceVerifier::new(config.verification.matching.clone())),
            config.verification.clone(),
        );
        let mut state = Self::new(orchestrator)?;
        if let Some(gemini) = &config.gemini {
            let generator = GeminiGenerator::new(gemini.clone())?;
            info!(model = generator.model(), "text generation enabled");
            state = state.with_generator(Arc::new(generator));
        }
        Ok(state)
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/verify", post(handlers::verify))
        .route("/generate", post(handlers::generate))
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .layer(middleware::cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: ApiConfig) -> Result<()> {
    let app = create_app(AppState::from_config(&config)?);
    let listener = tokio::net::TcpListener::bind(&config.addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.addr))?;

    info!("Cinecheck API listening on {}", config.addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
