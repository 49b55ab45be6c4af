mod config;
mod errors;
mod feedback;
mod models;
mod parsing;
mod profiles;
mod routes;
mod scoring;
mod state;
mod vocabulary;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::parsing::{EntityExtractor, HttpEntityRecognizer, NamedEntityRecognizer, NoopRecognizer};
use crate::profiles::JobProfileStore;
use crate::routes::build_router;
use crate::scoring::grammar::LanguageToolClient;
use crate::scoring::ScoringEngine;
use crate::state::AppState;
use crate::vocabulary::Vocabulary;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume scorer v{}", env!("CARGO_PKG_VERSION"));

    // Job profiles are mandatory; nothing can be scored without them
    let profiles = JobProfileStore::load(&config.job_profiles_path).with_context(|| {
        format!(
            "Failed to load job profiles from {}",
            config.job_profiles_path.display()
        )
    })?;
    info!(
        "Loaded {} job profiles from {}",
        profiles.len(),
        config.job_profiles_path.display()
    );

    let vocabulary = match &config.skills_vocabulary_path {
        Some(path) => {
            let vocabulary = Vocabulary::load(path)
                .with_context(|| format!("Failed to load vocabulary from {}", path.display()))?;
            info!("Vocabulary loaded from {}", path.display());
            vocabulary
        }
        None => Vocabulary::default(),
    };
    let vocabulary = Arc::new(vocabulary);

    let timeout = Duration::from_secs(config.grammar_timeout_secs);

    let recognizer: Arc<dyn NamedEntityRecognizer> = match &config.ner_api_url {
        Some(url) => {
            info!("Entity recognition via {url}");
            Arc::new(HttpEntityRecognizer::new(url.clone(), timeout)?)
        }
        None => {
            info!("NER_API_URL not set; using name heuristic only");
            Arc::new(NoopRecognizer)
        }
    };

    let grammar = Arc::new(LanguageToolClient::new(config.grammar_api_url.clone(), timeout)?);
    info!(
        "Grammar checker: {} ({}, timeout {}s)",
        config.grammar_api_url, config.grammar_language, config.grammar_timeout_secs
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        profiles: Arc::new(profiles),
        extractor: EntityExtractor::new(vocabulary.clone(), recognizer),
        engine: ScoringEngine::new(
            vocabulary,
            grammar,
            config.grammar_language.clone(),
            timeout,
        ),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
