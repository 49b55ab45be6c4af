use std::sync::Arc;

use crate::config::Config;
use crate::parsing::EntityExtractor;
use crate::profiles::JobProfileStore;
use crate::scoring::ScoringEngine;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub profiles: Arc<JobProfileStore>,
    /// Carries the vocabulary and the pluggable `NamedEntityRecognizer`.
    pub extractor: EntityExtractor,
    /// Carries the pluggable `GrammarChecker`.
    pub engine: ScoringEngine,
}
