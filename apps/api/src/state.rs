use std::sync::Arc;

use crate::config::Config;
use crate::matching::judgment::JudgmentScorer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable judge. Default: `LlmJudge` over the configured chat-completions endpoint.
    pub judge: Arc<dyn JudgmentScorer>,
}
