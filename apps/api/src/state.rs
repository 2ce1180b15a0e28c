use std::sync::Arc;

use sqlx::PgPool;

use crate::github::GithubClient;
use crate::parsing::ResumeParser;
use crate::scoring::relevance::RelevanceScorer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Compiled extractors, built once at startup.
    pub parser: Arc<ResumeParser>,
    pub github: GithubClient,
    /// Pluggable relevance scorer: LLM-backed when a credential is
    /// configured, rule-based otherwise. Fixed for the process lifetime.
    pub scorer: Arc<dyn RelevanceScorer>,
}
