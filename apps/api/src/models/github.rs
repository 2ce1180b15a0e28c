use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use crate::github::GithubAnalysis;

/// Cached GitHub analysis, keyed uniquely by username. Only successful
/// analyses are persisted; lookup errors are never cached.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GithubAnalysisRow {
    pub username: String,
    pub analysis: Json<GithubAnalysis>,
    pub github_score: f64,
    pub analyzed_at: DateTime<Utc>,
}
