use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Per-dimension scores, each bounded to [0, 100]. `link_verification` is
/// populated only when a GitHub score was blended into the overall score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreBreakdown {
    pub skills_match: f64,
    pub experience_relevance: f64,
    pub project_quality: f64,
    pub cultural_fit: f64,
    pub link_verification: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Feedback {
    pub strengths: String,
    pub weaknesses: String,
    pub overall: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AtsScoreRow {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub job_id: Uuid,
    pub overall_score: f64,
    pub breakdown: Json<ScoreBreakdown>,
    pub feedback: Json<Feedback>,
    pub suggestions: Vec<String>,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub tokens_used: i64,
    pub estimated_cost: f64,
    pub created_at: DateTime<Utc>,
}
