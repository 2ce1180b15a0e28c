use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub recruiter_id: Uuid,
    pub title: String,
    pub company: String,
    pub description: String,
    pub required_skills: Vec<String>,
    pub location: Option<String>,
    pub experience_years: Option<i32>,
    pub status: String,
    pub posted_at: DateTime<Utc>,
}

/// Create/update payload. The recruiter identity arrives explicitly; session
/// issuance is outside this service.
#[derive(Debug, Deserialize)]
pub struct JobCreate {
    pub title: String,
    pub company: String,
    pub description: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    pub location: Option<String>,
    pub experience_years: Option<i32>,
    pub recruiter_id: Uuid,
}
