use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json as SqlJson;
use sqlx::FromRow;
use uuid::Uuid;

use crate::cache::{ats_score_window, is_fresh};
use crate::errors::AppError;
use crate::models::job::JobRow;
use crate::models::resume::ResumeRow;
use crate::models::score::AtsScoreRow;
use crate::parsing::handlers::UserIdQuery;
use crate::parsing::links::extract_github_username;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub resume_id: Uuid,
    pub job_id: Uuid,
    pub user_id: Uuid,
}

/// POST /api/v1/ats/score
///
/// The score operation: validate the resume and job, reuse a fresh cached
/// score for the pair, otherwise recompute and persist. A stale score is
/// superseded by a new row, not rewritten in place.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(req): Json<ScoreRequest>,
) -> Result<(StatusCode, Json<AtsScoreRow>), AppError> {
    let resume: ResumeRow = sqlx::query_as("SELECT * FROM resumes WHERE id = $1 AND user_id = $2")
        .bind(req.resume_id)
        .bind(req.user_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Resume not found".to_string()))?;

    let job: JobRow = sqlx::query_as("SELECT * FROM jobs WHERE id = $1")
        .bind(req.job_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;

    let existing: Option<AtsScoreRow> = sqlx::query_as(
        "SELECT * FROM ats_scores WHERE resume_id = $1 AND job_id = $2 ORDER BY created_at DESC LIMIT 1",
    )
    .bind(req.resume_id)
    .bind(req.job_id)
    .fetch_optional(&state.db)
    .await?;
    if let Some(score) = existing {
        if is_fresh(score.created_at, Utc::now(), ats_score_window()) {
            return Ok((StatusCode::CREATED, Json(score)));
        }
    }

    // Blend only from the cached analysis; scoring never triggers a live
    // GitHub fetch.
    let github_score: Option<f64> = match resume
        .extracted_links
        .0
        .github
        .as_deref()
        .and_then(extract_github_username)
    {
        Some(username) => {
            sqlx::query_scalar("SELECT github_score FROM github_analysis WHERE username = $1")
                .bind(&username)
                .fetch_optional(&state.db)
                .await?
        }
        None => None,
    };

    let report = state
        .scorer
        .score(
            &resume.parsed_text,
            &job.description,
            &job.required_skills,
            github_score,
        )
        .await?;

    let row: AtsScoreRow = sqlx::query_as(
        r#"
        INSERT INTO ats_scores
            (id, resume_id, job_id, overall_score, breakdown, feedback,
             suggestions, matched_skills, missing_skills, tokens_used,
             estimated_cost, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(req.resume_id)
    .bind(req.job_id)
    .bind(report.overall_score)
    .bind(SqlJson(&report.breakdown))
    .bind(SqlJson(&report.feedback))
    .bind(&report.suggestions)
    .bind(&report.matched_skills)
    .bind(&report.missing_skills)
    .bind(report.tokens_used)
    .bind(report.estimated_cost)
    .bind(Utc::now())
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/ats/score/:id
pub async fn handle_get_score(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AtsScoreRow>, AppError> {
    let row: AtsScoreRow = sqlx::query_as("SELECT * FROM ats_scores WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Score not found".to_string()))?;

    Ok(Json(row))
}

#[derive(Debug, Serialize, FromRow)]
pub struct ScoreSummary {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub job_id: Uuid,
    pub overall_score: f64,
    pub created_at: DateTime<Utc>,
}

/// GET /api/v1/ats/history
pub async fn handle_score_history(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<ScoreSummary>>, AppError> {
    let rows: Vec<ScoreSummary> = sqlx::query_as(
        r#"
        SELECT s.id, s.resume_id, s.job_id, s.overall_score, s.created_at
        FROM ats_scores s
        JOIN resumes r ON r.id = s.resume_id
        WHERE r.user_id = $1
        ORDER BY s.created_at DESC
        "#,
    )
    .bind(params.user_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(rows))
}
