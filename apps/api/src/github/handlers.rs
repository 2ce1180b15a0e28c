use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::types::Json as SqlJson;
use uuid::Uuid;

use crate::cache::{github_analysis_window, is_fresh};
use crate::errors::AppError;
use crate::github::{GithubAnalysis, GithubOutcome};
use crate::models::github::GithubAnalysisRow;
use crate::models::resume::ResumeRow;
use crate::parsing::handlers::UserIdQuery;
use crate::parsing::links::{extract_github_username, ExtractedLinks};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub username: String,
}

/// POST /api/v1/analysis/github
///
/// Reuses a cached analysis younger than 24 hours; otherwise fetches live and
/// upserts on success. Lookup errors are returned as data, never cached.
pub async fn handle_analyze_github(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<GithubOutcome>, AppError> {
    if req.username.trim().is_empty() {
        return Err(AppError::Validation("Username is required".to_string()));
    }

    let cached: Option<GithubAnalysisRow> =
        sqlx::query_as("SELECT * FROM github_analysis WHERE username = $1")
            .bind(&req.username)
            .fetch_optional(&state.db)
            .await?;
    if let Some(row) = cached {
        if is_fresh(row.analyzed_at, Utc::now(), github_analysis_window()) {
            return Ok(Json(GithubOutcome::Analysis(Box::new(row.analysis.0))));
        }
    }

    let outcome = state.github.fetch_profile(&req.username).await?;
    if let GithubOutcome::Analysis(analysis) = &outcome {
        upsert_analysis(&state.db, analysis).await?;
    }

    Ok(Json(outcome))
}

/// GET /api/v1/analysis/github/:username
///
/// Returns the cached analysis regardless of age; fetches and caches when
/// absent; 404 when the lookup itself fails.
pub async fn handle_get_github_analysis(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<GithubAnalysis>, AppError> {
    let cached: Option<GithubAnalysisRow> =
        sqlx::query_as("SELECT * FROM github_analysis WHERE username = $1")
            .bind(&username)
            .fetch_optional(&state.db)
            .await?;
    if let Some(row) = cached {
        return Ok(Json(row.analysis.0));
    }

    match state.github.fetch_profile(&username).await? {
        GithubOutcome::Analysis(analysis) => {
            upsert_analysis(&state.db, &analysis).await?;
            Ok(Json(*analysis))
        }
        GithubOutcome::Failed(err) => Err(AppError::NotFound(err.error)),
    }
}

/// Stored back on the resume row and returned to the caller.
#[derive(Debug, Serialize)]
pub struct LinkAnalysis {
    pub links: ExtractedLinks,
    pub github: Option<GithubOutcome>,
    pub link_score: f64,
}

/// POST /api/v1/analysis/links/:resume_id
///
/// Re-analyzes the links extracted at upload time. The GitHub fetch here is
/// always live; the 24-hour cache applies only to the analysis endpoints.
pub async fn handle_analyze_links(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<LinkAnalysis>, AppError> {
    let resume: ResumeRow = sqlx::query_as("SELECT * FROM resumes WHERE id = $1 AND user_id = $2")
        .bind(resume_id)
        .bind(params.user_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Resume not found".to_string()))?;

    let links = resume.extracted_links.0;
    let mut github = None;
    let mut link_score = 0.0;

    if let Some(username) = links.github.as_deref().and_then(extract_github_username) {
        let outcome = state.github.fetch_profile(&username).await?;
        if let GithubOutcome::Analysis(analysis) = &outcome {
            link_score = analysis.github_score;
        }
        github = Some(outcome);
    }

    let analysis = LinkAnalysis {
        links,
        github,
        link_score,
    };

    sqlx::query("UPDATE resumes SET link_analysis = $1 WHERE id = $2")
        .bind(SqlJson(&analysis))
        .bind(resume_id)
        .execute(&state.db)
        .await?;

    Ok(Json(analysis))
}

async fn upsert_analysis(db: &sqlx::PgPool, analysis: &GithubAnalysis) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO github_analysis (username, analysis, github_score, analyzed_at)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (username)
        DO UPDATE SET analysis = $2, github_score = $3, analyzed_at = $4
        "#,
    )
    .bind(&analysis.username)
    .bind(SqlJson(analysis))
    .bind(analysis.github_score)
    .bind(analysis.analyzed_at)
    .execute(db)
    .await?;
    Ok(())
}
