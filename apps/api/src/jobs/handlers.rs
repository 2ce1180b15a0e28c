use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::{JobCreate, JobRow};
use crate::state::AppState;

/// POST /api/v1/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(req): Json<JobCreate>,
) -> Result<(StatusCode, Json<JobRow>), AppError> {
    let row: JobRow = sqlx::query_as(
        r#"
        INSERT INTO jobs
            (id, recruiter_id, title, company, description, required_skills,
             location, experience_years, status, posted_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(req.recruiter_id)
    .bind(&req.title)
    .bind(&req.company)
    .bind(&req.description)
    .bind(&req.required_skills)
    .bind(&req.location)
    .bind(req.experience_years)
    .bind("active")
    .bind(Utc::now())
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(row)))
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    20
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<Vec<JobRow>>, AppError> {
    let rows: Vec<JobRow> = sqlx::query_as(
        "SELECT * FROM jobs WHERE status = 'active' ORDER BY posted_at DESC OFFSET $1 LIMIT $2",
    )
    .bind(params.skip.max(0))
    .bind(params.limit.clamp(1, 100))
    .fetch_all(&state.db)
    .await?;

    Ok(Json(rows))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<JobRow>, AppError> {
    let row: JobRow = sqlx::query_as("SELECT * FROM jobs WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;

    Ok(Json(row))
}

/// PUT /api/v1/jobs/:id
pub async fn handle_update_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<JobCreate>,
) -> Result<Json<JobRow>, AppError> {
    let row: JobRow = sqlx::query_as(
        r#"
        UPDATE jobs
        SET title = $1, company = $2, description = $3, required_skills = $4,
            location = $5, experience_years = $6
        WHERE id = $7 AND recruiter_id = $8
        RETURNING *
        "#,
    )
    .bind(&req.title)
    .bind(&req.company)
    .bind(&req.description)
    .bind(&req.required_skills)
    .bind(&req.location)
    .bind(req.experience_years)
    .bind(id)
    .bind(req.recruiter_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound("Job not found or unauthorized".to_string()))?;

    Ok(Json(row))
}

#[derive(Debug, Deserialize)]
pub struct RecruiterIdQuery {
    pub recruiter_id: Uuid,
}

/// DELETE /api/v1/jobs/:id
///
/// Soft delete: flips the posting status so scoring history stays intact.
pub async fn handle_delete_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<RecruiterIdQuery>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("UPDATE jobs SET status = 'deleted' WHERE id = $1 AND recruiter_id = $2")
        .bind(id)
        .bind(params.recruiter_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(
            "Job not found or unauthorized".to_string(),
        ));
    }
    Ok(StatusCode::NO_CONTENT)
}
