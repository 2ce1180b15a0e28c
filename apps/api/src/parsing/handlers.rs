use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use sqlx::types::Json as SqlJson;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{ResumePublic, ResumeRow};
use crate::state::AppState;

/// Upload cap, enforced before any parsing work.
const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Caller identity, passed explicitly. Session issuance is an external
/// collaborator, not this service.
#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

/// POST /api/v1/resumes/upload
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ResumePublic>), AppError> {
    let mut file_bytes: Option<bytes::Bytes> = None;
    let mut filename = "resume".to_string();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart payload: {e}")))?
    {
        if field.name() == Some("file") {
            if let Some(name) = field.file_name() {
                filename = name.to_string();
            }
            file_bytes = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?,
            );
        }
    }

    let file_bytes =
        file_bytes.ok_or_else(|| AppError::Validation("Missing 'file' field".to_string()))?;
    if file_bytes.len() > MAX_FILE_SIZE {
        return Err(AppError::Validation(
            "File size exceeds 5MB limit".to_string(),
        ));
    }

    // Extraction failure aborts here; nothing is persisted for the document.
    let parsed = state.parser.parse(&file_bytes, &filename)?;

    let row: ResumeRow = sqlx::query_as(
        r#"
        INSERT INTO resumes
            (id, user_id, filename, file_size, parsed_text, extracted_links,
             skills, sections, status, uploaded_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(params.user_id)
    .bind(&filename)
    .bind(file_bytes.len() as i64)
    .bind(&parsed.raw_text)
    .bind(SqlJson(&parsed.links))
    .bind(&parsed.skills)
    .bind(SqlJson(&parsed.sections))
    .bind("parsed")
    .bind(Utc::now())
    .fetch_one(&state.db)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(ResumePublic::from_row(row, true)),
    ))
}

/// GET /api/v1/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<ResumePublic>>, AppError> {
    let rows: Vec<ResumeRow> =
        sqlx::query_as("SELECT * FROM resumes WHERE user_id = $1 ORDER BY uploaded_at DESC")
            .bind(params.user_id)
            .fetch_all(&state.db)
            .await?;

    Ok(Json(
        rows.into_iter()
            .map(|r| ResumePublic::from_row(r, false))
            .collect(),
    ))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ResumePublic>, AppError> {
    let row: ResumeRow = sqlx::query_as("SELECT * FROM resumes WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(params.user_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Resume not found".to_string()))?;

    Ok(Json(ResumePublic::from_row(row, true)))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM resumes WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(params.user_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Resume not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}
