use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::parsing::links::ExtractedLinks;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub filename: String,
    pub file_size: Option<i64>,
    pub parsed_text: String,
    pub extracted_links: Json<ExtractedLinks>,
    pub skills: Vec<String>,
    pub sections: Json<HashMap<String, String>>,
    /// Result of the most recent link re-analysis, if any.
    pub link_analysis: Option<Json<Value>>,
    pub status: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Client-facing shape. Raw text is heavy, so listings omit it.
#[derive(Debug, Clone, Serialize)]
pub struct ResumePublic {
    pub id: Uuid,
    pub user_id: Uuid,
    pub filename: String,
    pub file_size: Option<i64>,
    pub extracted_links: ExtractedLinks,
    pub skills: Vec<String>,
    pub status: String,
    pub uploaded_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed_text: Option<String>,
}

impl ResumePublic {
    pub fn from_row(row: ResumeRow, include_text: bool) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            filename: row.filename,
            file_size: row.file_size,
            extracted_links: row.extracted_links.0,
            skills: row.skills,
            status: row.status,
            uploaded_at: row.uploaded_at,
            parsed_text: include_text.then_some(row.parsed_text),
        }
    }
}
