pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::github::handlers as analysis;
use crate::jobs::handlers as jobs;
use crate::parsing::handlers as resumes;
use crate::scoring::handlers as ats;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route("/api/v1/resumes/upload", post(resumes::handle_upload_resume))
        .route("/api/v1/resumes", get(resumes::handle_list_resumes))
        .route(
            "/api/v1/resumes/:id",
            get(resumes::handle_get_resume).delete(resumes::handle_delete_resume),
        )
        // Jobs API
        .route(
            "/api/v1/jobs",
            post(jobs::handle_create_job).get(jobs::handle_list_jobs),
        )
        .route(
            "/api/v1/jobs/:id",
            get(jobs::handle_get_job)
                .put(jobs::handle_update_job)
                .delete(jobs::handle_delete_job),
        )
        // ATS scoring API
        .route("/api/v1/ats/score", post(ats::handle_score))
        .route("/api/v1/ats/score/:id", get(ats::handle_get_score))
        .route("/api/v1/ats/history", get(ats::handle_score_history))
        // Analysis API
        .route(
            "/api/v1/analysis/github",
            post(analysis::handle_analyze_github),
        )
        .route(
            "/api/v1/analysis/github/:username",
            get(analysis::handle_get_github_analysis),
        )
        .route(
            "/api/v1/analysis/links/:resume_id",
            post(analysis::handle_analyze_links),
        )
        .with_state(state)
}
