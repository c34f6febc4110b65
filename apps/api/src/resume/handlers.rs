//! Axum route handlers for the Resume API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{require_non_empty, AppError};
use crate::models::analysis::DocumentAnalysis;
use crate::models::resume::ResumeRow;
use crate::resume::ai::{self, ResumeSection, TailoredResume};
use crate::resume::repo::{get_resume, save_resume};
use crate::routes::UserIdQuery;
use crate::state::AppState;
use crate::users::repo::find_user;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SaveResumeRequest {
    pub user_id: Uuid,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ImproveRequest {
    pub user_id: Uuid,
    pub section: ResumeSection,
    pub current: String,
}

#[derive(Debug, Serialize)]
pub struct ImproveResponse {
    pub improved: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub user_id: Uuid,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct TailorRequest {
    pub user_id: Uuid,
    pub resume_content: String,
    pub job_description: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/resume
///
/// `null` when the user has not saved a resume yet.
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Option<ResumeRow>>, AppError> {
    let user = find_user(&state.db, params.user_id).await?;
    let resume = get_resume(&state.db, &state.cache, user.id).await?;
    Ok(Json(resume))
}

/// PUT /api/v1/resume
pub async fn handle_save_resume(
    State(state): State<AppState>,
    Json(req): Json<SaveResumeRequest>,
) -> Result<Json<ResumeRow>, AppError> {
    let user = find_user(&state.db, req.user_id).await?;
    let resume = save_resume(&state.db, &state.cache, user.id, &req.content).await?;
    Ok(Json(resume))
}

/// POST /api/v1/resume/improve
pub async fn handle_improve(
    State(state): State<AppState>,
    Json(req): Json<ImproveRequest>,
) -> Result<Json<ImproveResponse>, AppError> {
    let llm = state.llm()?;
    require_non_empty("current", &req.current)?;

    let user = find_user(&state.db, req.user_id).await?;
    let improved = ai::improve_section(&state.cache, llm, &user, req.section, &req.current).await?;
    Ok(Json(ImproveResponse { improved }))
}

/// POST /api/v1/resume/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<DocumentAnalysis>, AppError> {
    let llm = state.llm()?;
    require_non_empty("content", &req.content)?;

    let user = find_user(&state.db, req.user_id).await?;
    let analysis = ai::analyze(&state.cache, llm, &user, &req.content).await?;
    Ok(Json(analysis))
}

/// POST /api/v1/resume/tailor
pub async fn handle_tailor(
    State(state): State<AppState>,
    Json(req): Json<TailorRequest>,
) -> Result<Json<TailoredResume>, AppError> {
    let llm = state.llm()?;
    require_non_empty("resume_content", &req.resume_content)?;
    require_non_empty("job_description", &req.job_description)?;

    let user = find_user(&state.db, req.user_id).await?;
    let tailored = ai::tailor(
        &state.cache,
        llm,
        &user,
        &req.resume_content,
        &req.job_description,
    )
    .await?;
    Ok(Json(tailored))
}
