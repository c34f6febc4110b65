//! Axum route handlers for the Cover Letter API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cover_letter::ai::{self, GenerateInput, TailoredCoverLetter};
use crate::cover_letter::document::{CoverLetterDocument, SectionKey};
use crate::cover_letter::repo::{
    create_cover_letter, delete_cover_letter, get_cover_letter, list_cover_letters,
    update_cover_letter_content, NewCoverLetter,
};
use crate::errors::{require_non_empty, AppError};
use crate::models::analysis::DocumentAnalysis;
use crate::models::cover_letter::CoverLetterRow;
use crate::resume::repo::get_resume;
use crate::routes::UserIdQuery;
use crate::state::AppState;
use crate::users::repo::find_user;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateCoverLetterRequest {
    pub user_id: Uuid,
    pub job_title: String,
    pub company_name: String,
    pub job_description: String,
    pub template_id: Option<String>,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCoverLetterRequest {
    pub user_id: Uuid,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ImproveRequest {
    pub user_id: Uuid,
    pub part: SectionKey,
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
    pub cover_letter_content: String,
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct TailorResponse {
    pub changes: TailoredCoverLetter,
    /// The submitted letter with `changes` applied section by section.
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub user_id: Uuid,
    pub job_title: String,
    pub company_name: String,
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub content: String,
    pub document: CoverLetterDocument,
}

// ────────────────────────────────────────────────────────────────────────────
// CRUD handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/cover-letters
pub async fn handle_list(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<CoverLetterRow>>, AppError> {
    let user = find_user(&state.db, params.user_id).await?;
    Ok(Json(list_cover_letters(&state.db, &state.cache, user.id).await?))
}

/// POST /api/v1/cover-letters
pub async fn handle_create(
    State(state): State<AppState>,
    Json(req): Json<CreateCoverLetterRequest>,
) -> Result<(StatusCode, Json<CoverLetterRow>), AppError> {
    require_non_empty("job_title", &req.job_title)?;
    require_non_empty("company_name", &req.company_name)?;
    require_non_empty("content", &req.content)?;

    let user = find_user(&state.db, req.user_id).await?;
    let row = create_cover_letter(
        &state.db,
        &state.cache,
        user.id,
        &NewCoverLetter {
            job_title: req.job_title.trim(),
            company_name: req.company_name.trim(),
            job_description: &req.job_description,
            template_id: req.template_id.as_deref(),
            content: &req.content,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/cover-letters/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<CoverLetterRow>, AppError> {
    let user = find_user(&state.db, params.user_id).await?;
    get_cover_letter(&state.db, &state.cache, user.id, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Cover letter {id} not found")))
}

/// PUT /api/v1/cover-letters/:id
pub async fn handle_update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateCoverLetterRequest>,
) -> Result<Json<CoverLetterRow>, AppError> {
    require_non_empty("content", &req.content)?;
    let user = find_user(&state.db, req.user_id).await?;
    let row = update_cover_letter_content(&state.db, &state.cache, user.id, id, &req.content).await?;
    Ok(Json(row))
}

/// DELETE /api/v1/cover-letters/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    let user = find_user(&state.db, params.user_id).await?;
    delete_cover_letter(&state.db, &state.cache, user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// AI handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/cover-letters/improve
pub async fn handle_improve(
    State(state): State<AppState>,
    Json(req): Json<ImproveRequest>,
) -> Result<Json<ImproveResponse>, AppError> {
    let llm = state.llm()?;
    require_non_empty("current", &req.current)?;

    let user = find_user(&state.db, req.user_id).await?;
    let improved = ai::improve_part(&state.cache, llm, &user, req.part, &req.current).await?;
    Ok(Json(ImproveResponse { improved }))
}

/// POST /api/v1/cover-letters/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<DocumentAnalysis>, AppError> {
    let llm = state.llm()?;
    require_non_empty("content", &req.content)?;

    let user = find_user(&state.db, req.user_id).await?;
    Ok(Json(ai::analyze(&state.cache, llm, &user, &req.content).await?))
}

/// POST /api/v1/cover-letters/tailor
pub async fn handle_tailor(
    State(state): State<AppState>,
    Json(req): Json<TailorRequest>,
) -> Result<Json<TailorResponse>, AppError> {
    let llm = state.llm()?;
    require_non_empty("cover_letter_content", &req.cover_letter_content)?;
    require_non_empty("job_description", &req.job_description)?;

    let user = find_user(&state.db, req.user_id).await?;
    let changes = ai::tailor(
        &state.cache,
        llm,
        &user,
        &req.cover_letter_content,
        &req.job_description,
    )
    .await?;

    let mut document = CoverLetterDocument::parse(&req.cover_letter_content);
    changes.apply_to(&mut document);

    Ok(Json(TailorResponse {
        content: document.render(),
        changes,
    }))
}

/// POST /api/v1/cover-letters/generate
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let llm = state.llm()?;
    require_non_empty("job_title", &req.job_title)?;
    require_non_empty("company_name", &req.company_name)?;
    require_non_empty("job_description", &req.job_description)?;

    let user = find_user(&state.db, req.user_id).await?;
    let resume_content = get_resume(&state.db, &state.cache, user.id)
        .await?
        .map(|r| r.content)
        .unwrap_or_default();

    let content = ai::generate(
        &state.cache,
        llm,
        &user,
        &GenerateInput {
            job_title: req.job_title.trim(),
            company_name: req.company_name.trim(),
            job_description: &req.job_description,
            resume_content: &resume_content,
        },
    )
    .await?;

    Ok(Json(GenerateResponse {
        document: CoverLetterDocument::parse(&content),
        content,
    }))
}
