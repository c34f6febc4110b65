//! Axum route handlers for the Interview API.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::ai::{self, Quiz};
use crate::interview::grading;
use crate::interview::repo::{create_assessment, list_assessments, NewAssessment, TECHNICAL};
use crate::models::assessment::{AssessmentRow, QuizQuestion};
use crate::routes::UserIdQuery;
use crate::state::AppState;
use crate::users::repo::find_user;

#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    pub user_id: Uuid,
    /// Empty: questions may cover anything in the user's industry.
    #[serde(default)]
    pub topics: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub user_id: Uuid,
    pub questions: Vec<QuizQuestion>,
    /// Same length and order as `questions`; `null` for a skipped question.
    pub answers: Vec<Option<String>>,
}

/// POST /api/v1/interview/quiz
pub async fn handle_generate_quiz(
    State(state): State<AppState>,
    Json(req): Json<QuizRequest>,
) -> Result<Json<Quiz>, AppError> {
    let llm = state.llm()?;
    let topics: Vec<String> = req
        .topics
        .iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();

    let user = find_user(&state.db, req.user_id).await?;
    Ok(Json(ai::generate_quiz(&state.cache, llm, &user, &topics).await?))
}

/// POST /api/v1/interview/assessments
///
/// Grades the answers server-side; the score is never taken from the client.
pub async fn handle_submit(
    State(state): State<AppState>,
    Json(req): Json<SubmitRequest>,
) -> Result<(StatusCode, Json<AssessmentRow>), AppError> {
    if req.questions.is_empty() {
        return Err(AppError::Validation("questions cannot be empty".to_string()));
    }
    if req.answers.len() != req.questions.len() {
        return Err(AppError::Validation(format!(
            "expected {} answers, got {}",
            req.questions.len(),
            req.answers.len()
        )));
    }

    let user = find_user(&state.db, req.user_id).await?;
    let results = grading::grade(&req.questions, &req.answers);
    let tip = ai::improvement_tip(state.llm.as_ref(), &user, &results).await;

    let row = create_assessment(
        &state.db,
        &state.cache,
        user.id,
        &NewAssessment {
            quiz_score: grading::score(&results),
            results: &results,
            category: TECHNICAL,
            improvement_tip: tip.as_deref(),
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/interview/assessments
pub async fn handle_list_assessments(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<AssessmentRow>>, AppError> {
    let user = find_user(&state.db, params.user_id).await?;
    Ok(Json(list_assessments(&state.db, &state.cache, user.id).await?))
}
