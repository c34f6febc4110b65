use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::cache::{keys, CacheAside, TtlTier};
use crate::errors::AppError;
use crate::models::assessment::{AssessmentRow, QuestionResult};

/// Category recorded for generated technical quizzes.
pub const TECHNICAL: &str = "Technical";

pub struct NewAssessment<'a> {
    pub quiz_score: f64,
    pub results: &'a [QuestionResult],
    pub category: &'a str,
    pub improvement_tip: Option<&'a str>,
}

/// The user's past assessments, oldest first so clients can chart progress.
pub async fn list_assessments(
    db: &PgPool,
    cache: &CacheAside,
    user_id: Uuid,
) -> Result<Vec<AssessmentRow>, AppError> {
    cache
        .get_or_compute(&keys::assessments(user_id), TtlTier::Short, || async {
            let rows = sqlx::query_as::<_, AssessmentRow>(
                "SELECT * FROM assessments WHERE user_id = $1 ORDER BY created_at ASC",
            )
            .bind(user_id)
            .fetch_all(db)
            .await?;
            Ok::<_, AppError>(rows)
        })
        .await
}

pub async fn create_assessment(
    db: &PgPool,
    cache: &CacheAside,
    user_id: Uuid,
    assessment: &NewAssessment<'_>,
) -> Result<AssessmentRow, AppError> {
    let row = sqlx::query_as::<_, AssessmentRow>(
        r#"
        INSERT INTO assessments
            (id, user_id, quiz_score, questions, category, improvement_tip,
             created_at, updated_at)
        VALUES (gen_random_uuid(), $1, $2, $3, $4, $5, NOW(), NOW())
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(assessment.quiz_score)
    .bind(Json(assessment.results))
    .bind(assessment.category)
    .bind(assessment.improvement_tip)
    .fetch_one(db)
    .await?;

    cache.invalidate(&keys::assessments(user_id)).await;
    Ok(row)
}
