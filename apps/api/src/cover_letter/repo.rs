use sqlx::PgPool;
use uuid::Uuid;

use crate::cache::{keys, CacheAside, TtlTier};
use crate::errors::AppError;
use crate::models::cover_letter::CoverLetterRow;

pub struct NewCoverLetter<'a> {
    pub job_title: &'a str,
    pub company_name: &'a str,
    pub job_description: &'a str,
    pub template_id: Option<&'a str>,
    pub content: &'a str,
}

/// All of the user's letters, newest first.
pub async fn list_cover_letters(
    db: &PgPool,
    cache: &CacheAside,
    user_id: Uuid,
) -> Result<Vec<CoverLetterRow>, AppError> {
    cache
        .get_or_compute(&keys::cover_letters(user_id), TtlTier::Short, || async {
            let rows = sqlx::query_as::<_, CoverLetterRow>(
                "SELECT * FROM cover_letters WHERE user_id = $1 ORDER BY created_at DESC",
            )
            .bind(user_id)
            .fetch_all(db)
            .await?;
            Ok::<_, AppError>(rows)
        })
        .await
}

/// One letter, visible only to its owner.
pub async fn get_cover_letter(
    db: &PgPool,
    cache: &CacheAside,
    user_id: Uuid,
    id: Uuid,
) -> Result<Option<CoverLetterRow>, AppError> {
    cache
        .get_or_compute(&keys::cover_letter(user_id, id), TtlTier::Medium, || async {
            let row = sqlx::query_as::<_, CoverLetterRow>(
                "SELECT * FROM cover_letters WHERE id = $1 AND user_id = $2",
            )
            .bind(id)
            .bind(user_id)
            .fetch_optional(db)
            .await?;
            Ok::<_, AppError>(row)
        })
        .await
}

pub async fn create_cover_letter(
    db: &PgPool,
    cache: &CacheAside,
    user_id: Uuid,
    letter: &NewCoverLetter<'_>,
) -> Result<CoverLetterRow, AppError> {
    let row = sqlx::query_as::<_, CoverLetterRow>(
        r#"
        INSERT INTO cover_letters
            (id, user_id, job_title, company_name, job_description, template_id, content,
             created_at, updated_at)
        VALUES (gen_random_uuid(), $1, $2, $3, $4, $5, $6, NOW(), NOW())
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(letter.job_title)
    .bind(letter.company_name)
    .bind(letter.job_description)
    .bind(letter.template_id)
    .bind(letter.content)
    .fetch_one(db)
    .await?;

    cache.invalidate(&keys::cover_letters(user_id)).await;
    Ok(row)
}

pub async fn update_cover_letter_content(
    db: &PgPool,
    cache: &CacheAside,
    user_id: Uuid,
    id: Uuid,
    content: &str,
) -> Result<CoverLetterRow, AppError> {
    let row = sqlx::query_as::<_, CoverLetterRow>(
        r#"
        UPDATE cover_letters SET content = $1, updated_at = NOW()
        WHERE id = $2 AND user_id = $3
        RETURNING *
        "#,
    )
    .bind(content)
    .bind(id)
    .bind(user_id)
    .fetch_optional(db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Cover letter {id} not found")))?;

    cache
        .invalidate_all([keys::cover_letter(user_id, id), keys::cover_letters(user_id)])
        .await;
    Ok(row)
}

pub async fn delete_cover_letter(
    db: &PgPool,
    cache: &CacheAside,
    user_id: Uuid,
    id: Uuid,
) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM cover_letters WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Cover letter {id} not found")));
    }

    cache
        .invalidate_all([keys::cover_letter(user_id, id), keys::cover_letters(user_id)])
        .await;
    Ok(())
}
