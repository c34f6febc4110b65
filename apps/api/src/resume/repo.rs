use sqlx::PgPool;
use uuid::Uuid;

use crate::cache::{keys, CacheAside, TtlTier};
use crate::errors::AppError;
use crate::models::resume::ResumeRow;

/// The user's resume, read through the cache. `None` until the first save.
pub async fn get_resume(
    db: &PgPool,
    cache: &CacheAside,
    user_id: Uuid,
) -> Result<Option<ResumeRow>, AppError> {
    cache
        .get_or_compute(&keys::resume(user_id), TtlTier::Medium, || async {
            let row = sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(db)
                .await?;
            Ok::<_, AppError>(row)
        })
        .await
}

/// Creates or replaces the user's resume, then drops the cached copy.
pub async fn save_resume(
    db: &PgPool,
    cache: &CacheAside,
    user_id: Uuid,
    content: &str,
) -> Result<ResumeRow, AppError> {
    let row = sqlx::query_as::<_, ResumeRow>(
        r#"
        INSERT INTO resumes (id, user_id, content, created_at, updated_at)
        VALUES (gen_random_uuid(), $1, $2, NOW(), NOW())
        ON CONFLICT (user_id) DO UPDATE SET content = EXCLUDED.content, updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(content)
    .fetch_one(db)
    .await?;

    cache.invalidate(&keys::resume(user_id)).await;
    Ok(row)
}
