use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::User;

/// Loads a user or fails with `NotFound`.
pub async fn find_user(db: &sqlx::PgPool, user_id: Uuid) -> Result<User, AppError> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))
}

pub struct ProfileUpdate<'a> {
    pub industry: &'a str,
    pub experience: Option<i32>,
    pub bio: Option<&'a str>,
    pub skills: &'a [String],
}

pub async fn update_profile(
    db: &sqlx::PgPool,
    user_id: Uuid,
    update: &ProfileUpdate<'_>,
) -> Result<User, AppError> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET industry = $1, experience = $2, bio = $3, skills = $4, updated_at = NOW()
        WHERE id = $5
        RETURNING *
        "#,
    )
    .bind(update.industry)
    .bind(update.experience)
    .bind(update.bio)
    .bind(update.skills)
    .bind(user_id)
    .fetch_optional(db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))
}

/// Whether the user has saved a profile with an industry. `false` for unknown ids.
pub async fn onboarding_status(db: &sqlx::PgPool, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let industry: Option<Option<String>> =
        sqlx::query_scalar("SELECT industry FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(db)
            .await?;
    Ok(industry
        .flatten()
        .is_some_and(|industry| !industry.trim().is_empty()))
}

/// Ids of every user whose profile names `industry`.
pub async fn user_ids_in_industry(db: &sqlx::PgPool, industry: &str) -> Result<Vec<Uuid>, sqlx::Error> {
    sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE industry = $1")
        .bind(industry)
        .fetch_all(db)
        .await
}
