use chrono::{Duration, Utc};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::insight::{GeneratedInsights, IndustryInsightRow};

/// How long a persisted insight row is considered current.
pub fn refresh_period() -> Duration {
    Duration::days(7)
}

pub async fn find_by_industry(
    db: &PgPool,
    industry: &str,
) -> Result<Option<IndustryInsightRow>, sqlx::Error> {
    sqlx::query_as::<_, IndustryInsightRow>("SELECT * FROM industry_insights WHERE industry = $1")
        .bind(industry)
        .fetch_optional(db)
        .await
}

/// Inserts the row for `industry`. If another request created it first, that row
/// is returned unchanged.
pub async fn insert_generated(
    db: &PgPool,
    industry: &str,
    insights: &GeneratedInsights,
) -> Result<IndustryInsightRow, sqlx::Error> {
    let now = Utc::now();
    sqlx::query_as::<_, IndustryInsightRow>(
        r#"
        INSERT INTO industry_insights
            (id, industry, salary_ranges, growth_rate, demand_level, top_skills,
             market_outlook, key_trends, recommended_skills, last_updated, next_update)
        VALUES (gen_random_uuid(), $1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        ON CONFLICT (industry) DO UPDATE SET industry = EXCLUDED.industry
        RETURNING *
        "#,
    )
    .bind(industry)
    .bind(Json(&insights.salary_ranges))
    .bind(insights.growth_rate)
    .bind(insights.demand_level.as_str())
    .bind(&insights.top_skills)
    .bind(insights.market_outlook.as_str())
    .bind(&insights.key_trends)
    .bind(&insights.recommended_skills)
    .bind(now)
    .bind(now + refresh_period())
    .fetch_one(db)
    .await
}

pub async fn update_generated(
    db: &PgPool,
    industry: &str,
    insights: &GeneratedInsights,
) -> Result<(), sqlx::Error> {
    let now = Utc::now();
    sqlx::query(
        r#"
        UPDATE industry_insights
        SET salary_ranges = $1, growth_rate = $2, demand_level = $3, top_skills = $4,
            market_outlook = $5, key_trends = $6, recommended_skills = $7,
            last_updated = $8, next_update = $9
        WHERE industry = $10
        "#,
    )
    .bind(Json(&insights.salary_ranges))
    .bind(insights.growth_rate)
    .bind(insights.demand_level.as_str())
    .bind(&insights.top_skills)
    .bind(insights.market_outlook.as_str())
    .bind(&insights.key_trends)
    .bind(&insights.recommended_skills)
    .bind(now)
    .bind(now + refresh_period())
    .bind(industry)
    .execute(db)
    .await?;
    Ok(())
}

/// Industries whose row is past its `next_update`.
pub async fn industries_due(db: &PgPool) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        "SELECT industry FROM industry_insights WHERE next_update <= NOW() ORDER BY next_update",
    )
    .fetch_all(db)
    .await
}
