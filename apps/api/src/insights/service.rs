use std::future::Future;

use sqlx::PgPool;
use tracing::info;

use crate::cache::{keys, CacheAside, TtlTier};
use crate::errors::AppError;
use crate::insights::{prompts, repo};
use crate::llm_client::{prompts::JSON_ONLY_SYSTEM, LlmClient};
use crate::models::insight::{GeneratedInsights, IndustryInsightRow};
use crate::models::user::User;

/// Model-generated insights for an industry, shared by every user in it.
pub async fn generate_industry_insights(
    cache: &CacheAside,
    llm: &LlmClient,
    industry: &str,
) -> Result<GeneratedInsights, AppError> {
    cached_industry_insights(cache, industry, || model_industry_insights(llm, industry)).await
}

/// Like [`generate_industry_insights`], but drops the shared entry first so the
/// producer always runs and its answer replaces the stale one.
pub async fn regenerate_industry_insights<F, Fut>(
    cache: &CacheAside,
    industry: &str,
    producer: F,
) -> Result<GeneratedInsights, AppError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<GeneratedInsights, AppError>>,
{
    cache.invalidate(&keys::industry_insights(industry)).await;
    cached_industry_insights(cache, industry, producer).await
}

async fn cached_industry_insights<F, Fut>(
    cache: &CacheAside,
    industry: &str,
    producer: F,
) -> Result<GeneratedInsights, AppError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<GeneratedInsights, AppError>>,
{
    cache
        .get_or_compute(&keys::industry_insights(industry), TtlTier::Week, producer)
        .await
}

/// Uncached model call behind both generation paths.
pub async fn model_industry_insights(
    llm: &LlmClient,
    industry: &str,
) -> Result<GeneratedInsights, AppError> {
    info!("Generating industry insights for '{industry}'");
    let insights = llm
        .call_json::<GeneratedInsights>(
            &prompts::industry_insights_prompt(industry),
            JSON_ONLY_SYSTEM,
        )
        .await?;
    Ok(insights)
}

/// Returns the persisted row for `industry`, generating and storing it on first
/// use. The LLM is only needed when the row does not exist yet.
pub async fn ensure_industry_insight(
    db: &PgPool,
    cache: &CacheAside,
    llm: Option<&LlmClient>,
    industry: &str,
) -> Result<IndustryInsightRow, AppError> {
    if let Some(row) = repo::find_by_industry(db, industry).await? {
        return Ok(row);
    }
    let llm = llm.ok_or(AppError::AiNotConfigured)?;
    let insights = generate_industry_insights(cache, llm, industry).await?;
    Ok(repo::insert_generated(db, industry, &insights).await?)
}

/// The dashboard view of a user's industry.
pub async fn dashboard_insights(
    db: &PgPool,
    cache: &CacheAside,
    llm: Option<&LlmClient>,
    user: &User,
) -> Result<IndustryInsightRow, AppError> {
    let industry = user
        .industry
        .as_deref()
        .map(str::trim)
        .filter(|i| !i.is_empty())
        .ok_or_else(|| AppError::Validation("User industry is not defined".to_string()))?;

    cache
        .get_or_compute(&keys::dashboard_insights(user.id), TtlTier::Medium, || {
            ensure_industry_insight(db, cache, llm, industry)
        })
        .await
}
