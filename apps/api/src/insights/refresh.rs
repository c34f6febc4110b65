//! Background refresh of persisted industry insights.
//!
//! Rows past their `next_update` are regenerated; the shared industry entry and the
//! dashboard entries of every user in that industry are invalidated so the next
//! read sees the new row.

use std::time::Duration;

use sqlx::PgPool;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::cache::{keys, CacheAside};
use crate::errors::AppError;
use crate::insights::{repo, service};
use crate::llm_client::LlmClient;
use crate::users::repo::user_ids_in_industry;

pub fn spawn_refresh_loop(
    db: PgPool,
    cache: CacheAside,
    llm: LlmClient,
    every: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        info!(
            "Industry insight refresh scheduled every {}s",
            every.as_secs()
        );

        loop {
            interval.tick().await;
            match refresh_due(&db, &cache, &llm).await {
                Ok(0) => {}
                Ok(n) => info!("Refreshed insights for {n} industries"),
                Err(e) => error!("Industry insight refresh failed: {e}"),
            }
        }
    })
}

/// Regenerates every due industry. One failing industry does not stop the rest.
pub async fn refresh_due(
    db: &PgPool,
    cache: &CacheAside,
    llm: &LlmClient,
) -> Result<usize, AppError> {
    let industries = repo::industries_due(db).await?;
    let mut refreshed = 0;

    for industry in industries {
        match refresh_industry(db, cache, llm, &industry).await {
            Ok(()) => refreshed += 1,
            Err(e) => warn!("Skipping insight refresh for '{industry}': {e}"),
        }
    }
    Ok(refreshed)
}

async fn refresh_industry(
    db: &PgPool,
    cache: &CacheAside,
    llm: &LlmClient,
    industry: &str,
) -> Result<(), AppError> {
    let insights = service::regenerate_industry_insights(cache, industry, || {
        service::model_industry_insights(llm, industry)
    })
    .await?;
    repo::update_generated(db, industry, &insights).await?;

    let users = user_ids_in_industry(db, industry).await?;
    invalidate_dashboards(cache, &users).await;
    Ok(())
}

/// Drops the cached dashboard of every listed user.
pub async fn invalidate_dashboards(cache: &CacheAside, user_ids: &[Uuid]) {
    cache
        .invalidate_all(user_ids.iter().copied().map(keys::dashboard_insights))
        .await;
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::cache::{CacheStore, MemoryStore, TtlTier};
    use crate::models::insight::{DemandLevel, GeneratedInsights, MarketOutlook};

    fn insights(growth_rate: f64) -> GeneratedInsights {
        GeneratedInsights {
            salary_ranges: vec![],
            growth_rate,
            demand_level: DemandLevel::High,
            top_skills: vec!["Rust".to_string()],
            market_outlook: MarketOutlook::Positive,
            key_trends: vec![],
            recommended_skills: vec![],
        }
    }

    #[tokio::test]
    async fn test_regenerate_replaces_stale_shared_entry() {
        let store = Arc::new(MemoryStore::new());
        let cache = CacheAside::new(store.clone());
        let key = keys::industry_insights("Fintech");
        cache
            .get_or_compute(&key, TtlTier::Week, || async {
                Ok::<_, AppError>(insights(1.0))
            })
            .await
            .unwrap();

        let calls = AtomicUsize::new(0);
        let fresh = service::regenerate_industry_insights(&cache, "Fintech", || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(insights(9.0))
        })
        .await
        .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(fresh.growth_rate, 9.0);
        let stored: GeneratedInsights =
            serde_json::from_str(&store.get(&key).await.unwrap().unwrap()).unwrap();
        assert_eq!(stored.growth_rate, 9.0);
    }

    #[tokio::test]
    async fn test_failed_regeneration_leaves_no_stale_entry() {
        let store = Arc::new(MemoryStore::new());
        let cache = CacheAside::new(store.clone());
        let key = keys::industry_insights("Fintech");
        store.set(&key, &serde_json::to_string(&insights(1.0)).unwrap(), 60).await.unwrap();

        let result = service::regenerate_industry_insights(&cache, "Fintech", || async {
            Err(AppError::AiNotConfigured)
        })
        .await;

        assert!(matches!(result, Err(AppError::AiNotConfigured)));
        assert_eq!(store.get(&key).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_invalidate_dashboards_only_touches_listed_users() {
        let store = Arc::new(MemoryStore::new());
        let cache = CacheAside::new(store.clone());
        let (a, b, other) = (Uuid::from_u128(1), Uuid::from_u128(2), Uuid::from_u128(3));
        for user in [a, b, other] {
            store.set(&keys::dashboard_insights(user), "{}", 60).await.unwrap();
        }
        store.set(&keys::resume(a), "null", 60).await.unwrap();

        invalidate_dashboards(&cache, &[a, b]).await;

        assert_eq!(store.get(&keys::dashboard_insights(a)).await.unwrap(), None);
        assert_eq!(store.get(&keys::dashboard_insights(b)).await.unwrap(), None);
        assert!(store.get(&keys::dashboard_insights(other)).await.unwrap().is_some());
        assert!(store.get(&keys::resume(a)).await.unwrap().is_some());
    }
}
