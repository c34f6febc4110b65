use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::cache::{keys, CacheAside};
use crate::errors::{require_non_empty, AppError};
use crate::insights::service::ensure_industry_insight;
use crate::models::insight::IndustryInsightRow;
use crate::models::user::User;
use crate::routes::UserIdQuery;
use crate::state::AppState;
use crate::users::repo::{find_user, onboarding_status, update_profile, ProfileUpdate};

#[derive(Debug, Deserialize)]
pub struct ProfileRequest {
    pub user_id: Uuid,
    pub industry: String,
    pub experience: Option<i32>,
    pub bio: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct OnboardingStatus {
    pub is_onboarded: bool,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: User,
    /// `None` only when the industry is new and no AI client is configured.
    pub industry_insight: Option<IndustryInsightRow>,
}

/// PUT /api/v1/users/profile
///
/// Every AI-derived cache entry of the user embeds profile data in its prompt,
/// so all of them are dropped along with the dashboard entry.
pub async fn handle_update_profile(
    State(state): State<AppState>,
    Json(req): Json<ProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    require_non_empty("industry", &req.industry)?;
    if req.experience.is_some_and(|years| years < 0) {
        return Err(AppError::Validation(
            "experience cannot be negative".to_string(),
        ));
    }

    // Unknown users stop here, before any generation or insert.
    let user = find_user(&state.db, req.user_id).await?;

    let industry = req.industry.trim();
    let skills: Vec<String> = req
        .skills
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let industry_insight =
        match ensure_industry_insight(&state.db, &state.cache, state.llm.as_ref(), industry).await
        {
            Ok(row) => Some(row),
            Err(AppError::AiNotConfigured) => {
                warn!("No insight row for '{industry}' and AI is not configured");
                None
            }
            Err(e) => return Err(e),
        };

    let user = update_profile(
        &state.db,
        user.id,
        &ProfileUpdate {
            industry,
            experience: req.experience,
            bio: req.bio.as_deref(),
            skills: &skills,
        },
    )
    .await?;

    invalidate_profile(&state.cache, user.id).await;

    Ok(Json(ProfileResponse {
        user,
        industry_insight,
    }))
}

/// Drops every cache entry derived from the user's profile: the dashboard and
/// all AI generations, whose prompts embed industry, experience and skills.
pub async fn invalidate_profile(cache: &CacheAside, user_id: Uuid) {
    cache.invalidate(&keys::dashboard_insights(user_id)).await;
    cache
        .invalidate_patterns(keys::user_ai_patterns(user_id))
        .await;
}

/// GET /api/v1/users/onboarding-status
///
/// A user is onboarded once a profile with an industry has been saved. Unknown
/// users are simply not onboarded.
pub async fn handle_onboarding_status(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<OnboardingStatus>, AppError> {
    let is_onboarded = onboarding_status(&state.db, params.user_id).await?;
    Ok(Json(OnboardingStatus { is_onboarded }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::cache::{CacheStore, MemoryStore};

    #[tokio::test]
    async fn test_invalidate_profile_drops_derived_entries_only() {
        let store = Arc::new(MemoryStore::new());
        let cache = CacheAside::new(store.clone());
        let user = Uuid::from_u128(1);
        let other = Uuid::from_u128(2);
        let letter = Uuid::from_u128(9);

        let derived = [
            keys::dashboard_insights(user),
            keys::resume_improve(user, "summary", "x"),
            keys::resume_analyze(user, "x"),
            keys::resume_tailor(user, "x", "y"),
            keys::cover_letter_improve(user, "body", "x"),
            keys::cover_letter_analyze(user, "x"),
            keys::cover_letter_tailor(user, "x", "y"),
            keys::cover_letter_generate(user, "t", "c", "j", "r"),
            keys::interview_quiz(user, &[]),
        ];
        let kept = [
            keys::resume(user),
            keys::cover_letters(user),
            keys::cover_letter(user, letter),
            keys::assessments(user),
            keys::industry_insights("Fintech"),
            keys::dashboard_insights(other),
            keys::resume_analyze(other, "x"),
            keys::cover_letter_generate(other, "t", "c", "j", "r"),
        ];
        for key in derived.iter().chain(kept.iter()) {
            store.set(key, "\"v\"", 600).await.unwrap();
        }

        invalidate_profile(&cache, user).await;

        for key in &derived {
            assert_eq!(store.get(key).await.unwrap(), None, "{key} survived");
        }
        for key in &kept {
            assert!(store.get(key).await.unwrap().is_some(), "{key} was dropped");
        }
    }
}
