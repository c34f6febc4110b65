use axum::{
    extract::{Query, State},
    Json,
};

use crate::errors::AppError;
use crate::insights::service::dashboard_insights;
use crate::models::insight::IndustryInsightRow;
use crate::routes::UserIdQuery;
use crate::state::AppState;
use crate::users::repo::find_user;

/// GET /api/v1/dashboard/insights
pub async fn handle_dashboard_insights(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<IndustryInsightRow>, AppError> {
    let user = find_user(&state.db, params.user_id).await?;
    let insights = dashboard_insights(&state.db, &state.cache, state.llm.as_ref(), &user).await?;
    Ok(Json(insights))
}
