use sqlx::PgPool;

use crate::cache::CacheAside;
use crate::errors::AppError;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub cache: CacheAside,
    /// `None` when no API key was configured at startup.
    pub llm: Option<LlmClient>,
}

impl AppState {
    /// The LLM client, or `AiNotConfigured` so AI routes fail before doing any work.
    pub fn llm(&self) -> Result<&LlmClient, AppError> {
        self.llm.as_ref().ok_or(AppError::AiNotConfigured)
    }
}
