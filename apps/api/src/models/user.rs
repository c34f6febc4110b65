use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    /// Subject id issued by the identity provider.
    pub external_id: String,
    pub email: String,
    pub industry: Option<String>,
    pub experience: Option<i32>,
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Label used in prompts when the user has not onboarded yet.
    pub fn industry_label(&self) -> &str {
        self.industry
            .as_deref()
            .filter(|i| !i.trim().is_empty())
            .unwrap_or("general")
    }
}
