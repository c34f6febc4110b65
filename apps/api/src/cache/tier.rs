use serde::{Deserialize, Serialize};

/// Expiry class for a cache entry. Callers pick one of these; there is no
/// API for writing with an arbitrary duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TtlTier {
    /// 5 minutes. Lists that change whenever the user creates or deletes something.
    Short,
    /// 1 hour. Single records and most AI analyses.
    Medium,
    /// 1 day. Expensive AI generations keyed on their full input.
    Long,
    /// 1 week. Shared, slow-moving data such as industry insights.
    Week,
}

impl TtlTier {
    pub const fn as_secs(self) -> u64 {
        match self {
            TtlTier::Short => 60 * 5,
            TtlTier::Medium => 60 * 60,
            TtlTier::Long => 60 * 60 * 24,
            TtlTier::Week => 60 * 60 * 24 * 7,
        }
    }
}
