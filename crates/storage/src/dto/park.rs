use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use super::common::validate_limit;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RankingQuery {
    /// Number of entries to return (1-100, default 20)
    #[serde(default = "default_ranking_limit")]
    pub limit: u32,
}

fn default_ranking_limit() -> u32 {
    20
}

impl Default for RankingQuery {
    fn default() -> Self {
        Self {
            limit: default_ranking_limit(),
        }
    }
}

impl RankingQuery {
    pub fn validate(&self) -> Result<(), String> {
        validate_limit(self.limit)
    }
}

/// A park together with its position in the leaderboard
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct RankingEntry {
    pub rank: i64,
    pub id: i64,
    pub name: String,
    pub image_url: String,
    pub rating: i64,
    pub total_votes: i64,
    pub wins: i64,
    pub losses: i64,
}
