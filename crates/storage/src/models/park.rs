use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Rating every park starts from.
pub const INITIAL_RATING: i64 = 1200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Park {
    pub id: i64,
    pub name: String,
    pub image_url: String,
    pub rating: i64,
    pub total_votes: i64,
    pub wins: i64,
    pub losses: i64,
}
