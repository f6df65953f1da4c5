use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// One recorded outcome. Rows are append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Vote {
    pub id: i64,
    pub winner_id: i64,
    pub loser_id: i64,
    pub timestamp: NaiveDateTime,
}
