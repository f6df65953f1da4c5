use sqlx::SqlitePool;
use storage::{
    dto::park::{RankingEntry, RankingQuery},
    error::Result,
    repository::ranking::RankingRepository,
};

/// Get the leaderboard, limited to `query.limit` entries
pub async fn get_rankings(pool: &SqlitePool, query: &RankingQuery) -> Result<Vec<RankingEntry>> {
    let repo = RankingRepository::new(pool);
    repo.get_rankings(query).await
}
