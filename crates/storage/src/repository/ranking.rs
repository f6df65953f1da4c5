use sqlx::SqlitePool;

use crate::dto::park::{RankingEntry, RankingQuery};
use crate::error::Result;

pub struct RankingRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> RankingRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Leaderboard slice with 1-based ranks. Ties on rating fall back to id,
    /// so ranks are stable for a given database state.
    pub async fn get_rankings(&self, query: &RankingQuery) -> Result<Vec<RankingEntry>> {
        let entries = sqlx::query_as::<_, RankingEntry>(
            r#"
            SELECT
                ROW_NUMBER() OVER (ORDER BY rating DESC, id ASC) AS rank,
                id, name, image_url, rating, total_votes, wins, losses
            FROM parks
            ORDER BY rank
            LIMIT ?
            "#,
        )
        .bind(i64::from(query.limit))
        .fetch_all(self.pool)
        .await?;

        Ok(entries)
    }
}
