use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::dto::vote::{RecentVote, RecentVotesQuery};
use crate::error::{Result, StorageError};
use crate::models::Vote;

pub struct VoteRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> VoteRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Latest votes first, each joined with both parks' names and images.
    pub async fn recent(&self, query: &RecentVotesQuery) -> Result<Vec<RecentVote>> {
        let votes = sqlx::query_as::<_, RecentVote>(
            r#"
            SELECT
                v.id,
                v.winner_id,
                v.loser_id,
                w.name AS winner_name,
                w.image_url AS winner_image_url,
                l.name AS loser_name,
                l.image_url AS loser_image_url,
                v.timestamp
            FROM votes v
            JOIN parks w ON v.winner_id = w.id
            JOIN parks l ON v.loser_id = l.id
            ORDER BY v.timestamp DESC, v.id DESC
            LIMIT ?
            "#,
        )
        .bind(i64::from(query.limit))
        .fetch_all(self.pool)
        .await?;

        Ok(votes)
    }

    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM votes")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Append a vote row inside `tx`; id and timestamp come from the store.
    pub async fn insert_in_tx(
        tx: &mut Transaction<'_, Sqlite>,
        winner_id: i64,
        loser_id: i64,
    ) -> Result<Vote> {
        let vote = sqlx::query_as::<_, Vote>(
            r#"
            INSERT INTO votes (winner_id, loser_id)
            VALUES (?, ?)
            RETURNING id, winner_id, loser_id, timestamp
            "#,
        )
        .bind(winner_id)
        .bind(loser_id)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| StorageError::from(e).classify())?;

        Ok(vote)
    }
}
