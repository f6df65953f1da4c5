use sqlx::SqlitePool;
use storage::{
    dto::vote::{RatingOutcome, RecentVote, RecentVotesQuery},
    error::Result,
    repository::vote::VoteRepository,
    services::voting,
};

/// Record a vote and update both parks' ratings
pub async fn record_vote(
    pool: &SqlitePool,
    winner_id: i64,
    loser_id: i64,
) -> Result<RatingOutcome> {
    voting::record_outcome(pool, winner_id, loser_id).await
}

/// Most recent votes with park names
pub async fn recent_votes(
    pool: &SqlitePool,
    query: &RecentVotesQuery,
) -> Result<Vec<RecentVote>> {
    let repo = VoteRepository::new(pool);
    repo.recent(query).await
}
