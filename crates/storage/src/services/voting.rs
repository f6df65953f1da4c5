use sqlx::SqlitePool;

use crate::dto::vote::RatingOutcome;
use crate::error::{Result, StorageError};
use crate::repository::park::{ParkRepository, Side};
use crate::repository::vote::VoteRepository;
use crate::services::elo::compute_elo;

/// Record that `winner_id` beat `loser_id`.
///
/// Both parks' ratings and counters and the new vote row are committed
/// together or not at all: every early return drops the transaction, which
/// rolls it back.
pub async fn record_outcome(
    pool: &SqlitePool,
    winner_id: i64,
    loser_id: i64,
) -> Result<RatingOutcome> {
    if winner_id == loser_id {
        return Err(StorageError::InvalidArgument(
            "Winner and loser cannot be the same park".to_string(),
        ));
    }

    let mut tx = pool.begin().await?;

    // Writing first takes SQLite's write lock before any rating is read, so
    // concurrent votes on the same park serialize instead of losing updates.
    if !ParkRepository::record_participation(&mut tx, winner_id, Side::Winner).await? {
        return Err(StorageError::InvalidReference(winner_id));
    }
    if !ParkRepository::record_participation(&mut tx, loser_id, Side::Loser).await? {
        return Err(StorageError::InvalidReference(loser_id));
    }

    let winner_rating = ParkRepository::rating_in_tx(&mut tx, winner_id).await?;
    let loser_rating = ParkRepository::rating_in_tx(&mut tx, loser_id).await?;
    let update = compute_elo(winner_rating, loser_rating);

    ParkRepository::set_rating_in_tx(&mut tx, winner_id, update.new_winner_rating).await?;
    ParkRepository::set_rating_in_tx(&mut tx, loser_id, update.new_loser_rating).await?;

    let vote = VoteRepository::insert_in_tx(&mut tx, winner_id, loser_id).await?;

    tx.commit().await?;

    tracing::info!(
        vote_id = vote.id,
        winner_id,
        loser_id,
        gain = update.winner_gain(winner_rating),
        loss = update.loser_loss(loser_rating),
        "Recorded vote: winner {} -> {}, loser {} -> {}",
        winner_rating,
        update.new_winner_rating,
        loser_rating,
        update.new_loser_rating
    );

    Ok(RatingOutcome {
        vote_id: vote.id,
        winner_id,
        loser_id,
        new_winner_rating: update.new_winner_rating,
        new_loser_rating: update.new_loser_rating,
        timestamp: vote.timestamp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;
    use crate::models::Park;

    async fn setup(ratings: &[i64]) -> (Database, Vec<Park>) {
        let db = Database::in_memory().await.unwrap();
        let repo = ParkRepository::new(db.pool());
        let mut parks = Vec::new();
        for (i, rating) in ratings.iter().enumerate() {
            let park = repo.create(&format!("Park {}", i), "img").await.unwrap();
            sqlx::query("UPDATE parks SET rating = ? WHERE id = ?")
                .bind(*rating)
                .bind(park.id)
                .execute(db.pool())
                .await
                .unwrap();
            parks.push(repo.find_by_id(park.id).await.unwrap());
        }
        (db, parks)
    }

    async fn snapshot(db: &Database) -> (Vec<Park>, i64) {
        let parks = ParkRepository::new(db.pool()).list_ranked().await.unwrap();
        let votes = VoteRepository::new(db.pool()).count().await.unwrap();
        (parks, votes)
    }

    #[tokio::test]
    async fn test_even_matchup_updates_everything() {
        let (db, parks) = setup(&[1200, 1200]).await;
        let (winner, loser) = (&parks[0], &parks[1]);

        let outcome = record_outcome(db.pool(), winner.id, loser.id).await.unwrap();

        assert_eq!(outcome.new_winner_rating, 1216);
        assert_eq!(outcome.new_loser_rating, 1184);

        let repo = ParkRepository::new(db.pool());
        let winner = repo.find_by_id(winner.id).await.unwrap();
        let loser = repo.find_by_id(loser.id).await.unwrap();
        assert_eq!(
            (winner.rating, winner.total_votes, winner.wins, winner.losses),
            (1216, 1, 1, 0)
        );
        assert_eq!(
            (loser.rating, loser.total_votes, loser.wins, loser.losses),
            (1184, 1, 0, 1)
        );

        let votes = VoteRepository::new(db.pool())
            .recent(&Default::default())
            .await
            .unwrap();
        assert_eq!(votes.len(), 1);
        assert_eq!(votes[0].id, outcome.vote_id);
        assert_eq!((votes[0].winner_id, votes[0].loser_id), (winner.id, loser.id));
        assert_eq!(votes[0].timestamp, outcome.timestamp);
    }

    #[tokio::test]
    async fn test_uneven_matchup() {
        let (db, parks) = setup(&[1400, 1000]).await;

        let outcome = record_outcome(db.pool(), parks[0].id, parks[1].id).await.unwrap();

        assert_eq!(outcome.new_winner_rating, 1403);
        assert_eq!(outcome.new_loser_rating, 997);
    }

    #[tokio::test]
    async fn test_same_park_is_invalid_argument() {
        let (db, parks) = setup(&[1200, 1200]).await;
        let before = snapshot(&db).await;

        let err = record_outcome(db.pool(), parks[0].id, parks[0].id).await.unwrap_err();

        assert!(matches!(err, StorageError::InvalidArgument(_)));
        assert_eq!(snapshot(&db).await, before);
    }

    #[tokio::test]
    async fn test_unknown_winner_is_invalid_reference() {
        let (db, parks) = setup(&[1200, 1200]).await;
        let before = snapshot(&db).await;

        let err = record_outcome(db.pool(), 999, parks[1].id).await.unwrap_err();

        assert!(matches!(err, StorageError::InvalidReference(999)));
        assert_eq!(snapshot(&db).await, before);
    }

    #[tokio::test]
    async fn test_unknown_loser_rolls_back_winner_counters() {
        let (db, parks) = setup(&[1200, 1200]).await;
        let before = snapshot(&db).await;

        let err = record_outcome(db.pool(), parks[0].id, 999).await.unwrap_err();

        assert!(matches!(err, StorageError::InvalidReference(999)));
        assert_eq!(snapshot(&db).await, before);
    }

    #[tokio::test]
    async fn test_failure_on_loser_update_leaves_winner_untouched() {
        let (db, parks) = setup(&[1200, 1200]).await;
        let (winner, loser) = (&parks[0], &parks[1]);
        sqlx::query(&format!(
            "CREATE TRIGGER fail_loser_rating BEFORE UPDATE OF rating ON parks \
             WHEN OLD.id = {} BEGIN SELECT RAISE(ABORT, 'simulated store failure'); END",
            loser.id
        ))
        .execute(db.pool())
        .await
        .unwrap();
        let before = snapshot(&db).await;

        let err = record_outcome(db.pool(), winner.id, loser.id).await.unwrap_err();

        assert!(matches!(err, StorageError::Database(_)));
        assert_eq!(snapshot(&db).await, before);
        let winner_after = ParkRepository::new(db.pool()).find_by_id(winner.id).await.unwrap();
        assert_eq!(winner_after.rating, 1200);
        assert_eq!(winner_after.total_votes, 0);
    }

    #[tokio::test]
    async fn test_counters_stay_consistent_over_many_votes() {
        let (db, parks) = setup(&[1200, 1200, 1200]).await;
        let ids: Vec<i64> = parks.iter().map(|p| p.id).collect();

        for round in 0..30usize {
            let winner = ids[round % 3];
            let loser = ids[(round * 7 + 1) % 3];
            if winner == loser {
                continue;
            }
            record_outcome(db.pool(), winner, loser).await.unwrap();
        }

        let (parks, votes) = snapshot(&db).await;
        let participations: i64 = parks.iter().map(|p| p.total_votes).sum();
        assert_eq!(participations, votes * 2);
        for park in parks {
            assert_eq!(park.wins + park.losses, park.total_votes, "{}", park.name);
        }
    }

    #[tokio::test]
    async fn test_concurrent_votes_do_not_lose_updates() {
        let dir = std::env::temp_dir().join(format!("park-rank-concurrency-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("votes.db");
        let _ = std::fs::remove_file(&path);

        let db = Database::new(&format!("sqlite://{}", path.display())).await.unwrap();
        db.run_migrations().await.unwrap();
        let repo = ParkRepository::new(db.pool());
        let hub = repo.create("Hub", "h").await.unwrap();
        let mut others = Vec::new();
        for i in 0..8 {
            others.push(repo.create(&format!("Spoke {}", i), "s").await.unwrap());
        }

        let mut handles = Vec::new();
        for other in &others {
            let pool = db.pool().clone();
            let (hub_id, other_id) = (hub.id, other.id);
            handles.push(tokio::spawn(async move {
                record_outcome(&pool, hub_id, other_id).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let hub = repo.find_by_id(hub.id).await.unwrap();
        assert_eq!(hub.total_votes, 8);
        assert_eq!(hub.wins, 8);
        assert!(hub.rating > 1200 + 8 * 10);
        assert_eq!(VoteRepository::new(db.pool()).count().await.unwrap(), 8);

        db.close().await;
        let _ = std::fs::remove_dir_all(&dir);
    }
}
