use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::catalog::ParkCatalog;
use crate::error::{Result, StorageError};
use crate::models::Park;

/// Which counter a park's participation in a vote bumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Winner,
    Loser,
}

/// Outcome of loading a catalog into the `parks` table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: u64,
    pub skipped: u64,
}

pub struct ParkRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ParkRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// All parks, highest rating first. Equal ratings keep id order.
    pub async fn list_ranked(&self) -> Result<Vec<Park>> {
        let parks = sqlx::query_as::<_, Park>(
            r#"
            SELECT id, name, image_url, rating, total_votes, wins, losses
            FROM parks
            ORDER BY rating DESC, id ASC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(parks)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Park> {
        let park = sqlx::query_as::<_, Park>(
            r#"
            SELECT id, name, image_url, rating, total_votes, wins, losses
            FROM parks
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(park)
    }

    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM parks")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Insert a single park with the default rating and zeroed counters.
    pub async fn create(&self, name: &str, image_url: &str) -> Result<Park> {
        let park = sqlx::query_as::<_, Park>(
            r#"
            INSERT INTO parks (name, image_url)
            VALUES (?, ?)
            RETURNING id, name, image_url, rating, total_votes, wins, losses
            "#,
        )
        .bind(name)
        .bind(image_url)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from(e).classify())?;

        Ok(park)
    }

    /// Insert every catalog park whose name is not already present.
    ///
    /// Existing rows are never touched, so ratings and counters survive
    /// repeated seeding. Names match ignoring case. Entries with blank or
    /// duplicate names count as skipped.
    pub async fn seed_catalog(&self, catalog: &ParkCatalog) -> Result<SeedReport> {
        let entries = catalog.normalized();
        let dropped = catalog.len() - entries.len();
        if dropped > 0 {
            tracing::debug!(
                "{} catalog entries have blank or duplicate names, skipping",
                dropped
            );
        }

        let mut tx = self.pool.begin().await?;
        let mut report = SeedReport {
            inserted: 0,
            skipped: dropped as u64,
        };

        for (name, image_url) in entries {
            let inserted = sqlx::query("INSERT OR IGNORE INTO parks (name, image_url) VALUES (?, ?)")
                .bind(name.as_str())
                .bind(image_url)
                .execute(&mut *tx)
                .await?
                .rows_affected();

            if inserted == 0 {
                tracing::debug!("Park '{}' already present, skipping", name);
                report.skipped += 1;
            } else {
                report.inserted += inserted;
            }
        }

        tx.commit().await?;
        Ok(report)
    }

    /// Bump `total_votes` and the win or loss counter inside `tx`.
    ///
    /// Returns `false` when no park has this id.
    pub async fn record_participation(
        tx: &mut Transaction<'_, Sqlite>,
        id: i64,
        side: Side,
    ) -> Result<bool> {
        let sql = match side {
            Side::Winner => {
                "UPDATE parks SET total_votes = total_votes + 1, wins = wins + 1 WHERE id = ?"
            }
            Side::Loser => {
                "UPDATE parks SET total_votes = total_votes + 1, losses = losses + 1 WHERE id = ?"
            }
        };

        let affected = sqlx::query(sql)
            .bind(id)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(affected == 1)
    }

    pub async fn rating_in_tx(tx: &mut Transaction<'_, Sqlite>, id: i64) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT rating FROM parks WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?
            .ok_or(StorageError::InvalidReference(id))
    }

    pub async fn set_rating_in_tx(
        tx: &mut Transaction<'_, Sqlite>,
        id: i64,
        rating: i64,
    ) -> Result<()> {
        let affected = sqlx::query("UPDATE parks SET rating = ? WHERE id = ?")
            .bind(rating)
            .bind(id)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        if affected == 0 {
            return Err(StorageError::InvalidReference(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;
    use crate::models::INITIAL_RATING;

    #[tokio::test]
    async fn test_create_uses_defaults() {
        let db = Database::in_memory().await.unwrap();
        let repo = ParkRepository::new(db.pool());

        let park = repo.create("Zion", "https://img/zion.jpg").await.unwrap();

        assert_eq!(park.rating, INITIAL_RATING);
        assert_eq!((park.total_votes, park.wins, park.losses), (0, 0, 0));
        assert_eq!(repo.find_by_id(park.id).await.unwrap(), park);
    }

    #[tokio::test]
    async fn test_duplicate_name_is_a_constraint_violation() {
        let db = Database::in_memory().await.unwrap();
        let repo = ParkRepository::new(db.pool());

        repo.create("Zion", "a").await.unwrap();
        let err = repo.create("Zion", "b").await.unwrap_err();

        assert!(matches!(err, StorageError::ConstraintViolation(_)));
    }

    #[tokio::test]
    async fn test_find_missing_park() {
        let db = Database::in_memory().await.unwrap();
        let repo = ParkRepository::new(db.pool());

        assert!(matches!(
            repo.find_by_id(99).await,
            Err(StorageError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_list_ranked_orders_by_rating_then_id() {
        let db = Database::in_memory().await.unwrap();
        let repo = ParkRepository::new(db.pool());

        let a = repo.create("A", "a").await.unwrap();
        let b = repo.create("B", "b").await.unwrap();
        let c = repo.create("C", "c").await.unwrap();
        for (id, rating) in [(a.id, 1300), (b.id, 1500), (c.id, 1300)] {
            sqlx::query("UPDATE parks SET rating = ? WHERE id = ?")
                .bind(rating)
                .bind(id)
                .execute(db.pool())
                .await
                .unwrap();
        }

        let first = repo.list_ranked().await.unwrap();
        let ids: Vec<i64> = first.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![b.id, a.id, c.id]);

        let second = repo.list_ranked().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_seeding_twice_is_idempotent() {
        let db = Database::in_memory().await.unwrap();
        let repo = ParkRepository::new(db.pool());
        let catalog = ParkCatalog::from_json_str(
            r#"{"Arches": "https://img/arches.jpg", "Zion": "https://img/zion.jpg"}"#,
        )
        .unwrap();

        let first = repo.seed_catalog(&catalog).await.unwrap();
        assert_eq!(first, SeedReport { inserted: 2, skipped: 0 });

        let arches = repo.list_ranked().await.unwrap()[0].clone();
        sqlx::query("UPDATE parks SET rating = 1333 WHERE id = ?")
            .bind(arches.id)
            .execute(db.pool())
            .await
            .unwrap();

        let second = repo.seed_catalog(&catalog).await.unwrap();
        assert_eq!(second, SeedReport { inserted: 0, skipped: 2 });
        assert_eq!(repo.count().await.unwrap(), 2);
        assert_eq!(repo.find_by_id(arches.id).await.unwrap().rating, 1333);
    }

    #[tokio::test]
    async fn test_names_match_ignoring_case_across_seeds() {
        let db = Database::in_memory().await.unwrap();
        let repo = ParkRepository::new(db.pool());

        let first = ParkCatalog::from_json_str(r#"{"Arches": "a"}"#).unwrap();
        repo.seed_catalog(&first).await.unwrap();
        let second = ParkCatalog::from_json_str(r#"{"ARCHES": "b"}"#).unwrap();
        let report = repo.seed_catalog(&second).await.unwrap();

        assert_eq!(report, SeedReport { inserted: 0, skipped: 1 });
        assert_eq!(repo.count().await.unwrap(), 1);
        assert!(matches!(
            repo.create("arches", "c").await,
            Err(StorageError::ConstraintViolation(_))
        ));
    }

    #[tokio::test]
    async fn test_blank_and_duplicate_entries_count_as_skipped() {
        let db = Database::in_memory().await.unwrap();
        let repo = ParkRepository::new(db.pool());
        let catalog = ParkCatalog::from_entries([
            ("Zion".to_string(), "a".to_string()),
            ("  ".to_string(), "b".to_string()),
            ("zion".to_string(), "c".to_string()),
            ("Arches".to_string(), "d".to_string()),
        ]);

        let report = repo.seed_catalog(&catalog).await.unwrap();

        assert_eq!(report, SeedReport { inserted: 2, skipped: 2 });
        assert_eq!(report.inserted + report.skipped, catalog.len() as u64);
    }

    #[tokio::test]
    async fn test_seeding_does_not_overwrite_image_url() {
        let db = Database::in_memory().await.unwrap();
        let repo = ParkRepository::new(db.pool());
        let park = repo.create("Zion", "original").await.unwrap();

        let catalog = ParkCatalog::from_entries([("Zion".to_string(), "changed".to_string())]);
        repo.seed_catalog(&catalog).await.unwrap();

        assert_eq!(repo.find_by_id(park.id).await.unwrap().image_url, "original");
    }
}
