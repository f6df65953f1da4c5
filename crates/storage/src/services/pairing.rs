use rand::Rng;
use rand::seq::index;
use sqlx::SqlitePool;

use crate::error::{Result, StorageError};
use crate::models::Park;
use crate::repository::park::ParkRepository;

/// Two distinct indices drawn uniformly without replacement from `0..len`.
///
/// Returns `None` when fewer than two items exist.
pub fn pick_two_distinct<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Option<(usize, usize)> {
    if len < 2 {
        return None;
    }

    let picked = index::sample(rng, len, 2);
    Some((picked.index(0), picked.index(1)))
}

/// Choose the next two parks to put in front of a voter.
///
/// Reads the catalog without locking; a pair that is slightly stale by the
/// time the vote arrives is fine.
pub async fn select_pair(pool: &SqlitePool) -> Result<(Park, Park)> {
    let mut parks = ParkRepository::new(pool).list_ranked().await?;

    let (first, second) =
        pick_two_distinct(parks.len(), &mut rand::rng()).ok_or(StorageError::NotEnoughItems)?;

    // Take the higher index first so the lower one stays valid.
    let (hi, lo) = if first > second { (first, second) } else { (second, first) };
    let park_hi = parks.swap_remove(hi);
    let park_lo = parks.swap_remove(lo);

    if first > second {
        Ok((park_hi, park_lo))
    } else {
        Ok((park_lo, park_hi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_fewer_than_two_items() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(pick_two_distinct(0, &mut rng), None);
        assert_eq!(pick_two_distinct(1, &mut rng), None);
    }

    #[test]
    fn test_indices_are_distinct_and_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for len in 2..40 {
            for _ in 0..50 {
                let (a, b) = pick_two_distinct(len, &mut rng).unwrap();
                assert_ne!(a, b);
                assert!(a < len && b < len);
            }
        }
    }

    #[test]
    fn test_every_item_gets_picked() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = [0u32; 6];
        for _ in 0..3000 {
            let (a, b) = pick_two_distinct(seen.len(), &mut rng).unwrap();
            seen[a] += 1;
            seen[b] += 1;
        }
        // 1000 expected per slot
        assert!(seen.iter().all(|&n| (800..1200).contains(&n)), "{seen:?}");
    }

    #[tokio::test]
    async fn test_select_pair_needs_two_parks() {
        let db = Database::in_memory().await.unwrap();
        let repo = ParkRepository::new(db.pool());

        assert!(matches!(
            select_pair(db.pool()).await,
            Err(StorageError::NotEnoughItems)
        ));

        repo.create("Lonely", "l").await.unwrap();
        assert!(matches!(
            select_pair(db.pool()).await,
            Err(StorageError::NotEnoughItems)
        ));
    }

    #[tokio::test]
    async fn test_select_pair_returns_distinct_parks() {
        let db = Database::in_memory().await.unwrap();
        let repo = ParkRepository::new(db.pool());
        for name in ["Acadia", "Badlands", "Congaree"] {
            repo.create(name, "img").await.unwrap();
        }

        for _ in 0..25 {
            let (a, b) = select_pair(db.pool()).await.unwrap();
            assert_ne!(a.id, b.id);
        }
    }
}
