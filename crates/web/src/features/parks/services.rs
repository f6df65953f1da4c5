use sqlx::SqlitePool;
use storage::{
    error::Result, models::Park, repository::park::ParkRepository, services::pairing,
};

/// List all parks, highest rated first
pub async fn list_parks(pool: &SqlitePool) -> Result<Vec<Park>> {
    let repo = ParkRepository::new(pool);
    repo.list_ranked().await
}

/// Get park by id
pub async fn get_park(pool: &SqlitePool, id: i64) -> Result<Park> {
    let repo = ParkRepository::new(pool);
    repo.find_by_id(id).await
}

/// Pick two distinct parks at random
pub async fn random_pair(pool: &SqlitePool) -> Result<[Park; 2]> {
    let (first, second) = pairing::select_pair(pool).await?;
    Ok([first, second])
}
