use axum::{Router, routing::get};
use storage::Database;

use super::handlers::{get_pair, get_park, list_parks};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(list_parks))
        .route("/pair", get(get_pair))
        .route("/random-pair", get(get_pair))
        .route("/:id", get(get_park))
}
