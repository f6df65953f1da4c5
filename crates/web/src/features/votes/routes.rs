use axum::{
    Router,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{record_vote, recent_votes};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/vote", post(record_vote))
        .route("/votes", post(record_vote))
        .route("/recent-votes", get(recent_votes))
}
