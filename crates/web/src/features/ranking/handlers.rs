use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::park::{RankingEntry, RankingQuery},
};

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/rankings",
    params(RankingQuery),
    responses(
        (status = 200, description = "Rankings retrieved successfully", body = Vec<RankingEntry>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "rankings"
)]
pub async fn get_rankings(
    State(db): State<Database>,
    query: Result<Query<RankingQuery>, QueryRejection>,
) -> Result<Response, WebError> {
    let Query(query) = query?;
    query.validate().map_err(WebError::BadRequest)?;

    let entries = services::get_rankings(db.pool(), &query).await?;

    Ok(Json(entries).into_response())
}
