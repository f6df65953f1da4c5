use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::vote::{RecentVote, RecentVotesQuery, VoteRequest, VoteResponse},
};
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    post,
    path = "/api/vote",
    request_body = VoteRequest,
    responses(
        (status = 200, description = "Vote recorded", body = VoteResponse),
        (status = 400, description = "Missing, equal or unknown park ids", body = storage::dto::common::ErrorResponse),
        (status = 500, description = "Vote could not be stored", body = storage::dto::common::ErrorResponse)
    ),
    tag = "votes"
)]
pub async fn record_vote(
    State(db): State<Database>,
    payload: Result<Json<VoteRequest>, JsonRejection>,
) -> Result<Response, WebError> {
    let Json(req) = payload?;
    req.validate()?;

    let (winner_id, loser_id) = req
        .ids()
        .ok_or_else(|| WebError::BadRequest("Winner ID and Loser ID are required".to_string()))?;

    let outcome = services::record_vote(db.pool(), winner_id, loser_id).await?;

    Ok(Json(VoteResponse::from(outcome)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/recent-votes",
    params(RecentVotesQuery),
    responses(
        (status = 200, description = "Most recent votes, newest first", body = Vec<RecentVote>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "votes"
)]
pub async fn recent_votes(
    State(db): State<Database>,
    query: Result<Query<RecentVotesQuery>, QueryRejection>,
) -> Result<Response, WebError> {
    let Query(query) = query?;
    query.validate().map_err(WebError::BadRequest)?;

    let votes = services::recent_votes(db.pool(), &query).await?;

    Ok(Json(votes).into_response())
}
