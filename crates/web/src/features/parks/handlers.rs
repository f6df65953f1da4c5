use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
    response::{IntoResponse, Response},
};
use storage::{Database, models::Park};

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/parks",
    responses(
        (status = 200, description = "All parks ordered by rating", body = Vec<Park>)
    ),
    tag = "parks"
)]
pub async fn list_parks(State(db): State<Database>) -> Result<Response, WebError> {
    let parks = services::list_parks(db.pool()).await?;

    Ok(Json(parks).into_response())
}

#[utoipa::path(
    get,
    path = "/api/parks/pair",
    responses(
        (status = 200, description = "Two distinct parks to vote between", body = [Park]),
        (status = 400, description = "Fewer than two parks available", body = storage::dto::common::ErrorResponse)
    ),
    tag = "parks"
)]
pub async fn get_pair(State(db): State<Database>) -> Result<Response, WebError> {
    let pair = services::random_pair(db.pool()).await?;

    Ok(Json(pair).into_response())
}

#[utoipa::path(
    get,
    path = "/api/parks/{id}",
    params(
        ("id" = i64, Path, description = "Park id")
    ),
    responses(
        (status = 200, description = "Park found", body = Park),
        (status = 400, description = "Id is not an integer", body = storage::dto::common::ErrorResponse),
        (status = 404, description = "Park not found")
    ),
    tag = "parks"
)]
pub async fn get_park(
    State(db): State<Database>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Response, WebError> {
    let Path(id) = id?;
    let park = services::get_park(db.pool(), id).await?;

    Ok(Json(park).into_response())
}
