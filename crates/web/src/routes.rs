use axum::{
    Router,
    http::{Method, header},
};
use storage::Database;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::ApiDoc;
use crate::features::{parks, ranking, votes};

pub fn api_routes() -> Router<Database> {
    Router::new()
        .nest("/parks", parks::routes::routes())
        .nest("/rankings", ranking::routes::routes())
        .merge(votes::routes::routes())
}

/// Full application: JSON API under `/api`, OpenAPI document and Swagger UI.
pub fn router(db: Database) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .nest("/api", api_routes())
        .with_state(db)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
}
