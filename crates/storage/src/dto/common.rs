use serde::Serialize;
use utoipa::ToSchema;

/// Upper bound for any `limit` query parameter.
pub const MAX_LIMIT: u32 = 100;

pub fn validate_limit(limit: u32) -> Result<(), String> {
    if limit < 1 || limit > MAX_LIMIT {
        return Err(format!("limit must be between 1 and {}", MAX_LIMIT));
    }
    Ok(())
}

/// Body returned for every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
