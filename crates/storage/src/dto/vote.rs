use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize, de};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::common::validate_limit;

/// Request payload for recording a vote
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    #[validate(
        required(message = "winnerId is required"),
        range(min = 1, message = "winnerId must be a positive park id")
    )]
    #[serde(default, deserialize_with = "deserialize_park_id")]
    pub winner_id: Option<i64>,

    #[validate(
        required(message = "loserId is required"),
        range(min = 1, message = "loserId must be a positive park id")
    )]
    #[serde(default, deserialize_with = "deserialize_park_id")]
    pub loser_id: Option<i64>,
}

/// Accepts an integer id or a string holding one (`"7"`).
fn deserialize_park_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    match Option::<RawId>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawId::Number(id)) => Ok(Some(id)),
        Some(RawId::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid park id: {:?}", text))),
    }
}

impl VoteRequest {
    /// Both ids, once validation has confirmed they are present.
    pub fn ids(&self) -> Option<(i64, i64)> {
        Some((self.winner_id?, self.loser_id?))
    }
}

/// New ratings produced by a single recorded vote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RatingOutcome {
    pub vote_id: i64,
    pub winner_id: i64,
    pub loser_id: i64,
    pub new_winner_rating: i64,
    pub new_loser_rating: i64,
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VoteResponse {
    pub success: bool,
    pub result: RatingOutcome,
}

impl From<RatingOutcome> for VoteResponse {
    fn from(result: RatingOutcome) -> Self {
        Self {
            success: true,
            result,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecentVotesQuery {
    /// Number of votes to return (1-100, default 10)
    #[serde(default = "default_recent_limit")]
    pub limit: u32,
}

fn default_recent_limit() -> u32 {
    10
}

impl Default for RecentVotesQuery {
    fn default() -> Self {
        Self {
            limit: default_recent_limit(),
        }
    }
}

impl RecentVotesQuery {
    pub fn validate(&self) -> Result<(), String> {
        validate_limit(self.limit)
    }
}

/// A vote enriched with both parks' display data
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct RecentVote {
    pub id: i64,
    pub winner_id: i64,
    pub loser_id: i64,
    pub winner_name: String,
    pub winner_image_url: String,
    pub loser_name: String,
    pub loser_image_url: String,
    pub timestamp: NaiveDateTime,
}
