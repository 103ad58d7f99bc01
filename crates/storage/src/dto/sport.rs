use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::event::EventResponse;
use super::team::TeamResponse;

/// Response containing basic sport information
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SportResponse {
    pub sport_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Sport with the events and teams organized under it
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SportDetailResponse {
    pub sport_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub events: Vec<EventResponse>,
    pub teams: Vec<TeamResponse>,
}

/// Request payload for creating a new sport
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateSportRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1 and 100 characters"
    ))]
    pub name: String,

    pub description: Option<String>,
}

/// Request payload for updating an existing sport
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateSportRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    /// A blank description clears the stored one
    pub description: Option<String>,
}

impl From<crate::models::Sport> for SportResponse {
    fn from(sport: crate::models::Sport) -> Self {
        Self {
            sport_id: sport.sport_id,
            name: sport.name,
            description: sport.description,
            created_at: sport.created_at,
        }
    }
}
