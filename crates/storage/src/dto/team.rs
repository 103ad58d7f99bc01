use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeamResponse {
    pub team_id: i64,
    pub name: String,
    pub sport_id: i64,
    pub city: String,
    pub founded_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateTeamRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1 and 100 characters"
    ))]
    pub name: String,

    pub sport_id: i64,

    #[validate(length(
        min = 1,
        max = 100,
        message = "City must be between 1 and 100 characters"
    ))]
    pub city: String,

    pub founded_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateTeamRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    pub sport_id: Option<i64>,

    #[validate(length(min = 1, max = 100))]
    pub city: Option<String>,

    pub founded_on: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct TeamFilter {
    /// Only teams playing this sport
    pub sport_id: Option<i64>,
}

impl From<crate::models::Team> for TeamResponse {
    fn from(team: crate::models::Team) -> Self {
        Self {
            team_id: team.team_id,
            name: team.name,
            sport_id: team.sport_id,
            city: team.city,
            founded_on: team.founded_on,
            created_at: team.created_at,
        }
    }
}
