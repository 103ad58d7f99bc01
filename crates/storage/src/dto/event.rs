use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Response containing basic event information
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EventResponse {
    pub event_id: i64,
    pub name: String,
    pub sport_id: i64,
    pub sport_name: String,
    pub date: DateTime<Utc>,
    pub venue: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Event with its sport and every registration
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventDetailResponse {
    pub event_id: i64,
    pub name: String,
    pub sport: SportInfo,
    pub date: DateTime<Utc>,
    pub venue: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub registrations: Vec<RegistrationDetail>,
    pub total_registrations: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SportInfo {
    pub sport_id: i64,
    pub name: String,
}

/// Registration joined with the registered participant
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RegistrationDetail {
    pub registration_id: i64,
    pub participant_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub registered_at: DateTime<Utc>,
    pub registration_number: Option<String>,
}

/// Request payload for creating a new event
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateEventRequest {
    #[validate(length(
        min = 1,
        max = 200,
        message = "Name must be between 1 and 200 characters"
    ))]
    pub name: String,

    pub sport_id: i64,

    pub date: DateTime<Utc>,

    #[validate(length(
        min = 1,
        max = 200,
        message = "Venue must be between 1 and 200 characters"
    ))]
    pub venue: String,

    pub description: Option<String>,
}

/// Request payload for updating an existing event
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,

    pub sport_id: Option<i64>,

    pub date: Option<DateTime<Utc>>,

    #[validate(length(min = 1, max = 200))]
    pub venue: Option<String>,

    /// A blank description clears the stored one
    pub description: Option<String>,
}

/// Request payload for registering a participant to an event
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterParticipantRequest {
    pub participant_id: i64,

    #[validate(length(max = 50))]
    pub registration_number: Option<String>,
}

/// Which side of the current time to list events from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EventWindow {
    Upcoming,
    Past,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct EventFilter {
    /// `upcoming` or `past`
    pub when: Option<EventWindow>,
    /// Only events of this sport
    pub sport_id: Option<i64>,
}
