use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Response containing basic participant information
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ParticipantResponse {
    pub participant_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Participant with the events they are registered for
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ParticipantDetailResponse {
    pub participant_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub events: Vec<ParticipantEventSummary>,
    pub total_events: i64,
}

/// One event a participant is registered for
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ParticipantEventSummary {
    pub event_id: i64,
    pub event_name: String,
    pub sport_name: String,
    pub date: DateTime<Utc>,
    pub venue: String,
    pub registered_at: DateTime<Utc>,
    pub registration_number: Option<String>,
}

/// Request payload for creating a new participant
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateParticipantRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "First name must be between 1 and 100 characters"
    ))]
    pub first_name: String,

    #[validate(length(
        min = 1,
        max = 100,
        message = "Last name must be between 1 and 100 characters"
    ))]
    pub last_name: String,

    #[validate(email(message = "Email must be a valid address"))]
    #[validate(length(max = 254))]
    pub email: String,

    #[validate(length(max = 20))]
    pub phone: Option<String>,
}

/// Request payload for updating an existing participant
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateParticipantRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,

    #[validate(email)]
    #[validate(length(max = 254))]
    pub email: Option<String>,

    /// A blank phone clears the stored one
    #[validate(length(max = 20))]
    pub phone: Option<String>,
}

impl From<crate::models::Participant> for ParticipantResponse {
    fn from(participant: crate::models::Participant) -> Self {
        Self {
            full_name: participant.full_name(),
            participant_id: participant.participant_id,
            first_name: participant.first_name,
            last_name: participant.last_name,
            email: participant.email,
            phone: participant.phone,
            created_at: participant.created_at,
        }
    }
}
