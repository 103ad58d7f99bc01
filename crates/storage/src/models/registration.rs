use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A participant's registration for an event
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Registration {
    pub registration_id: i64,
    pub event_id: i64,
    pub participant_id: i64,
    pub registered_at: DateTime<Utc>,
    pub registration_number: Option<String>,
}
