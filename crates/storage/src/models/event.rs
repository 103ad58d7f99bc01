use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Event {
    pub event_id: i64,
    pub name: String,
    pub sport_id: i64,
    pub date: DateTime<Utc>,
    pub venue: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Whether the event date is strictly before `now`.
    pub fn has_passed(&self, now: DateTime<Utc>) -> bool {
        self.date < now
    }
}
