use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Team {
    pub team_id: i64,
    pub name: String,
    pub sport_id: i64,
    pub city: String,
    pub founded_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}
