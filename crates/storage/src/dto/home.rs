use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::event::EventResponse;

/// Totals and the next few events, shown on the landing page
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HomeSummary {
    pub total_sports: i64,
    pub total_events: i64,
    pub total_participants: i64,
    pub total_teams: i64,
    pub upcoming_events: Vec<EventResponse>,
}
