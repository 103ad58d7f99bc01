use sqlx::SqlitePool;
use storage::{
    dto::home::HomeSummary,
    repository::{
        event::EventRepository, participant::ParticipantRepository, sport::SportRepository,
        team::TeamRepository,
    },
};

use crate::error::ServiceResult;

use crate::features::events::services::list_upcoming_events;

const UPCOMING_EVENTS_SHOWN: i64 = 5;

/// Totals per entity and the next few events
pub async fn get_summary(pool: &SqlitePool) -> ServiceResult<HomeSummary> {
    Ok(HomeSummary {
        total_sports: SportRepository::new(pool).count().await?,
        total_events: EventRepository::new(pool).count().await?,
        total_participants: ParticipantRepository::new(pool).count().await?,
        total_teams: TeamRepository::new(pool).count().await?,
        upcoming_events: list_upcoming_events(pool, UPCOMING_EVENTS_SHOWN).await?,
    })
}
