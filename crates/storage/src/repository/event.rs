use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::dto::event::{
    CreateEventRequest, EventDetailResponse, EventFilter, EventResponse, EventWindow,
    RegistrationDetail, SportInfo, UpdateEventRequest,
};
use crate::error::{Result, StorageError};
use crate::models::{Event, Registration};
use crate::repository::merge_nullable;

const EVENT_SUMMARY_SELECT: &str = r#"
    SELECT e.event_id, e.name, e.sport_id, s.name AS sport_name, e.date, e.venue,
           e.description, e.created_at
    FROM events e
    JOIN sports s ON s.sport_id = e.sport_id
    WHERE 1=1
"#;

/// Repository for Event and registration database operations
pub struct EventRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> EventRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List events matching `filter`, with their sport name.
    ///
    /// Upcoming events come soonest first, everything else latest first.
    pub async fn list(
        &self,
        filter: &EventFilter,
        now: DateTime<Utc>,
        limit: Option<i64>,
    ) -> Result<Vec<EventResponse>> {
        let mut query = QueryBuilder::<Sqlite>::new(EVENT_SUMMARY_SELECT);

        if let Some(sport_id) = filter.sport_id {
            query.push(" AND e.sport_id = ");
            query.push_bind(sport_id);
        }

        match filter.when {
            Some(EventWindow::Upcoming) => {
                query.push(" AND e.date >= ");
                query.push_bind(now);
                query.push(" ORDER BY e.date ASC");
            }
            Some(EventWindow::Past) => {
                query.push(" AND e.date < ");
                query.push_bind(now);
                query.push(" ORDER BY e.date DESC");
            }
            None => {
                query.push(" ORDER BY e.date DESC");
            }
        }

        if let Some(limit) = limit {
            query.push(" LIMIT ");
            query.push_bind(limit);
        }

        let events = query
            .build_query_as::<EventResponse>()
            .fetch_all(self.pool)
            .await?;

        Ok(events)
    }

    /// List every event of a sport, latest first
    pub async fn list_by_sport(&self, sport_id: i64) -> Result<Vec<EventResponse>> {
        let filter = EventFilter {
            when: None,
            sport_id: Some(sport_id),
        };
        self.list(&filter, Utc::now(), None).await
    }

    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM events")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    pub async fn count_by_sport(&self, sport_id: i64) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM events WHERE sport_id = ?")
            .bind(sport_id)
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Get an event by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Event> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            SELECT event_id, name, sport_id, date, venue, description, created_at
            FROM events
            WHERE event_id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(event)
    }

    /// Get an event by ID along with its sport name
    pub async fn find_summary_by_id(&self, id: i64) -> Result<EventResponse> {
        let mut query = QueryBuilder::<Sqlite>::new(EVENT_SUMMARY_SELECT);
        query.push(" AND e.event_id = ");
        query.push_bind(id);

        let event = query
            .build_query_as::<EventResponse>()
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(event)
    }

    /// Get an event with its sport and registrations
    pub async fn find_by_id_detailed(&self, id: i64) -> Result<EventDetailResponse> {
        let event = self.find_summary_by_id(id).await?;
        let registrations = self.list_registrations(event.event_id).await?;

        Ok(EventDetailResponse {
            event_id: event.event_id,
            name: event.name,
            sport: SportInfo {
                sport_id: event.sport_id,
                name: event.sport_name,
            },
            date: event.date,
            venue: event.venue,
            description: event.description,
            created_at: event.created_at,
            total_registrations: registrations.len() as i64,
            registrations,
        })
    }

    /// Create a new event
    pub async fn create(&self, req: &CreateEventRequest) -> Result<Event> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (name, sport_id, date, venue, description)
            VALUES (?, ?, ?, ?, ?)
            RETURNING event_id, name, sport_id, date, venue, description, created_at
            "#,
        )
        .bind(&req.name)
        .bind(req.sport_id)
        .bind(req.date)
        .bind(&req.venue)
        .bind(&req.description)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from(e).on_foreign_key_violation("Sport does not exist"))?;

        Ok(event)
    }

    /// Update an existing event, keeping fields the request leaves out
    pub async fn update(&self, id: i64, existing: &Event, req: &UpdateEventRequest) -> Result<Event> {
        let name = req.name.as_ref().unwrap_or(&existing.name);
        let sport_id = req.sport_id.unwrap_or(existing.sport_id);
        let date = req.date.unwrap_or(existing.date);
        let venue = req.venue.as_ref().unwrap_or(&existing.venue);
        let description = merge_nullable(req.description.as_ref(), existing.description.as_ref());

        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET name = ?,
                sport_id = ?,
                date = ?,
                venue = ?,
                description = ?
            WHERE event_id = ?
            RETURNING event_id, name, sport_id, date, venue, description, created_at
            "#,
        )
        .bind(name)
        .bind(sport_id)
        .bind(date)
        .bind(venue)
        .bind(description)
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| StorageError::from(e).on_foreign_key_violation("Sport does not exist"))?
        .ok_or(StorageError::NotFound)?;

        Ok(event)
    }

    /// Delete an event and its registrations
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM events WHERE event_id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    pub async fn is_registered(&self, event_id: i64, participant_id: i64) -> Result<bool> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM event_participants
            WHERE event_id = ? AND participant_id = ?
            "#,
        )
        .bind(event_id)
        .bind(participant_id)
        .fetch_one(self.pool)
        .await?;

        Ok(count > 0)
    }

    /// Insert the registration row linking a participant to an event
    pub async fn add_participant(
        &self,
        event_id: i64,
        participant_id: i64,
        registration_number: Option<&str>,
    ) -> Result<Registration> {
        let registration = sqlx::query_as::<_, Registration>(
            r#"
            INSERT INTO event_participants (event_id, participant_id, registration_number)
            VALUES (?, ?, ?)
            RETURNING registration_id, event_id, participant_id, registered_at, registration_number
            "#,
        )
        .bind(event_id)
        .bind(participant_id)
        .bind(registration_number)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            StorageError::from(e)
                .on_unique_violation("Participant is already registered for this event")
                .on_foreign_key_violation("Event or participant does not exist")
        })?;

        Ok(registration)
    }

    /// Remove a registration. `NotFound` when the participant was not registered.
    pub async fn remove_participant(&self, event_id: i64, participant_id: i64) -> Result<()> {
        let result = sqlx::query(
            "DELETE FROM event_participants WHERE event_id = ? AND participant_id = ?",
        )
        .bind(event_id)
        .bind(participant_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    /// Registrations of an event, most recent first
    pub async fn list_registrations(&self, event_id: i64) -> Result<Vec<RegistrationDetail>> {
        let registrations = sqlx::query_as::<_, RegistrationDetail>(
            r#"
            SELECT ep.registration_id, p.participant_id, p.first_name, p.last_name, p.email,
                   ep.registered_at, ep.registration_number
            FROM event_participants ep
            JOIN participants p ON p.participant_id = ep.participant_id
            WHERE ep.event_id = ?
            ORDER BY ep.registered_at DESC, ep.registration_id DESC
            "#,
        )
        .bind(event_id)
        .fetch_all(self.pool)
        .await?;

        Ok(registrations)
    }
}
