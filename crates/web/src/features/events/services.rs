use chrono::Utc;
use sqlx::SqlitePool;
use storage::{
    dto::event::{
        CreateEventRequest, EventDetailResponse, EventFilter, EventResponse, EventWindow,
        RegisterParticipantRequest, RegistrationDetail, UpdateEventRequest,
    },
    error::StorageError,
    models::{Event, Registration},
    repository::{
        event::EventRepository, participant::ParticipantRepository, sport::SportRepository,
    },
};

use crate::error::{ServiceError, ServiceResult};
use crate::features::rules::{clearable_text, optional_text, required_text};

/// List events, optionally narrowed to a sport or to one side of the current time.
///
/// An unknown `sport_id` is reported as not found whatever the window.
pub async fn list_events(pool: &SqlitePool, filter: &EventFilter) -> ServiceResult<Vec<EventResponse>> {
    if let Some(sport_id) = filter.sport_id {
        SportRepository::new(pool).find_by_id(sport_id).await?;
    }

    let repo = EventRepository::new(pool);
    Ok(repo.list(filter, Utc::now(), None).await?)
}

/// The next `limit` events, soonest first
pub async fn list_upcoming_events(pool: &SqlitePool, limit: i64) -> ServiceResult<Vec<EventResponse>> {
    let repo = EventRepository::new(pool);
    let filter = EventFilter {
        when: Some(EventWindow::Upcoming),
        sport_id: None,
    };
    Ok(repo.list(&filter, Utc::now(), Some(limit)).await?)
}

/// Get event by ID, with its sport name
pub async fn get_event(pool: &SqlitePool, id: i64) -> ServiceResult<EventResponse> {
    let repo = EventRepository::new(pool);
    Ok(repo.find_summary_by_id(id).await?)
}

/// Get event with its sport and registrations
pub async fn get_event_detailed(pool: &SqlitePool, id: i64) -> ServiceResult<EventDetailResponse> {
    let repo = EventRepository::new(pool);
    Ok(repo.find_by_id_detailed(id).await?)
}

async fn ensure_sport_exists(pool: &SqlitePool, sport_id: i64) -> ServiceResult<()> {
    if SportRepository::new(pool).find_optional(sport_id).await?.is_none() {
        return Err(ServiceError::validation(format!(
            "Sport with ID {} does not exist",
            sport_id
        )));
    }
    Ok(())
}

/// Create an event for an existing sport, scheduled no earlier than now
pub async fn create_event(pool: &SqlitePool, request: &CreateEventRequest) -> ServiceResult<Event> {
    let name = required_text(&request.name, "Event name is required")?;
    let venue = required_text(&request.venue, "Event venue is required")?;

    ensure_sport_exists(pool, request.sport_id).await?;

    if request.date < Utc::now() {
        return Err(ServiceError::validation(
            "Events cannot be scheduled in the past",
        ));
    }

    let cleaned = CreateEventRequest {
        name,
        sport_id: request.sport_id,
        date: request.date,
        venue,
        description: optional_text(request.description.as_deref()),
    };

    let repo = EventRepository::new(pool);
    Ok(repo.create(&cleaned).await?)
}

/// Update an event. Only the supplied fields are checked and changed.
pub async fn update_event(
    pool: &SqlitePool,
    id: i64,
    request: &UpdateEventRequest,
) -> ServiceResult<Event> {
    let repo = EventRepository::new(pool);
    let existing = repo.find_by_id(id).await?;

    let name = request
        .name
        .as_deref()
        .map(|v| required_text(v, "Event name cannot be empty"))
        .transpose()?;
    let venue = request
        .venue
        .as_deref()
        .map(|v| required_text(v, "Event venue cannot be empty"))
        .transpose()?;

    if let Some(sport_id) = request.sport_id {
        ensure_sport_exists(pool, sport_id).await?;
    }

    if let Some(date) = request.date {
        if date < Utc::now() {
            return Err(ServiceError::validation(
                "An event cannot be moved into the past",
            ));
        }
    }

    let cleaned = UpdateEventRequest {
        name,
        sport_id: request.sport_id,
        date: request.date,
        venue,
        description: clearable_text(request.description.as_deref()),
    };

    Ok(repo.update(id, &existing, &cleaned).await?)
}

/// Delete an event along with its registrations
pub async fn delete_event(pool: &SqlitePool, id: i64) -> ServiceResult<()> {
    let repo = EventRepository::new(pool);
    let event = repo.find_by_id(id).await?;
    Ok(repo.delete(event.event_id).await?)
}

/// Registrations of an event
pub async fn list_registrations(
    pool: &SqlitePool,
    event_id: i64,
) -> ServiceResult<Vec<RegistrationDetail>> {
    let repo = EventRepository::new(pool);
    let event = repo.find_by_id(event_id).await?;
    Ok(repo.list_registrations(event.event_id).await?)
}

/// Register a participant to an upcoming event, at most once
pub async fn register_participant(
    pool: &SqlitePool,
    event_id: i64,
    request: &RegisterParticipantRequest,
) -> ServiceResult<Registration> {
    let repo = EventRepository::new(pool);
    let event = repo.find_by_id(event_id).await?;

    let participant = ParticipantRepository::new(pool)
        .find_by_id(request.participant_id)
        .await
        .map_err(|e| match e {
            StorageError::NotFound => ServiceError::validation(format!(
                "Participant with ID {} does not exist",
                request.participant_id
            )),
            other => ServiceError::from(other),
        })?;

    if repo
        .is_registered(event.event_id, participant.participant_id)
        .await?
    {
        return Err(ServiceError::validation(format!(
            "Participant '{}' is already registered for this event",
            participant.full_name()
        )));
    }

    if event.has_passed(Utc::now()) {
        return Err(ServiceError::validation(
            "Cannot register participants to past events",
        ));
    }

    let registration_number = optional_text(request.registration_number.as_deref());
    let registration = repo
        .add_participant(
            event.event_id,
            participant.participant_id,
            registration_number.as_deref(),
        )
        .await?;

    tracing::info!(
        event_id = event.event_id,
        participant_id = participant.participant_id,
        "Registered participant"
    );

    Ok(registration)
}

/// Remove a participant's registration from an event
pub async fn unregister_participant(
    pool: &SqlitePool,
    event_id: i64,
    participant_id: i64,
) -> ServiceResult<()> {
    let repo = EventRepository::new(pool);
    let event = repo.find_by_id(event_id).await?;
    let participant = ParticipantRepository::new(pool)
        .find_by_id(participant_id)
        .await?;

    repo.remove_participant(event.event_id, participant.participant_id)
        .await?;

    tracing::info!(event_id, participant_id, "Unregistered participant");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration};
    use storage::{
        Database,
        dto::{participant::CreateParticipantRequest, sport::CreateSportRequest},
    };

    use crate::features::{participants, sports};

    async fn seed_sport(db: &Database, name: &str) -> i64 {
        sports::services::create_sport(
            db.pool(),
            &CreateSportRequest {
                name: name.to_string(),
                description: None,
            },
        )
        .await
        .unwrap()
        .sport_id
    }

    async fn seed_participant(db: &Database, email: &str) -> i64 {
        participants::services::create_participant(
            db.pool(),
            &CreateParticipantRequest {
                first_name: "Ana".to_string(),
                last_name: "Lee".to_string(),
                email: email.to_string(),
                phone: None,
            },
        )
        .await
        .unwrap()
        .participant_id
    }

    fn event_request(name: &str, sport_id: i64, date: DateTime<Utc>) -> CreateEventRequest {
        CreateEventRequest {
            name: name.to_string(),
            sport_id,
            date,
            venue: "Stadium".to_string(),
            description: None,
        }
    }

    fn registration(participant_id: i64) -> RegisterParticipantRequest {
        RegisterParticipantRequest {
            participant_id,
            registration_number: None,
        }
    }

    #[tokio::test]
    async fn test_create_event_in_the_past_fails() {
        let db = Database::in_memory().await.unwrap();
        let sport_id = seed_sport(&db, "Soccer").await;

        let err = create_event(
            db.pool(),
            &event_request("Finals", sport_id, Utc::now() - Duration::hours(1)),
        )
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "Events cannot be scheduled in the past");
    }

    #[tokio::test]
    async fn test_create_event_requires_known_sport() {
        let db = Database::in_memory().await.unwrap();

        let err = create_event(
            db.pool(),
            &event_request("Finals", 404, Utc::now() + Duration::days(1)),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_event_requires_name_and_venue() {
        let db = Database::in_memory().await.unwrap();
        let sport_id = seed_sport(&db, "Soccer").await;
        let tomorrow = Utc::now() + Duration::days(1);

        let err = create_event(db.pool(), &event_request("  ", sport_id, tomorrow))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Event name is required");

        let err = create_event(
            db.pool(),
            &CreateEventRequest {
                venue: " ".to_string(),
                ..event_request("Finals", sport_id, tomorrow)
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "Event venue is required");
    }

    #[tokio::test]
    async fn test_update_event_checks_supplied_fields_only() {
        let db = Database::in_memory().await.unwrap();
        let sport_id = seed_sport(&db, "Soccer").await;
        let event = create_event(
            db.pool(),
            &event_request("Finals", sport_id, Utc::now() + Duration::days(1)),
        )
        .await
        .unwrap();

        let updated = update_event(
            db.pool(),
            event.event_id,
            &UpdateEventRequest {
                venue: Some(" Arena ".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.venue, "Arena");
        assert_eq!(updated.name, "Finals");

        let err = update_event(
            db.pool(),
            event.event_id,
            &UpdateEventRequest {
                date: Some(Utc::now() - Duration::days(1)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let err = update_event(
            db.pool(),
            event.event_id,
            &UpdateEventRequest {
                sport_id: Some(999),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn test_register_then_register_again_fails() {
        let db = Database::in_memory().await.unwrap();
        let sport_id = seed_sport(&db, "Soccer").await;
        let event = create_event(
            db.pool(),
            &event_request("Finals", sport_id, Utc::now() + Duration::days(1)),
        )
        .await
        .unwrap();
        let participant_id = seed_participant(&db, "ana@x.com").await;

        register_participant(db.pool(), event.event_id, &registration(participant_id))
            .await
            .unwrap();

        let err = register_participant(db.pool(), event.event_id, &registration(participant_id))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("already registered"));
        assert_eq!(
            list_registrations(db.pool(), event.event_id)
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn test_register_to_past_event_fails() {
        let db = Database::in_memory().await.unwrap();
        let sport_id = seed_sport(&db, "Soccer").await;
        // Past events can only exist through the storage layer.
        let event = EventRepository::new(db.pool())
            .create(&event_request(
                "Old final",
                sport_id,
                Utc::now() - Duration::days(2),
            ))
            .await
            .unwrap();
        let participant_id = seed_participant(&db, "ana@x.com").await;

        let err = register_participant(db.pool(), event.event_id, &registration(participant_id))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Cannot register participants to past events");
    }

    #[tokio::test]
    async fn test_register_unknown_participant_fails() {
        let db = Database::in_memory().await.unwrap();
        let sport_id = seed_sport(&db, "Soccer").await;
        let event = create_event(
            db.pool(),
            &event_request("Finals", sport_id, Utc::now() + Duration::days(1)),
        )
        .await
        .unwrap();

        let err = register_participant(db.pool(), event.event_id, &registration(12))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn test_unregister_participant() {
        let db = Database::in_memory().await.unwrap();
        let sport_id = seed_sport(&db, "Soccer").await;
        let event = create_event(
            db.pool(),
            &event_request("Finals", sport_id, Utc::now() + Duration::days(1)),
        )
        .await
        .unwrap();
        let participant_id = seed_participant(&db, "ana@x.com").await;
        register_participant(
            db.pool(),
            event.event_id,
            &RegisterParticipantRequest {
                participant_id,
                registration_number: Some(" 17 ".to_string()),
            },
        )
        .await
        .unwrap();

        let detail = get_event_detailed(db.pool(), event.event_id).await.unwrap();
        assert_eq!(detail.registrations[0].registration_number.as_deref(), Some("17"));

        unregister_participant(db.pool(), event.event_id, participant_id)
            .await
            .unwrap();

        let err = unregister_participant(db.pool(), event.event_id, participant_id)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Storage(StorageError::NotFound)));
    }

    #[tokio::test]
    async fn test_list_events_by_window() {
        let db = Database::in_memory().await.unwrap();
        let sport_id = seed_sport(&db, "Soccer").await;
        let repo = EventRepository::new(db.pool());
        repo.create(&event_request("Old", sport_id, Utc::now() - Duration::days(3)))
            .await
            .unwrap();
        for day in 1..=6 {
            repo.create(&event_request(
                &format!("Day {}", day),
                sport_id,
                Utc::now() + Duration::days(day),
            ))
            .await
            .unwrap();
        }

        let upcoming = list_upcoming_events(db.pool(), 5).await.unwrap();
        assert_eq!(upcoming.len(), 5);
        assert_eq!(upcoming[0].name, "Day 1");

        let past = list_events(
            db.pool(),
            &EventFilter {
                when: Some(EventWindow::Past),
                sport_id: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(past.len(), 1);
        assert_eq!(past[0].name, "Old");

        let by_sport = list_events(
            db.pool(),
            &EventFilter {
                when: None,
                sport_id: Some(sport_id),
            },
        )
        .await
        .unwrap();
        assert_eq!(by_sport.len(), 7);
    }

    #[tokio::test]
    async fn test_list_events_unknown_sport_is_not_found_in_every_window() {
        let db = Database::in_memory().await.unwrap();
        seed_sport(&db, "Soccer").await;

        for when in [None, Some(EventWindow::Upcoming), Some(EventWindow::Past)] {
            let err = list_events(
                db.pool(),
                &EventFilter {
                    when,
                    sport_id: Some(999),
                },
            )
            .await
            .unwrap_err();
            assert!(matches!(err, ServiceError::Storage(StorageError::NotFound)));
        }
    }

    #[tokio::test]
    async fn test_soccer_finals_scenario() {
        let db = Database::in_memory().await.unwrap();
        let soccer = seed_sport(&db, "Soccer").await;
        let finals = create_event(
            db.pool(),
            &event_request("Finals", soccer, Utc::now() + Duration::days(1)),
        )
        .await
        .unwrap();
        let ana = seed_participant(&db, "ana@x.com").await;

        assert!(
            register_participant(db.pool(), finals.event_id, &registration(ana))
                .await
                .is_ok()
        );

        let err = register_participant(db.pool(), finals.event_id, &registration(ana))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Participant 'Ana Lee' is already registered for this event"
        );
    }
}
