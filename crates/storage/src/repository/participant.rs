use sqlx::SqlitePool;

use crate::dto::participant::{
    CreateParticipantRequest, ParticipantDetailResponse, ParticipantEventSummary,
    UpdateParticipantRequest,
};
use crate::error::{Result, StorageError};
use crate::models::Participant;
use crate::repository::merge_nullable;

pub struct ParticipantRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ParticipantRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all participants
    pub async fn list(&self) -> Result<Vec<Participant>> {
        let participants = sqlx::query_as::<_, Participant>(
            r#"
            SELECT participant_id, first_name, last_name, email, phone, created_at
            FROM participants
            ORDER BY last_name, first_name
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(participants)
    }

    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM participants")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Find participant by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Participant> {
        let participant = sqlx::query_as::<_, Participant>(
            r#"
            SELECT participant_id, first_name, last_name, email, phone, created_at
            FROM participants
            WHERE participant_id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(participant)
    }

    /// Find participant by email. Emails are stored lowercased.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Participant>> {
        let participant = sqlx::query_as::<_, Participant>(
            r#"
            SELECT participant_id, first_name, last_name, email, phone, created_at
            FROM participants
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(participant)
    }

    /// Get participant info with the events they are registered for
    pub async fn find_by_id_detailed(&self, id: i64) -> Result<ParticipantDetailResponse> {
        let participant = self.find_by_id(id).await?;

        let events = sqlx::query_as::<_, ParticipantEventSummary>(
            r#"
            SELECT e.event_id, e.name AS event_name, s.name AS sport_name, e.date, e.venue,
                   ep.registered_at, ep.registration_number
            FROM event_participants ep
            JOIN events e ON e.event_id = ep.event_id
            JOIN sports s ON s.sport_id = e.sport_id
            WHERE ep.participant_id = ?
            ORDER BY e.date DESC
            "#,
        )
        .bind(participant.participant_id)
        .fetch_all(self.pool)
        .await?;

        Ok(ParticipantDetailResponse {
            full_name: participant.full_name(),
            participant_id: participant.participant_id,
            first_name: participant.first_name,
            last_name: participant.last_name,
            email: participant.email,
            phone: participant.phone,
            created_at: participant.created_at,
            total_events: events.len() as i64,
            events,
        })
    }

    /// Create a new participant
    pub async fn create(&self, req: &CreateParticipantRequest) -> Result<Participant> {
        let participant = sqlx::query_as::<_, Participant>(
            r#"
            INSERT INTO participants (first_name, last_name, email, phone)
            VALUES (?, ?, ?, ?)
            RETURNING participant_id, first_name, last_name, email, phone, created_at
            "#,
        )
        .bind(&req.first_name)
        .bind(&req.last_name)
        .bind(&req.email)
        .bind(&req.phone)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from(e).on_unique_violation("Email already exists"))?;

        Ok(participant)
    }

    /// Update an existing participant
    pub async fn update(
        &self,
        id: i64,
        existing: &Participant,
        req: &UpdateParticipantRequest,
    ) -> Result<Participant> {
        let first_name = req.first_name.as_ref().unwrap_or(&existing.first_name);
        let last_name = req.last_name.as_ref().unwrap_or(&existing.last_name);
        let email = req.email.as_ref().unwrap_or(&existing.email);
        let phone = merge_nullable(req.phone.as_ref(), existing.phone.as_ref());

        let participant = sqlx::query_as::<_, Participant>(
            r#"
            UPDATE participants
            SET first_name = ?,
                last_name = ?,
                email = ?,
                phone = ?
            WHERE participant_id = ?
            RETURNING participant_id, first_name, last_name, email, phone, created_at
            "#,
        )
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .bind(phone)
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| StorageError::from(e).on_unique_violation("Email already exists"))?
        .ok_or(StorageError::NotFound)?;

        Ok(participant)
    }

    /// Delete a participant and their registrations
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM participants WHERE participant_id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    fn participant_request(first: &str, last: &str, email: &str) -> CreateParticipantRequest {
        CreateParticipantRequest {
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: email.to_string(),
            phone: None,
        }
    }

    #[tokio::test]
    async fn test_list_orders_by_last_then_first_name() {
        let db = Database::in_memory().await.unwrap();
        let repo = ParticipantRepository::new(db.pool());

        repo.create(&participant_request("Zoe", "Adams", "zoe@x.com")).await.unwrap();
        repo.create(&participant_request("Ana", "Lee", "ana@x.com")).await.unwrap();
        repo.create(&participant_request("Bob", "Adams", "bob@x.com")).await.unwrap();

        let names: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .iter()
            .map(Participant::full_name)
            .collect();
        assert_eq!(names, vec!["Bob Adams", "Zoe Adams", "Ana Lee"]);
    }

    #[tokio::test]
    async fn test_find_by_email() {
        let db = Database::in_memory().await.unwrap();
        let repo = ParticipantRepository::new(db.pool());
        let created = repo.create(&participant_request("Ana", "Lee", "ana@x.com")).await.unwrap();

        let found = repo.find_by_email("ana@x.com").await.unwrap().unwrap();
        assert_eq!(found.participant_id, created.participant_id);
        assert!(repo.find_by_email("nobody@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_can_clear_phone() {
        let db = Database::in_memory().await.unwrap();
        let repo = ParticipantRepository::new(db.pool());
        let created = repo
            .create(&CreateParticipantRequest {
                phone: Some("555-0100".to_string()),
                ..participant_request("Ana", "Lee", "ana@x.com")
            })
            .await
            .unwrap();

        let updated = repo
            .update(
                created.participant_id,
                &created,
                &UpdateParticipantRequest {
                    phone: Some(String::new()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.phone, None);
        assert_eq!(updated.email, "ana@x.com");
    }

    #[tokio::test]
    async fn test_detailed_without_registrations() {
        let db = Database::in_memory().await.unwrap();
        let repo = ParticipantRepository::new(db.pool());
        let created = repo.create(&participant_request("Ana", "Lee", "ana@x.com")).await.unwrap();

        let detail = repo.find_by_id_detailed(created.participant_id).await.unwrap();
        assert_eq!(detail.full_name, "Ana Lee");
        assert_eq!(detail.total_events, 0);
    }
}
