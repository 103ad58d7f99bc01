use sqlx::SqlitePool;

use crate::dto::sport::{CreateSportRequest, SportDetailResponse, UpdateSportRequest};
use crate::dto::team::TeamFilter;
use crate::error::{Result, StorageError};
use crate::models::Sport;
use crate::repository::event::EventRepository;
use crate::repository::merge_nullable;
use crate::repository::team::TeamRepository;

/// Repository for Sport database operations
pub struct SportRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SportRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all sports
    pub async fn list(&self) -> Result<Vec<Sport>> {
        let sports = sqlx::query_as::<_, Sport>(
            r#"
            SELECT sport_id, name, description, created_at
            FROM sports
            ORDER BY name
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(sports)
    }

    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM sports")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Get a sport by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Sport> {
        self.find_optional(id).await?.ok_or(StorageError::NotFound)
    }

    pub async fn find_optional(&self, id: i64) -> Result<Option<Sport>> {
        let sport = sqlx::query_as::<_, Sport>(
            r#"
            SELECT sport_id, name, description, created_at
            FROM sports
            WHERE sport_id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(sport)
    }

    /// Exact, case-sensitive name lookup
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Sport>> {
        let sport = sqlx::query_as::<_, Sport>(
            r#"
            SELECT sport_id, name, description, created_at
            FROM sports
            WHERE name = ?
            "#,
        )
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        Ok(sport)
    }

    /// Get a sport together with its events and teams
    pub async fn find_by_id_detailed(&self, id: i64) -> Result<SportDetailResponse> {
        let sport = self.find_by_id(id).await?;

        let events = EventRepository::new(self.pool)
            .list_by_sport(sport.sport_id)
            .await?;

        let teams = TeamRepository::new(self.pool)
            .list(&TeamFilter {
                sport_id: Some(sport.sport_id),
            })
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(SportDetailResponse {
            sport_id: sport.sport_id,
            name: sport.name,
            description: sport.description,
            created_at: sport.created_at,
            events,
            teams,
        })
    }

    /// Create a new sport
    pub async fn create(&self, req: &CreateSportRequest) -> Result<Sport> {
        let sport = sqlx::query_as::<_, Sport>(
            r#"
            INSERT INTO sports (name, description)
            VALUES (?, ?)
            RETURNING sport_id, name, description, created_at
            "#,
        )
        .bind(&req.name)
        .bind(&req.description)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from(e).on_unique_violation("Sport name already exists"))?;

        Ok(sport)
    }

    /// Update an existing sport, keeping fields the request leaves out
    pub async fn update(&self, id: i64, existing: &Sport, req: &UpdateSportRequest) -> Result<Sport> {
        let name = req.name.as_ref().unwrap_or(&existing.name);
        let description = merge_nullable(req.description.as_ref(), existing.description.as_ref());

        let sport = sqlx::query_as::<_, Sport>(
            r#"
            UPDATE sports
            SET name = ?,
                description = ?
            WHERE sport_id = ?
            RETURNING sport_id, name, description, created_at
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| StorageError::from(e).on_unique_violation("Sport name already exists"))?
        .ok_or(StorageError::NotFound)?;

        Ok(sport)
    }

    /// Delete a sport by ID. Fails while events still reference it.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM sports WHERE sport_id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| {
                StorageError::from(e).on_foreign_key_violation("Sport is still referenced by events")
            })?;

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
    use crate::dto::event::CreateEventRequest;
    use chrono::{Duration, Utc};

    fn sport_request(name: &str) -> CreateSportRequest {
        CreateSportRequest {
            name: name.to_string(),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_list_sorted_by_name() {
        let db = Database::in_memory().await.unwrap();
        let repo = SportRepository::new(db.pool());

        repo.create(&sport_request("Tennis")).await.unwrap();
        repo.create(&sport_request("Basketball")).await.unwrap();

        let names: Vec<String> = repo.list().await.unwrap().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Basketball", "Tennis"]);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_name_is_constraint_violation() {
        let db = Database::in_memory().await.unwrap();
        let repo = SportRepository::new(db.pool());

        repo.create(&sport_request("Soccer")).await.unwrap();
        let err = repo.create(&sport_request("Soccer")).await.unwrap_err();

        assert!(matches!(err, StorageError::ConstraintViolation(_)));
    }

    #[tokio::test]
    async fn test_update_keeps_missing_fields() {
        let db = Database::in_memory().await.unwrap();
        let repo = SportRepository::new(db.pool());

        let sport = repo
            .create(&CreateSportRequest {
                name: "Rugby".to_string(),
                description: Some("Oval ball".to_string()),
            })
            .await
            .unwrap();

        let updated = repo
            .update(
                sport.sport_id,
                &sport,
                &UpdateSportRequest {
                    name: Some("Rugby Union".to_string()),
                    description: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Rugby Union");
        assert_eq!(updated.description.as_deref(), Some("Oval ball"));
    }

    #[tokio::test]
    async fn test_delete_missing_sport_is_not_found() {
        let db = Database::in_memory().await.unwrap();
        let repo = SportRepository::new(db.pool());

        assert!(matches!(repo.delete(42).await, Err(StorageError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_with_events_is_rejected_by_foreign_key() {
        let db = Database::in_memory().await.unwrap();
        let repo = SportRepository::new(db.pool());
        let sport = repo.create(&sport_request("Soccer")).await.unwrap();

        EventRepository::new(db.pool())
            .create(&CreateEventRequest {
                name: "Finals".to_string(),
                sport_id: sport.sport_id,
                date: Utc::now() + Duration::days(1),
                venue: "Stadium".to_string(),
                description: None,
            })
            .await
            .unwrap();

        let err = repo.delete(sport.sport_id).await.unwrap_err();
        assert!(
            matches!(&err, StorageError::ConstraintViolation(msg) if msg == "Sport is still referenced by events"),
            "unexpected error: {:?}",
            err
        );
        assert!(repo.find_optional(sport.sport_id).await.unwrap().is_some());
    }
}
