use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::dto::team::{CreateTeamRequest, TeamFilter, UpdateTeamRequest};
use crate::error::{Result, StorageError};
use crate::models::Team;

pub struct TeamRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> TeamRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List teams, optionally restricted to one sport
    pub async fn list(&self, filter: &TeamFilter) -> Result<Vec<Team>> {
        let mut query = QueryBuilder::<Sqlite>::new(
            r#"
            SELECT team_id, name, sport_id, city, founded_on, created_at
            FROM teams
            WHERE 1=1
            "#,
        );

        if let Some(sport_id) = filter.sport_id {
            query.push(" AND sport_id = ");
            query.push_bind(sport_id);
        }

        query.push(" ORDER BY name");

        let teams = query.build_query_as::<Team>().fetch_all(self.pool).await?;

        Ok(teams)
    }

    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM teams")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Team> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            SELECT team_id, name, sport_id, city, founded_on, created_at
            FROM teams
            WHERE team_id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(team)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Team>> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            SELECT team_id, name, sport_id, city, founded_on, created_at
            FROM teams
            WHERE name = ?
            "#,
        )
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        Ok(team)
    }

    pub async fn create(&self, req: &CreateTeamRequest) -> Result<Team> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            INSERT INTO teams (name, sport_id, city, founded_on)
            VALUES (?, ?, ?, ?)
            RETURNING team_id, name, sport_id, city, founded_on, created_at
            "#,
        )
        .bind(&req.name)
        .bind(req.sport_id)
        .bind(&req.city)
        .bind(req.founded_on)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            StorageError::from(e)
                .on_unique_violation("Team name already exists")
                .on_foreign_key_violation("Sport does not exist")
        })?;

        Ok(team)
    }

    /// Update an existing team.
    ///
    /// The founding date can be set or changed but not cleared.
    pub async fn update(&self, id: i64, existing: &Team, req: &UpdateTeamRequest) -> Result<Team> {
        let name = req.name.as_ref().unwrap_or(&existing.name);
        let sport_id = req.sport_id.unwrap_or(existing.sport_id);
        let city = req.city.as_ref().unwrap_or(&existing.city);
        let founded_on = req.founded_on.or(existing.founded_on);

        let team = sqlx::query_as::<_, Team>(
            r#"
            UPDATE teams
            SET name = ?,
                sport_id = ?,
                city = ?,
                founded_on = ?
            WHERE team_id = ?
            RETURNING team_id, name, sport_id, city, founded_on, created_at
            "#,
        )
        .bind(name)
        .bind(sport_id)
        .bind(city)
        .bind(founded_on)
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| {
            StorageError::from(e)
                .on_unique_violation("Team name already exists")
                .on_foreign_key_violation("Sport does not exist")
        })?
        .ok_or(StorageError::NotFound)?;

        Ok(team)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM teams WHERE team_id = ?")
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
    use crate::dto::sport::CreateSportRequest;
    use crate::repository::sport::SportRepository;
    use chrono::NaiveDate;

    async fn seed_sport(db: &Database, name: &str) -> i64 {
        SportRepository::new(db.pool())
            .create(&CreateSportRequest {
                name: name.to_string(),
                description: None,
            })
            .await
            .unwrap()
            .sport_id
    }

    fn team_request(name: &str, sport_id: i64) -> CreateTeamRequest {
        CreateTeamRequest {
            name: name.to_string(),
            sport_id,
            city: "Madrid".to_string(),
            founded_on: None,
        }
    }

    #[tokio::test]
    async fn test_list_filters_by_sport() {
        let db = Database::in_memory().await.unwrap();
        let repo = TeamRepository::new(db.pool());
        let soccer = seed_sport(&db, "Soccer").await;
        let basketball = seed_sport(&db, "Basketball").await;

        repo.create(&team_request("Real", soccer)).await.unwrap();
        repo.create(&team_request("Atletico", soccer)).await.unwrap();
        repo.create(&team_request("Estudiantes", basketball)).await.unwrap();

        let soccer_teams = repo
            .list(&TeamFilter {
                sport_id: Some(soccer),
            })
            .await
            .unwrap();
        let names: Vec<&str> = soccer_teams.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Atletico", "Real"]);

        assert_eq!(repo.list(&TeamFilter::default()).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_founding_date_round_trips() {
        let db = Database::in_memory().await.unwrap();
        let repo = TeamRepository::new(db.pool());
        let sport_id = seed_sport(&db, "Soccer").await;
        let founded = NaiveDate::from_ymd_opt(1902, 3, 6).unwrap();

        let team = repo
            .create(&CreateTeamRequest {
                founded_on: Some(founded),
                ..team_request("Real", sport_id)
            })
            .await
            .unwrap();

        assert_eq!(repo.find_by_id(team.team_id).await.unwrap().founded_on, Some(founded));
    }

    #[tokio::test]
    async fn test_teams_follow_deleted_sport() {
        let db = Database::in_memory().await.unwrap();
        let repo = TeamRepository::new(db.pool());
        let sport_id = seed_sport(&db, "Soccer").await;
        let team = repo.create(&team_request("Real", sport_id)).await.unwrap();

        SportRepository::new(db.pool()).delete(sport_id).await.unwrap();

        assert!(matches!(
            repo.find_by_id(team.team_id).await,
            Err(StorageError::NotFound)
        ));
    }
}
