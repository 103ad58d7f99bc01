use sqlx::SqlitePool;
use storage::{
    dto::sport::{CreateSportRequest, SportDetailResponse, UpdateSportRequest},
    models::Sport,
    repository::{event::EventRepository, sport::SportRepository},
};

use crate::error::{ServiceError, ServiceResult};
use crate::features::rules::{clearable_text, optional_text, required_text};

/// List all sports
pub async fn list_sports(pool: &SqlitePool) -> ServiceResult<Vec<Sport>> {
    let repo = SportRepository::new(pool);
    Ok(repo.list().await?)
}

/// Get sport by ID
pub async fn get_sport(pool: &SqlitePool, id: i64) -> ServiceResult<Sport> {
    let repo = SportRepository::new(pool);
    Ok(repo.find_by_id(id).await?)
}

/// Get sport with its events and teams
pub async fn get_sport_detailed(pool: &SqlitePool, id: i64) -> ServiceResult<SportDetailResponse> {
    let repo = SportRepository::new(pool);
    Ok(repo.find_by_id_detailed(id).await?)
}

/// Create a new sport with a unique, non-blank name
pub async fn create_sport(pool: &SqlitePool, request: &CreateSportRequest) -> ServiceResult<Sport> {
    let repo = SportRepository::new(pool);

    let name = required_text(&request.name, "Sport name is required")?;
    if repo.find_by_name(&name).await?.is_some() {
        return Err(ServiceError::validation(format!(
            "A sport named '{}' already exists",
            name
        )));
    }

    let cleaned = CreateSportRequest {
        name,
        description: optional_text(request.description.as_deref()),
    };

    Ok(repo.create(&cleaned).await?)
}

/// Update a sport. Only the supplied fields are checked and changed.
pub async fn update_sport(
    pool: &SqlitePool,
    id: i64,
    request: &UpdateSportRequest,
) -> ServiceResult<Sport> {
    let repo = SportRepository::new(pool);
    let existing = repo.find_by_id(id).await?;

    let name = match request.name.as_deref() {
        Some(name) => {
            let name = required_text(name, "Sport name cannot be empty")?;
            if let Some(other) = repo.find_by_name(&name).await? {
                if other.sport_id != id {
                    return Err(ServiceError::validation(format!(
                        "Another sport named '{}' already exists",
                        name
                    )));
                }
            }
            Some(name)
        }
        None => None,
    };

    let cleaned = UpdateSportRequest {
        name,
        description: clearable_text(request.description.as_deref()),
    };

    Ok(repo.update(id, &existing, &cleaned).await?)
}

/// Delete a sport that no event refers to
pub async fn delete_sport(pool: &SqlitePool, id: i64) -> ServiceResult<()> {
    let repo = SportRepository::new(pool);
    let sport = repo.find_by_id(id).await?;

    let events = EventRepository::new(pool).count_by_sport(id).await?;
    if events > 0 {
        return Err(ServiceError::validation(format!(
            "Cannot delete sport '{}' because it has associated events",
            sport.name
        )));
    }

    Ok(repo.delete(id).await?)
}
