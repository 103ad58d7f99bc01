use sqlx::SqlitePool;
use storage::{
    dto::team::{CreateTeamRequest, TeamFilter, UpdateTeamRequest},
    models::Team,
    repository::{sport::SportRepository, team::TeamRepository},
};

use crate::error::{ServiceError, ServiceResult};
use crate::features::rules::required_text;

/// List teams, optionally only those of one sport
pub async fn list_teams(pool: &SqlitePool, filter: &TeamFilter) -> ServiceResult<Vec<Team>> {
    let repo = TeamRepository::new(pool);
    Ok(repo.list(filter).await?)
}

/// Teams playing a given sport
pub async fn list_teams_by_sport(pool: &SqlitePool, sport_id: i64) -> ServiceResult<Vec<Team>> {
    let sport = SportRepository::new(pool).find_by_id(sport_id).await?;
    list_teams(
        pool,
        &TeamFilter {
            sport_id: Some(sport.sport_id),
        },
    )
    .await
}

/// Get team by ID
pub async fn get_team(pool: &SqlitePool, id: i64) -> ServiceResult<Team> {
    let repo = TeamRepository::new(pool);
    Ok(repo.find_by_id(id).await?)
}

async fn ensure_sport_exists(pool: &SqlitePool, sport_id: i64) -> ServiceResult<()> {
    match SportRepository::new(pool).find_optional(sport_id).await? {
        Some(_) => Ok(()),
        None => Err(ServiceError::validation(format!(
            "Sport with ID {} does not exist",
            sport_id
        ))),
    }
}

/// Create a team with a unique name for an existing sport
pub async fn create_team(pool: &SqlitePool, request: &CreateTeamRequest) -> ServiceResult<Team> {
    let repo = TeamRepository::new(pool);

    let name = required_text(&request.name, "Team name is required")?;
    let city = required_text(&request.city, "City is required")?;

    ensure_sport_exists(pool, request.sport_id).await?;

    if repo.find_by_name(&name).await?.is_some() {
        return Err(ServiceError::validation(format!(
            "A team named '{}' already exists",
            name
        )));
    }

    let cleaned = CreateTeamRequest {
        name,
        sport_id: request.sport_id,
        city,
        founded_on: request.founded_on,
    };

    Ok(repo.create(&cleaned).await?)
}

/// Update a team. Only the supplied fields are checked and changed.
pub async fn update_team(
    pool: &SqlitePool,
    id: i64,
    request: &UpdateTeamRequest,
) -> ServiceResult<Team> {
    let repo = TeamRepository::new(pool);
    let existing = repo.find_by_id(id).await?;

    let name = match request.name.as_deref() {
        Some(name) => {
            let name = required_text(name, "Team name cannot be empty")?;
            if let Some(other) = repo.find_by_name(&name).await? {
                if other.team_id != id {
                    return Err(ServiceError::validation(format!(
                        "Another team named '{}' already exists",
                        name
                    )));
                }
            }
            Some(name)
        }
        None => None,
    };

    let city = request
        .city
        .as_deref()
        .map(|v| required_text(v, "City cannot be empty"))
        .transpose()?;

    if let Some(sport_id) = request.sport_id {
        ensure_sport_exists(pool, sport_id).await?;
    }

    let cleaned = UpdateTeamRequest {
        name,
        sport_id: request.sport_id,
        city,
        founded_on: request.founded_on,
    };

    Ok(repo.update(id, &existing, &cleaned).await?)
}

pub async fn delete_team(pool: &SqlitePool, id: i64) -> ServiceResult<()> {
    let repo = TeamRepository::new(pool);
    let team = repo.find_by_id(id).await?;
    Ok(repo.delete(team.team_id).await?)
}
