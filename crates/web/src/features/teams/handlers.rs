use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::team::{CreateTeamRequest, TeamFilter, TeamResponse, UpdateTeamRequest},
};
use validator::Validate;

use crate::error::WebError;
use crate::extract::{Json, Path, Query};

use super::services;

#[utoipa::path(
    get,
    path = "/api/teams",
    params(TeamFilter),
    responses(
        (status = 200, description = "List teams successfully", body = Vec<TeamResponse>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "teams"
)]
pub async fn list_teams(
    State(db): State<Database>,
    Query(filter): Query<TeamFilter>,
) -> Result<Response, WebError> {
    let teams = match filter.sport_id {
        Some(sport_id) => services::list_teams_by_sport(db.pool(), sport_id).await?,
        None => services::list_teams(db.pool(), &filter).await?,
    };

    let response: Vec<TeamResponse> = teams.into_iter().map(TeamResponse::from).collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/teams/{id}",
    params(
        ("id" = i64, Path, description = "Team ID")
    ),
    responses(
        (status = 200, description = "Team found", body = TeamResponse),
        (status = 404, description = "Team not found")
    ),
    tag = "teams"
)]
pub async fn get_team(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Response, WebError> {
    let team = services::get_team(db.pool(), id).await?;

    Ok(Json(TeamResponse::from(team)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/teams",
    request_body = CreateTeamRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Team created successfully", body = TeamResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Business rule violated")
    ),
    tag = "teams"
)]
pub async fn create_team(
    State(db): State<Database>,
    Json(req): Json<CreateTeamRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let team = services::create_team(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(TeamResponse::from(team))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/teams/{id}",
    params(
        ("id" = i64, Path, description = "Team ID")
    ),
    request_body = UpdateTeamRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Team updated successfully", body = TeamResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Team not found"),
        (status = 422, description = "Business rule violated")
    ),
    tag = "teams"
)]
pub async fn update_team(
    State(db): State<Database>,
    Path(id): Path<i64>,
    Json(update_req): Json<UpdateTeamRequest>,
) -> Result<Response, WebError> {
    update_req.validate()?;

    let updated = services::update_team(db.pool(), id, &update_req).await?;

    Ok(Json(TeamResponse::from(updated)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/teams/{id}",
    params(
        ("id" = i64, Path, description = "Team ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Team deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Team not found")
    ),
    tag = "teams"
)]
pub async fn delete_team(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Response, WebError> {
    services::delete_team(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
