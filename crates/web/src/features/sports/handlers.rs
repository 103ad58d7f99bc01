use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::sport::{CreateSportRequest, SportDetailResponse, SportResponse, UpdateSportRequest},
};
use validator::Validate;

use crate::error::WebError;
use crate::extract::{Json, Path};

use super::services;

#[utoipa::path(
    get,
    path = "/api/sports",
    responses(
        (status = 200, description = "List all sports successfully", body = Vec<SportResponse>)
    ),
    tag = "sports"
)]
pub async fn list_sports(State(db): State<Database>) -> Result<Response, WebError> {
    let sports = services::list_sports(db.pool()).await?;

    let response: Vec<SportResponse> = sports.into_iter().map(SportResponse::from).collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/sports/{id}",
    params(
        ("id" = i64, Path, description = "Sport ID")
    ),
    responses(
        (status = 200, description = "Sport found", body = SportResponse),
        (status = 404, description = "Sport not found")
    ),
    tag = "sports"
)]
pub async fn get_sport(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Response, WebError> {
    let sport = services::get_sport(db.pool(), id).await?;

    Ok(Json(SportResponse::from(sport)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/sports/{id}/detailed",
    params(
        ("id" = i64, Path, description = "Sport ID")
    ),
    responses(
        (status = 200, description = "Sport with its events and teams", body = SportDetailResponse),
        (status = 404, description = "Sport not found")
    ),
    tag = "sports"
)]
pub async fn get_sport_detailed(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Response, WebError> {
    let sport = services::get_sport_detailed(db.pool(), id).await?;

    Ok(Json(sport).into_response())
}

#[utoipa::path(
    post,
    path = "/api/sports",
    request_body = CreateSportRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Sport created successfully", body = SportResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Business rule violated")
    ),
    tag = "sports"
)]
pub async fn create_sport(
    State(db): State<Database>,
    Json(req): Json<CreateSportRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let sport = services::create_sport(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(SportResponse::from(sport))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/sports/{id}",
    params(
        ("id" = i64, Path, description = "Sport ID")
    ),
    request_body = UpdateSportRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Sport updated successfully", body = SportResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Sport not found"),
        (status = 422, description = "Business rule violated")
    ),
    tag = "sports"
)]
pub async fn update_sport(
    State(db): State<Database>,
    Path(id): Path<i64>,
    Json(update_req): Json<UpdateSportRequest>,
) -> Result<Response, WebError> {
    update_req.validate()?;

    let updated = services::update_sport(db.pool(), id, &update_req).await?;

    Ok(Json(SportResponse::from(updated)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/sports/{id}",
    params(
        ("id" = i64, Path, description = "Sport ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Sport deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Sport not found"),
        (status = 422, description = "Sport still has events")
    ),
    tag = "sports"
)]
pub async fn delete_sport(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Response, WebError> {
    services::delete_sport(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
