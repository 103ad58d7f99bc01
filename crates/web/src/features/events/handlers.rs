use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::event::{
        CreateEventRequest, EventDetailResponse, EventFilter, EventResponse,
        RegisterParticipantRequest, RegistrationDetail, UpdateEventRequest,
    },
    models::{Event, Registration},
};
use validator::Validate;

use crate::error::WebError;
use crate::extract::{Json, Path, Query};

use super::services;

#[utoipa::path(
    get,
    path = "/api/events",
    params(EventFilter),
    responses(
        (status = 200, description = "List events successfully", body = Vec<EventResponse>),
        (status = 400, description = "Invalid query parameters"),
        (status = 404, description = "Sport not found")
    ),
    tag = "events"
)]
pub async fn list_events(
    State(db): State<Database>,
    Query(filter): Query<EventFilter>,
) -> Result<Response, WebError> {
    let events = services::list_events(db.pool(), &filter).await?;

    Ok(Json(events).into_response())
}

#[utoipa::path(
    get,
    path = "/api/events/{id}",
    params(
        ("id" = i64, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event found", body = EventResponse),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn get_event(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Response, WebError> {
    let event = services::get_event(db.pool(), id).await?;

    Ok(Json(event).into_response())
}

#[utoipa::path(
    get,
    path = "/api/events/{id}/detailed",
    params(
        ("id" = i64, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event with its sport and registrations", body = EventDetailResponse),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn get_event_detailed(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Response, WebError> {
    let event = services::get_event_detailed(db.pool(), id).await?;

    Ok(Json(event).into_response())
}

#[utoipa::path(
    post,
    path = "/api/events",
    request_body = CreateEventRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Event created successfully", body = Event),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Business rule violated")
    ),
    tag = "events"
)]
pub async fn create_event(
    State(db): State<Database>,
    Json(req): Json<CreateEventRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let event = services::create_event(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(event)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/events/{id}",
    params(
        ("id" = i64, Path, description = "Event ID")
    ),
    request_body = UpdateEventRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Event updated successfully", body = Event),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Event not found"),
        (status = 422, description = "Business rule violated")
    ),
    tag = "events"
)]
pub async fn update_event(
    State(db): State<Database>,
    Path(id): Path<i64>,
    Json(update_req): Json<UpdateEventRequest>,
) -> Result<Response, WebError> {
    update_req.validate()?;

    let updated = services::update_event(db.pool(), id, &update_req).await?;

    Ok(Json(updated).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/events/{id}",
    params(
        ("id" = i64, Path, description = "Event ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Event deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn delete_event(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Response, WebError> {
    services::delete_event(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    get,
    path = "/api/events/{id}/participants",
    params(
        ("id" = i64, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Registrations of the event", body = Vec<RegistrationDetail>),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn list_registrations(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Response, WebError> {
    let registrations = services::list_registrations(db.pool(), id).await?;

    Ok(Json(registrations).into_response())
}

#[utoipa::path(
    post,
    path = "/api/events/{id}/participants",
    params(
        ("id" = i64, Path, description = "Event ID")
    ),
    request_body = RegisterParticipantRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Participant registered", body = Registration),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Event not found"),
        (status = 422, description = "Already registered or event has passed")
    ),
    tag = "events"
)]
pub async fn register_participant(
    State(db): State<Database>,
    Path(id): Path<i64>,
    Json(req): Json<RegisterParticipantRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let registration = services::register_participant(db.pool(), id, &req).await?;

    Ok((StatusCode::CREATED, Json(registration)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/events/{id}/participants/{participant_id}",
    params(
        ("id" = i64, Path, description = "Event ID"),
        ("participant_id" = i64, Path, description = "Participant ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Participant unregistered"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Event, participant or registration not found")
    ),
    tag = "events"
)]
pub async fn unregister_participant(
    State(db): State<Database>,
    Path((id, participant_id)): Path<(i64, i64)>,
) -> Result<Response, WebError> {
    services::unregister_participant(db.pool(), id, participant_id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
