use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use storage::{Database, dto::home::HomeSummary};

use crate::error::WebError;
use crate::extract::Json;

use super::services;

#[utoipa::path(
    get,
    path = "/api",
    responses(
        (status = 200, description = "Entity totals and the next upcoming events", body = HomeSummary)
    ),
    tag = "home"
)]
pub async fn get_summary(State(db): State<Database>) -> Result<Response, WebError> {
    let summary = services::get_summary(db.pool()).await?;

    Ok(Json(summary).into_response())
}
