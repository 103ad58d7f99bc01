use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use storage::error::StorageError;
use thiserror::Error;
use validator::ValidationErrors;

/// Business-rule layer errors
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A business rule rejected the operation
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::debug!(%message, "Business rule violated");
        Self::Validation(message)
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Service(ServiceError),
    Validation(ValidationErrors),
    Json(JsonRejection),
    Query(QueryRejection),
    Path(PathRejection),
    Unauthorized,
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Service(e) => write!(f, "Service error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::Json(e) => write!(f, "Invalid JSON body: {}", e),
            Self::Query(e) => write!(f, "Invalid query string: {}", e),
            Self::Path(e) => write!(f, "Invalid path: {}", e),
            Self::Unauthorized => write!(f, "Unauthorized"),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            Self::Service(ServiceError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Service(ServiceError::Storage(StorageError::NotFound)) => StatusCode::NOT_FOUND,
            Self::Service(ServiceError::Storage(StorageError::ConstraintViolation(_))) => {
                StatusCode::CONFLICT
            }
            Self::Service(ServiceError::Storage(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Json(e) => e.status(),
            Self::Query(e) => e.status(),
            Self::Path(e) => e.status(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
        };

        let body = match &self {
            Self::Service(ServiceError::Validation(msg)) => {
                json!({
                    "error": msg
                })
            }
            Self::Service(ServiceError::Storage(StorageError::NotFound)) => {
                json!({
                    "error": "Resource not found"
                })
            }
            Self::Service(ServiceError::Storage(StorageError::ConstraintViolation(msg))) => {
                json!({
                    "error": msg
                })
            }
            Self::Service(ServiceError::Storage(e)) => {
                tracing::error!("Storage error: {:?}", e);
                json!({
                    "error": "An internal error occurred"
                })
            }
            Self::Validation(errors) => {
                let field_errors: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, errors)| {
                        errors.iter().map(move |e| {
                            format!(
                                "{}: {}",
                                field,
                                e.message
                                    .as_ref()
                                    .map(|m| m.to_string())
                                    .unwrap_or_else(|| e.code.to_string())
                            )
                        })
                    })
                    .collect();

                json!({
                    "error": "Validation failed",
                    "details": field_errors
                })
            }
            Self::Json(e) => json!({ "error": e.body_text() }),
            Self::Query(e) => json!({ "error": e.body_text() }),
            Self::Path(e) => json!({ "error": e.body_text() }),
            Self::Unauthorized => {
                json!({
                    "error": "Unauthorized"
                })
            }
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<ServiceError> for WebError {
    fn from(error: ServiceError) -> Self {
        Self::Service(error)
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Service(ServiceError::Storage(error))
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

impl From<JsonRejection> for WebError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Json(rejection)
    }
}

impl From<QueryRejection> for WebError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Query(rejection)
    }
}

impl From<PathRejection> for WebError {
    fn from(rejection: PathRejection) -> Self {
        Self::Path(rejection)
    }
}
