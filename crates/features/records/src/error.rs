use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sdash_domain::DomainError;
use sdash_domain::repository::RepositoryError;
use sdash_kernel::server::ApiStateError;
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the records write side.
#[derive(Debug, Error)]
pub enum RecordsError {
    #[error("student {0} not found")]
    StudentNotFound(i64),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    State(#[from] ApiStateError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for RecordsError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::StudentNotFound(_) | Self::Domain(DomainError::RecordNotFound(_)) => {
                StatusCode::NOT_FOUND
            },
            Self::Domain(DomainError::GradeAlreadyRecorded(_)) => StatusCode::CONFLICT,
            Self::Domain(DomainError::GradeOutOfRange(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Repository(_) | Self::State(_) => {
                tracing::error!(error = %self, "Grade entry failed");
                StatusCode::INTERNAL_SERVER_ERROR
            },
        };

        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}
