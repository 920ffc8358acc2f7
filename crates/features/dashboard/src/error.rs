use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sdash_domain::repository::RepositoryError;
use sdash_event_bus::EventBusError;
use sdash_kernel::server::ApiStateError;
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the dashboard read side.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("student {0} not found")]
    StudentNotFound(i64),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    State(#[from] ApiStateError),
    #[error(transparent)]
    Events(#[from] EventBusError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::StudentNotFound(_) => StatusCode::NOT_FOUND,
            Self::Repository(_) | Self::State(_) | Self::Events(_) => {
                tracing::error!(error = %self, "Dashboard request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            },
        };

        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}
