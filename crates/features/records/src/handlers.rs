use crate::Records;
use crate::error::RecordsError;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use sdash_domain::constants::RECORDS_TAG;
use sdash_kernel::server::ApiState;
use serde::Deserialize;
use utoipa::ToSchema;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new().routes(routes!(record_grade_handler))
}

/// Grade entry request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct GradeRequest {
    /// Grade on the 1.0 (best) to 5.0 (fail) scale
    grade: f64,
}

#[utoipa::path(
    post,
    path = "/api/students/{student_id}/records/{record_id}/grade",
    params(
        ("student_id" = i64, Path, description = "Student id"),
        ("record_id" = i64, Path, description = "Course record id"),
    ),
    request_body = GradeRequest,
    responses(
        (status = NO_CONTENT, description = "Grade recorded"),
        (status = NOT_FOUND, description = "Unknown student or record"),
        (status = CONFLICT, description = "Record already graded"),
        (status = UNPROCESSABLE_ENTITY, description = "Grade outside the 1.0..=5.0 scale"),
    ),
    tag = RECORDS_TAG,
)]
async fn record_grade_handler(
    State(state): State<ApiState>,
    Path((student_id, record_id)): Path<(i64, i64)>,
    Json(request): Json<GradeRequest>,
) -> Result<StatusCode, RecordsError> {
    let slice = state.try_get_slice::<Records>()?;
    slice.service.record_grade(student_id, record_id, request.grade).await?;

    Ok(StatusCode::NO_CONTENT)
}
