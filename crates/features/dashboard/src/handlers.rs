use crate::error::DashboardError;
use crate::views::DashboardView;
use crate::Dashboard;
use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use sdash_domain::constants::DASHBOARD_TAG;
use sdash_kernel::server::ApiState;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new().routes(routes!(dashboard_handler))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/{student_id}",
    params(("student_id" = i64, Path, description = "Student id")),
    responses(
        (status = OK, description = "Assembled dashboard view", body = DashboardView),
        (status = NOT_FOUND, description = "Unknown student"),
    ),
    tag = DASHBOARD_TAG,
)]
async fn dashboard_handler(
    State(state): State<ApiState>,
    Path(student_id): Path<i64>,
) -> Result<impl IntoResponse, DashboardError> {
    let slice = state.try_get_slice::<Dashboard>()?;
    let view = slice.service.get_dashboard(student_id).await?;

    Ok(Json(view))
}
