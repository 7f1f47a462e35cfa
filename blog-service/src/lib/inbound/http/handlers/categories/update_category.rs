use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::CategoryRequest;
use crate::domain::category::models::CategoryId;
use crate::domain::category::ports::CategoryServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiErrorData;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::CategoryData;
use crate::inbound::http::router::AppState;

/// Rename a category.
#[utoipa::path(
    put,
    path = "/categories/{id}",
    tag = "Categories",
    params(("id" = u64, Path, description = "Category id")),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Category renamed", body = CategoryData),
        (status = 404, description = "No such category", body = ApiErrorData),
        (status = 409, description = "Name already taken", body = ApiErrorData),
        (status = 422, description = "Invalid name", body = ApiErrorData)
    )
)]
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(body): Json<CategoryRequest>,
) -> Result<ApiSuccess<CategoryData>, ApiError> {
    state
        .category_service
        .update_category(CategoryId(id), body.try_into_name()?)
        .await
        .map_err(ApiError::from)
        .map(|ref category| ApiSuccess::new(StatusCode::OK, category.into()))
}
