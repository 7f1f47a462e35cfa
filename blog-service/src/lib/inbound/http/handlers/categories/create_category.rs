use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::CategoryRequest;
use crate::domain::category::ports::CategoryServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiErrorData;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::CategoryData;
use crate::inbound::http::router::AppState;

#[utoipa::path(
    post,
    path = "/categories",
    tag = "Categories",
    request_body = CategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryData),
        (status = 409, description = "Name already taken", body = ApiErrorData),
        (status = 422, description = "Invalid name", body = ApiErrorData)
    )
)]
pub async fn create_category(
    State(state): State<AppState>,
    Json(body): Json<CategoryRequest>,
) -> Result<ApiSuccess<CategoryData>, ApiError> {
    state
        .category_service
        .create_category(body.try_into_name()?)
        .await
        .map_err(ApiError::from)
        .map(|ref category| ApiSuccess::new(StatusCode::CREATED, category.into()))
}
