use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::category::models::CategoryId;
use crate::domain::category::ports::CategoryServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiErrorData;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::CategoryData;
use crate::inbound::http::router::AppState;

#[utoipa::path(
    get,
    path = "/categories/{id}",
    tag = "Categories",
    params(("id" = u64, Path, description = "Category id")),
    responses(
        (status = 200, description = "The category", body = CategoryData),
        (status = 404, description = "No such category", body = ApiErrorData)
    )
)]
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<ApiSuccess<CategoryData>, ApiError> {
    state
        .category_service
        .get_category(CategoryId(id))
        .await
        .map_err(ApiError::from)
        .map(|ref category| ApiSuccess::new(StatusCode::OK, category.into()))
}
