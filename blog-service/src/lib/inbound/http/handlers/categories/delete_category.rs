use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::category::models::CategoryId;
use crate::domain::category::ports::CategoryServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiErrorData;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

#[utoipa::path(
    delete,
    path = "/categories/{id}",
    tag = "Categories",
    params(("id" = u64, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category deleted", body = DeleteCategoryResponseData),
        (status = 404, description = "No such category", body = ApiErrorData)
    )
)]
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<ApiSuccess<DeleteCategoryResponseData>, ApiError> {
    state
        .category_service
        .delete_category(CategoryId(id))
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, DeleteCategoryResponseData { id }))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DeleteCategoryResponseData {
    pub id: u64,
}
