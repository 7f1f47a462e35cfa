use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;
use utoipa::ToSchema;

use super::parse_post_id;
use crate::domain::post::models::PostDetails;
use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiErrorData;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::CategoryData;
use crate::inbound::http::handlers::PostData;
use crate::inbound::http::router::AppState;

#[utoipa::path(
    get,
    path = "/posts/{id}",
    tag = "Posts",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Post UUID")),
    responses(
        (status = 200, description = "The post and its category", body = GetPostResponseData),
        (status = 400, description = "Malformed post id", body = ApiErrorData),
        (status = 401, description = "Unauthorized", body = ApiErrorData),
        (status = 404, description = "No such post", body = ApiErrorData)
    )
)]
pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<ApiSuccess<GetPostResponseData>, ApiError> {
    let post_id = parse_post_id(&post_id)?;

    state
        .post_service
        .get_post(post_id)
        .await
        .map_err(ApiError::from)
        .map(|ref details| ApiSuccess::new(StatusCode::OK, details.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct GetPostResponseData {
    pub post: PostData,
    /// Absent once the category has been deleted.
    pub category: Option<CategoryData>,
}

impl From<&PostDetails> for GetPostResponseData {
    fn from(details: &PostDetails) -> Self {
        Self {
            post: (&details.post).into(),
            category: details.category.as_ref().map(CategoryData::from),
        }
    }
}
