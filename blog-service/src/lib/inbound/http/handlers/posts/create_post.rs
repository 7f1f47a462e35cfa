use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;

use super::PostRequest;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiErrorData;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::PostData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Publish a post authored by the caller.
#[utoipa::path(
    post,
    path = "/posts",
    tag = "Posts",
    security(("bearer_auth" = [])),
    request_body = PostRequest,
    responses(
        (status = 201, description = "Post created", body = PostData),
        (status = 401, description = "Unauthorized", body = ApiErrorData),
        (status = 422, description = "Invalid fields or unknown category", body = ApiErrorData)
    )
)]
pub async fn create_post(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(author)): Extension<AuthenticatedUser>,
    Json(body): Json<PostRequest>,
) -> Result<ApiSuccess<PostData>, ApiError> {
    let command = CreatePostCommand {
        fields: body.try_into_fields()?,
    };

    state
        .post_service
        .create_post(&author, command)
        .await
        .map_err(ApiError::from)
        .map(|ref post| ApiSuccess::new(StatusCode::CREATED, post.into()))
}
