use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::parse_post_id;
use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiErrorData;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::PostData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Delete a post and return it. Only its author may do this.
#[utoipa::path(
    delete,
    path = "/posts/{id}",
    tag = "Posts",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Post UUID")),
    responses(
        (status = 200, description = "The removed post", body = PostData),
        (status = 400, description = "Malformed post id", body = ApiErrorData),
        (status = 401, description = "Unauthorized", body = ApiErrorData),
        (status = 403, description = "Caller is not the author", body = ApiErrorData),
        (status = 404, description = "No such post", body = ApiErrorData)
    )
)]
pub async fn delete_post(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(caller)): Extension<AuthenticatedUser>,
    Path(post_id): Path<String>,
) -> Result<ApiSuccess<PostData>, ApiError> {
    let post_id = parse_post_id(&post_id)?;

    state
        .post_service
        .delete_post(&caller, post_id)
        .await
        .map_err(ApiError::from)
        .map(|ref post| ApiSuccess::new(StatusCode::OK, post.into()))
}
