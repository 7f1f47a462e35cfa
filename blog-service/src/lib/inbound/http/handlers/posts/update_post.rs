use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;

use super::parse_post_id;
use super::PostRequest;
use crate::domain::post::models::UpdatePostCommand;
use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiErrorData;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::PostData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Replace a post's fields. Only its author may do this.
#[utoipa::path(
    put,
    path = "/posts/{id}",
    tag = "Posts",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Post UUID")),
    request_body = PostRequest,
    responses(
        (status = 200, description = "Post updated", body = PostData),
        (status = 400, description = "Malformed post id", body = ApiErrorData),
        (status = 401, description = "Unauthorized", body = ApiErrorData),
        (status = 403, description = "Caller is not the author", body = ApiErrorData),
        (status = 404, description = "No such post", body = ApiErrorData),
        (status = 422, description = "Invalid fields or unknown category", body = ApiErrorData)
    )
)]
pub async fn update_post(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(caller)): Extension<AuthenticatedUser>,
    Path(post_id): Path<String>,
    Json(body): Json<PostRequest>,
) -> Result<ApiSuccess<PostData>, ApiError> {
    let post_id = parse_post_id(&post_id)?;
    let command = UpdatePostCommand {
        fields: body.try_into_fields()?,
    };

    state
        .post_service
        .update_post(&caller, post_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref post| ApiSuccess::new(StatusCode::OK, post.into()))
}
