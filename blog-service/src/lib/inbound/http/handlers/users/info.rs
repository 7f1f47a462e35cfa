use axum::http::StatusCode;
use axum::Extension;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiErrorData;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::UserData;
use crate::inbound::http::middleware::AuthenticatedUser;

/// Returns the caller's own account, as resolved by the auth gate.
#[utoipa::path(
    get,
    path = "/api/auth/info",
    tag = "Auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The caller's account", body = UserData),
        (status = 401, description = "Unauthorized", body = ApiErrorData)
    )
)]
pub async fn info(
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    Ok(ApiSuccess::new(StatusCode::OK, (&user).into()))
}
