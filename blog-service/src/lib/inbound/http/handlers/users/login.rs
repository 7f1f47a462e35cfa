use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use utoipa::ToSchema;

use super::SessionResponseData;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::Password;
use crate::domain::user::models::Telephone;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiErrorData;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Exchange a telephone and password for a session token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = SessionResponseData),
        (status = 401, description = "Unknown telephone or wrong password", body = ApiErrorData),
        (status = 422, description = "Malformed telephone or password", body = ApiErrorData)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiSuccess<SessionResponseData>, ApiError> {
    let command = LoginCommand {
        telephone: Telephone::new(body.telephone)
            .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?,
        password: Password::new(body.password)
            .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?,
    };

    state
        .user_service
        .login(command)
        .await
        .map_err(ApiError::from)
        .map(|ref session| ApiSuccess::new(StatusCode::OK, session.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "13800138000")]
    telephone: String,
    password: String,
}
