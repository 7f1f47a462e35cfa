use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;
use utoipa::ToSchema;

use super::SessionResponseData;
use crate::domain::user::models::Password;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::Telephone;
use crate::domain::user::models::UserName;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiErrorData;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::user::errors::PasswordPolicyError;
use crate::user::errors::TelephoneError;
use crate::user::errors::UserNameError;

/// Create an account and log it in. A missing name is replaced by a random one.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = SessionResponseData),
        (status = 409, description = "Telephone already registered", body = ApiErrorData),
        (status = 422, description = "Invalid name, telephone or password", body = ApiErrorData)
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<SessionResponseData>, ApiError> {
    state
        .user_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref session| ApiSuccess::new(StatusCode::CREATED, session.into()))
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[serde(default)]
    name: Option<String>,
    #[schema(example = "13800138000")]
    telephone: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Invalid name: {0}")]
    Name(#[from] UserNameError),

    #[error("Invalid telephone: {0}")]
    Telephone(#[from] TelephoneError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordPolicyError),
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, ParseRegisterRequestError> {
        let telephone = Telephone::new(self.telephone)?;
        let password = Password::new(self.password)?;
        let name = UserName::or_generated(self.name)?;
        Ok(RegisterCommand {
            name,
            telephone,
            password,
        })
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}
