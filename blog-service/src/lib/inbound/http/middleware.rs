use std::fmt;

use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;

use super::handlers::ApiError;
use super::handlers::ApiResponseBody;
use crate::domain::user::models::User;
use crate::inbound::http::router::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Identity resolved by the auth gate, stored in request extensions.
///
/// Present on every request that reached a protected handler.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

/// Why the gate turned a request away. Logged, never sent to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    MissingHeader,
    MalformedHeader,
    WrongScheme,
    InvalidToken,
    UnknownUser,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Rejection::MissingHeader => "missing authorization header",
            Rejection::MalformedHeader => "authorization header is not ascii",
            Rejection::WrongScheme => "authorization scheme is not bearer",
            Rejection::InvalidToken => "token failed verification",
            Rejection::UnknownUser => "token subject does not resolve to a user",
        };
        f.write_str(reason)
    }
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        tracing::warn!(reason = %self, "Rejected unauthenticated request");
        unauthorized()
    }
}

/// Every rejection produces this exact response.
fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiResponseBody::new_error(
            StatusCode::UNAUTHORIZED,
            "Unauthorized".to_string(),
        )),
    )
        .into_response()
}

/// Auth gate for protected routes.
///
/// Verifies the bearer token, resolves the user it names and attaches it as
/// [`AuthenticatedUser`]. The handler only runs when all of that succeeds.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req).map_err(IntoResponse::into_response)?;

    let claims = state.authenticator.validate_token(token).map_err(|e| {
        tracing::debug!(error = %e, "Token verification failed");
        Rejection::InvalidToken.into_response()
    })?;

    let user = state
        .identity_resolver
        .resolve(&claims)
        .await
        .map_err(|e| ApiError::InternalServerError(e.to_string()).into_response())?
        .ok_or_else(|| Rejection::UnknownUser.into_response())?;

    req.extensions_mut().insert(AuthenticatedUser(user));

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, Rejection> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(Rejection::MissingHeader)?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| Rejection::MalformedHeader)?;

    auth_str
        .strip_prefix(BEARER_PREFIX)
        .ok_or(Rejection::WrongScheme)
}
