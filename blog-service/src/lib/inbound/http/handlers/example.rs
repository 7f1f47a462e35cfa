use axum::Json;

/// Liveness smoke route. Answers outside the usual envelope.
#[utoipa::path(
    get,
    path = "/api/v1/example/helloworld",
    tag = "Example",
    responses(
        (status = 200, description = "Always the JSON string \"helloworld\"", body = String)
    )
)]
pub async fn helloworld() -> Json<&'static str> {
    Json("helloworld")
}
