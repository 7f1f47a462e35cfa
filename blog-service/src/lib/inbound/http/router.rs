use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::categories::create_category;
use super::handlers::categories::delete_category;
use super::handlers::categories::get_category;
use super::handlers::categories::update_category;
use super::handlers::example::helloworld;
use super::handlers::posts::create_post;
use super::handlers::posts::delete_post;
use super::handlers::posts::get_post;
use super::handlers::posts::list_posts;
use super::handlers::posts::update_post;
use super::handlers::users::info;
use super::handlers::users::login;
use super::handlers::users::register;
use super::middleware::authenticate as auth_middleware;
use super::openapi::ApiDoc;
use super::openapi::OPENAPI_JSON_PATH;
use super::openapi::SWAGGER_UI_PATH;
use crate::domain::category::ports::CategoryRepository;
use crate::domain::category::ports::CategoryServicePort;
use crate::domain::category::service::CategoryService;
use crate::domain::identity::IdentityResolver;
use crate::domain::post::ports::PostRepository;
use crate::domain::post::ports::PostServicePort;
use crate::domain::post::service::PostService;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;
use crate::domain::user::service::UserService;

/// Shared state handed to every handler and to the auth gate.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub category_service: Arc<dyn CategoryServicePort>,
    pub post_service: Arc<dyn PostServicePort>,
    pub authenticator: Arc<Authenticator>,
    pub identity_resolver: Arc<IdentityResolver>,
}

impl AppState {
    /// Wire the domain services over one set of repositories.
    pub fn new<UR, CR, PR>(
        user_repository: Arc<UR>,
        category_repository: Arc<CR>,
        post_repository: Arc<PR>,
        authenticator: Arc<Authenticator>,
    ) -> Self
    where
        UR: UserRepository,
        CR: CategoryRepository,
        PR: PostRepository,
    {
        Self {
            user_service: Arc::new(UserService::new(
                Arc::clone(&user_repository),
                Arc::clone(&authenticator),
            )),
            category_service: Arc::new(CategoryService::new(Arc::clone(&category_repository))),
            post_service: Arc::new(PostService::new(post_repository, category_repository)),
            identity_resolver: Arc::new(IdentityResolver::new(user_repository)),
            authenticator,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    // Categories are ownerless and open to anonymous callers.
    let public_routes = Router::new()
        .route("/api/v1/example/helloworld", get(helloworld))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/categories", post(create_category))
        .route(
            "/categories/:id",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        );

    let protected_routes = Router::new()
        .route("/api/auth/info", get(info))
        .route("/posts", post(create_post))
        .route("/posts/page/list", get(list_posts))
        .route(
            "/posts/:id",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
