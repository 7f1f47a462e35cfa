use utoipa::openapi::security::HttpAuthScheme;
use utoipa::openapi::security::HttpBuilder;
use utoipa::openapi::security::SecurityScheme;
use utoipa::Modify;
use utoipa::OpenApi;

use super::handlers::categories;
use super::handlers::example;
use super::handlers::posts;
use super::handlers::users;
use super::handlers::ApiErrorData;
use super::handlers::CategoryData;
use super::handlers::PostData;
use super::handlers::UserData;

/// Path of the generated OpenAPI document.
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Mount point of the Swagger UI.
pub const SWAGGER_UI_PATH: &str = "/swagger";

/// Name of the security scheme referenced by every gated route.
pub const BEARER_SCHEME: &str = "bearer_auth";

#[derive(OpenApi)]
#[openapi(
    info(title = "blog-service API", version = "1.0"),
    paths(
        example::helloworld,
        users::register::register,
        users::login::login,
        users::info::info,
        categories::create_category::create_category,
        categories::get_category::get_category,
        categories::update_category::update_category,
        categories::delete_category::delete_category,
        posts::create_post::create_post,
        posts::get_post::get_post,
        posts::update_post::update_post,
        posts::delete_post::delete_post,
        posts::list_posts::list_posts
    ),
    components(schemas(ApiErrorData, UserData, CategoryData, PostData)),
    modifiers(&BearerSecurity),
    tags(
        (name = "Auth", description = "Registration, login and the caller's account"),
        (name = "Categories", description = "Category management"),
        (name = "Posts", description = "Posts, editable only by their author"),
        (name = "Example", description = "Smoke route")
    )
)]
pub struct ApiDoc;

/// Registers the bearer token scheme the gated paths refer to.
struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
