use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;
use utoipa::IntoParams;
use utoipa::ToSchema;

use crate::domain::post::models::PageRequest;
use crate::domain::post::models::PostPage;
use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiErrorData;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::PostData;
use crate::inbound::http::router::AppState;

#[utoipa::path(
    get,
    path = "/posts/page/list",
    tag = "Posts",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "One page of posts, newest first", body = ListPostsResponseData),
        (status = 401, description = "Unauthorized", body = ApiErrorData)
    )
)]
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<ApiSuccess<ListPostsResponseData>, ApiError> {
    state
        .post_service
        .list_posts(query.into())
        .await
        .map_err(ApiError::from)
        .map(|ref page| ApiSuccess::new(StatusCode::OK, page.into()))
}

/// Query string accepted by the page list. Out of range values are clamped
/// rather than rejected.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// 1-based page number, default 1.
    #[serde(default, alias = "page_num")]
    page_num: Option<i64>,
    /// Posts per page, default 20, at most 100.
    #[serde(default, alias = "page_size")]
    page_size: Option<i64>,
}

impl From<PageQuery> for PageRequest {
    fn from(query: PageQuery) -> Self {
        let clamp = |value: Option<i64>, default: u32| {
            value
                .map(|v| u32::try_from(v.max(0)).unwrap_or(u32::MAX))
                .unwrap_or(default)
        };
        PageRequest::new(
            clamp(query.page_num, PageRequest::DEFAULT_PAGE_NUM),
            clamp(query.page_size, PageRequest::DEFAULT_PAGE_SIZE),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ListPostsResponseData {
    pub posts: Vec<PostData>,
    pub total: u64,
}

impl From<&PostPage> for ListPostsResponseData {
    fn from(page: &PostPage) -> Self {
        Self {
            posts: page.posts.iter().map(PostData::from).collect(),
            total: page.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_defaults_and_clamping() {
        let page = PageRequest::from(PageQuery::default());
        assert_eq!((page.page_num(), page.page_size()), (1, 20));

        let page = PageRequest::from(PageQuery {
            page_num: Some(-4),
            page_size: Some(10_000),
        });
        assert_eq!((page.page_num(), page.page_size()), (1, 100));
    }
}
