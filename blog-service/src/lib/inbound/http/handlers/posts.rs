pub mod create_post;
pub mod delete_post;
pub mod get_post;
pub mod list_posts;
pub mod update_post;

pub use create_post::create_post;
pub use delete_post::delete_post;
pub use get_post::get_post;
pub use list_posts::list_posts;
pub use update_post::update_post;

use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::category::models::CategoryId;
use crate::domain::post::errors::PostError;
use crate::domain::post::models::PostContent;
use crate::domain::post::models::PostFields;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostTitle;

/// Request body shared by post create and update.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
pub struct PostRequest {
    category_id: u64,
    #[schema(max_length = 10)]
    title: String,
    /// An empty string is stored as no image.
    #[serde(default)]
    head_img: Option<String>,
    content: String,
}

impl PostRequest {
    fn try_into_fields(self) -> Result<PostFields, PostError> {
        Ok(PostFields {
            category_id: CategoryId(self.category_id),
            title: PostTitle::new(self.title)?,
            head_img: self.head_img.filter(|url| !url.is_empty()),
            content: PostContent::new(self.content)?,
        })
    }
}

fn parse_post_id(raw: &str) -> Result<PostId, PostError> {
    Ok(PostId::from_string(raw)?)
}
