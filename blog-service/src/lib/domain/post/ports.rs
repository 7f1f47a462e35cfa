use async_trait::async_trait;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::PageRequest;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostDetails;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostPage;
use crate::domain::post::models::UpdatePostCommand;
use crate::domain::user::models::User;

/// Port for post domain service operations.
///
/// Every operation receives the resolved identity of the caller. Mutations of
/// an existing post are only carried out when that identity is the author.
#[async_trait]
pub trait PostServicePort: Send + Sync + 'static {
    /// Create a post authored by `author`.
    ///
    /// # Errors
    /// * `UnknownCategory` - Referenced category does not exist
    /// * `DatabaseError` - Database operation failed
    async fn create_post(&self, author: &User, command: CreatePostCommand)
        -> Result<Post, PostError>;

    /// Retrieve a post with its category.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_post(&self, id: PostId) -> Result<PostDetails, PostError>;

    /// Replace the editable fields of a post.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `NotOwner` - Caller is not the author
    /// * `UnknownCategory` - Referenced category does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_post(
        &self,
        caller: &User,
        id: PostId,
        command: UpdatePostCommand,
    ) -> Result<Post, PostError>;

    /// Delete a post, returning the removed record.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `NotOwner` - Caller is not the author
    /// * `DatabaseError` - Database operation failed
    async fn delete_post(&self, caller: &User, id: PostId) -> Result<Post, PostError>;

    /// List posts newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_posts(&self, page: PageRequest) -> Result<PostPage, PostError>;
}

/// Persistence operations for posts.
#[async_trait]
pub trait PostRepository: Send + Sync + 'static {
    /// Persist a new post.
    async fn create(&self, post: &Post) -> Result<(), PostError>;

    /// Find post by ID.
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostError>;

    /// Store changed fields of an existing post.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    async fn update(&self, post: &Post) -> Result<(), PostError>;

    /// Remove a post.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    async fn delete(&self, id: PostId) -> Result<(), PostError>;

    /// Fetch one page ordered by creation time descending, with the total
    /// number of posts.
    async fn list_page(&self, offset: u64, limit: u32) -> Result<(Vec<Post>, u64), PostError>;
}
