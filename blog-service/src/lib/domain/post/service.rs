use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::category::errors::CategoryError;
use crate::domain::category::models::CategoryId;
use crate::domain::category::ports::CategoryRepository;
use crate::domain::ownership;
use crate::domain::post::errors::PostError;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::PageRequest;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostDetails;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostPage;
use crate::domain::post::models::UpdatePostCommand;
use crate::domain::post::ports::PostRepository;
use crate::domain::post::ports::PostServicePort;
use crate::domain::user::models::User;

/// Concrete implementation of PostServicePort.
///
/// Mutations follow a fixed order: load the post, check authorship, check the
/// referenced category, then write.
pub struct PostService<PR, CR>
where
    PR: PostRepository,
    CR: CategoryRepository,
{
    post_repository: Arc<PR>,
    category_repository: Arc<CR>,
}

impl<PR, CR> PostService<PR, CR>
where
    PR: PostRepository,
    CR: CategoryRepository,
{
    pub fn new(post_repository: Arc<PR>, category_repository: Arc<CR>) -> Self {
        Self {
            post_repository,
            category_repository,
        }
    }

    async fn ensure_category(&self, id: CategoryId) -> Result<(), PostError> {
        self.category_repository
            .find_by_id(id)
            .await?
            .map(|_| ())
            .ok_or(PostError::UnknownCategory(id))
    }

    /// Load a post and require `caller` to be its author.
    async fn owned_post(&self, caller: &User, id: PostId) -> Result<Post, PostError> {
        let post = self
            .post_repository
            .find_by_id(id)
            .await?
            .ok_or(PostError::NotFound(id))?;

        if !ownership::authorize(caller, &post) {
            tracing::warn!(
                user_id = %caller.id,
                post_id = %id,
                "Rejected mutation of post by non-author"
            );
            return Err(PostError::NotOwner {
                user_id: caller.id,
                post_id: id,
            });
        }

        Ok(post)
    }
}

#[async_trait]
impl<PR, CR> PostServicePort for PostService<PR, CR>
where
    PR: PostRepository,
    CR: CategoryRepository,
{
    async fn create_post(
        &self,
        author: &User,
        command: CreatePostCommand,
    ) -> Result<Post, PostError> {
        let fields = command.fields;
        self.ensure_category(fields.category_id).await?;

        let now = Utc::now();
        let post = Post {
            id: PostId::new(),
            user_id: author.id,
            category_id: fields.category_id,
            title: fields.title,
            head_img: fields.head_img,
            content: fields.content,
            created_at: now,
            updated_at: now,
        };

        self.post_repository.create(&post).await?;

        tracing::info!(post_id = %post.id, user_id = %author.id, "Post created");

        Ok(post)
    }

    async fn get_post(&self, id: PostId) -> Result<PostDetails, PostError> {
        let post = self
            .post_repository
            .find_by_id(id)
            .await?
            .ok_or(PostError::NotFound(id))?;

        // The category may have been deleted since the post was written.
        let category = match self.category_repository.find_by_id(post.category_id).await {
            Ok(category) => category,
            Err(CategoryError::NotFound(_)) => None,
            Err(e) => return Err(PostError::DatabaseError(e.to_string())),
        };

        Ok(PostDetails { post, category })
    }

    async fn update_post(
        &self,
        caller: &User,
        id: PostId,
        command: UpdatePostCommand,
    ) -> Result<Post, PostError> {
        let mut post = self.owned_post(caller, id).await?;

        let fields = command.fields;
        self.ensure_category(fields.category_id).await?;

        post.category_id = fields.category_id;
        post.title = fields.title;
        post.head_img = fields.head_img;
        post.content = fields.content;
        post.updated_at = Utc::now();

        self.post_repository.update(&post).await?;

        Ok(post)
    }

    async fn delete_post(&self, caller: &User, id: PostId) -> Result<Post, PostError> {
        let post = self.owned_post(caller, id).await?;

        self.post_repository.delete(id).await?;

        tracing::info!(post_id = %id, user_id = %caller.id, "Post deleted");

        Ok(post)
    }

    async fn list_posts(&self, page: PageRequest) -> Result<PostPage, PostError> {
        let (posts, total) = self
            .post_repository
            .list_page(page.offset(), page.page_size())
            .await?;

        Ok(PostPage { posts, total })
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::domain::category::models::Category;
    use crate::domain::category::models::CategoryName;
    use crate::domain::post::models::PostContent;
    use crate::domain::post::models::PostFields;
    use crate::domain::post::models::PostTitle;
    use crate::domain::user::models::Telephone;
    use crate::domain::user::models::UserId;
    use crate::domain::user::models::UserName;

    mock! {
        pub TestPostRepository {}

        #[async_trait]
        impl PostRepository for TestPostRepository {
            async fn create(&self, post: &Post) -> Result<(), PostError>;
            async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostError>;
            async fn update(&self, post: &Post) -> Result<(), PostError>;
            async fn delete(&self, id: PostId) -> Result<(), PostError>;
            async fn list_page(&self, offset: u64, limit: u32) -> Result<(Vec<Post>, u64), PostError>;
        }
    }

    mock! {
        pub TestCategoryRepository {}

        #[async_trait]
        impl CategoryRepository for TestCategoryRepository {
            async fn create(&self, name: CategoryName) -> Result<Category, CategoryError>;
            async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, CategoryError>;
            async fn update(&self, category: Category) -> Result<Category, CategoryError>;
            async fn delete(&self, id: CategoryId) -> Result<(), CategoryError>;
        }
    }

    fn user(id: u64) -> User {
        User {
            id: UserId(id),
            name: UserName::new(format!("user{}", id)).unwrap(),
            telephone: Telephone::new(format!("{:011}", id)).unwrap(),
            password_hash: "$argon2id$stub".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn category(id: CategoryId) -> Category {
        Category {
            id,
            name: CategoryName::new("rust".to_string()).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn fields(category_id: u64, title: &str) -> PostFields {
        PostFields {
            category_id: CategoryId(category_id),
            title: PostTitle::new(title.to_string()).unwrap(),
            head_img: None,
            content: PostContent::new("body".to_string()).unwrap(),
        }
    }

    fn post_by(author: UserId, id: PostId) -> Post {
        Post {
            id,
            user_id: author,
            category_id: CategoryId(1),
            title: PostTitle::new("first".to_string()).unwrap(),
            head_img: None,
            content: PostContent::new("body".to_string()).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn categories_present() -> MockTestCategoryRepository {
        let mut categories = MockTestCategoryRepository::new();
        categories
            .expect_find_by_id()
            .returning(|id| Ok(Some(category(id))));
        categories
    }

    #[tokio::test]
    async fn test_create_post_records_author() {
        let mut posts = MockTestPostRepository::new();
        posts
            .expect_create()
            .withf(|post| post.user_id == UserId(7) && post.title.as_str() == "hello")
            .times(1)
            .returning(|_| Ok(()));

        let service = PostService::new(Arc::new(posts), Arc::new(categories_present()));

        let post = service
            .create_post(&user(7), CreatePostCommand { fields: fields(1, "hello") })
            .await
            .unwrap();
        assert_eq!(post.user_id, UserId(7));
        assert_eq!(post.created_at, post.updated_at);
    }

    #[tokio::test]
    async fn test_create_post_unknown_category() {
        let mut posts = MockTestPostRepository::new();
        posts.expect_create().times(0);
        let mut categories = MockTestCategoryRepository::new();
        categories.expect_find_by_id().returning(|_| Ok(None));

        let service = PostService::new(Arc::new(posts), Arc::new(categories));

        let result = service
            .create_post(&user(7), CreatePostCommand { fields: fields(99, "hello") })
            .await;
        assert!(matches!(
            result,
            Err(PostError::UnknownCategory(CategoryId(99)))
        ));
    }

    #[tokio::test]
    async fn test_update_by_non_author_never_writes() {
        let id = PostId::new();
        let mut posts = MockTestPostRepository::new();
        posts
            .expect_find_by_id()
            .times(1)
            .returning(move |id| Ok(Some(post_by(UserId(1), id))));
        posts.expect_update().times(0);

        let mut categories = MockTestCategoryRepository::new();
        categories.expect_find_by_id().times(0);

        let service = PostService::new(Arc::new(posts), Arc::new(categories));

        let result = service
            .update_post(&user(2), id, UpdatePostCommand { fields: fields(1, "mine") })
            .await;
        assert!(matches!(
            result,
            Err(PostError::NotOwner { user_id: UserId(2), .. })
        ));
    }

    #[tokio::test]
    async fn test_update_by_author() {
        let id = PostId::new();
        let mut posts = MockTestPostRepository::new();
        posts
            .expect_find_by_id()
            .returning(move |id| Ok(Some(post_by(UserId(1), id))));
        posts
            .expect_update()
            .withf(|post| post.title.as_str() == "edited" && post.user_id == UserId(1))
            .times(1)
            .returning(|_| Ok(()));

        let service = PostService::new(Arc::new(posts), Arc::new(categories_present()));

        let post = service
            .update_post(&user(1), id, UpdatePostCommand { fields: fields(2, "edited") })
            .await
            .unwrap();
        assert_eq!(post.category_id, CategoryId(2));
        assert!(post.updated_at >= post.created_at);
    }

    #[tokio::test]
    async fn test_missing_post_is_not_found_before_ownership() {
        let mut posts = MockTestPostRepository::new();
        posts.expect_find_by_id().returning(|_| Ok(None));
        posts.expect_delete().times(0);

        let service = PostService::new(
            Arc::new(posts),
            Arc::new(MockTestCategoryRepository::new()),
        );

        let id = PostId::new();
        let result = service.delete_post(&user(2), id).await;
        assert!(matches!(result, Err(PostError::NotFound(missing)) if missing == id));
    }

    #[tokio::test]
    async fn test_delete_by_non_author_never_deletes() {
        let mut posts = MockTestPostRepository::new();
        posts
            .expect_find_by_id()
            .returning(|id| Ok(Some(post_by(UserId(1), id))));
        posts.expect_delete().times(0);

        let service = PostService::new(
            Arc::new(posts),
            Arc::new(MockTestCategoryRepository::new()),
        );

        let result = service.delete_post(&user(3), PostId::new()).await;
        assert!(matches!(result, Err(PostError::NotOwner { .. })));
    }

    #[tokio::test]
    async fn test_get_post_with_deleted_category() {
        let mut posts = MockTestPostRepository::new();
        posts
            .expect_find_by_id()
            .returning(|id| Ok(Some(post_by(UserId(1), id))));
        let mut categories = MockTestCategoryRepository::new();
        categories.expect_find_by_id().returning(|_| Ok(None));

        let service = PostService::new(Arc::new(posts), Arc::new(categories));

        let details = service.get_post(PostId::new()).await.unwrap();
        assert!(details.category.is_none());
    }

    #[tokio::test]
    async fn test_list_posts_uses_page_offset() {
        let mut posts = MockTestPostRepository::new();
        posts
            .expect_list_page()
            .withf(|offset, limit| *offset == 20 && *limit == 10)
            .times(1)
            .returning(|_, _| Ok((Vec::new(), 25)));

        let service = PostService::new(
            Arc::new(posts),
            Arc::new(MockTestCategoryRepository::new()),
        );

        let page = service.list_posts(PageRequest::new(3, 10)).await.unwrap();
        assert!(page.posts.is_empty());
        assert_eq!(page.total, 25);
    }
}
