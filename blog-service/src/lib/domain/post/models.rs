use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::category::models::Category;
use crate::domain::category::models::CategoryId;
use crate::domain::ownership::OwnedResource;
use crate::domain::post::errors::PostContentError;
use crate::domain::post::errors::PostIdError;
use crate::domain::user::models::UserId;

/// Post unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PostId(pub Uuid);

impl PostId {
    /// Generate a new random post ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a post ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, PostIdError> {
        Uuid::parse_str(s)
            .map(PostId)
            .map_err(|e| PostIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for PostId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Blog post aggregate.
///
/// `user_id` records the author. It is set once when the post is created and
/// is the reference every mutation is checked against.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: PostId,
    pub user_id: UserId,
    pub category_id: CategoryId,
    pub title: PostTitle,
    pub head_img: Option<String>,
    pub content: PostContent,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OwnedResource for Post {
    fn owner_id(&self) -> UserId {
        self.user_id
    }
}

/// Post title value object (1 to 10 characters).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostTitle(String);

impl PostTitle {
    const MAX_LENGTH: usize = 10;

    /// # Errors
    /// * `EmptyTitle` - Title is empty or whitespace
    /// * `TitleTooLong` - Title exceeds 10 characters
    pub fn new(title: String) -> Result<Self, PostContentError> {
        let length = title.chars().count();
        if title.trim().is_empty() {
            Err(PostContentError::EmptyTitle)
        } else if length > Self::MAX_LENGTH {
            Err(PostContentError::TitleTooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(title))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Post body value object (non-empty).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostContent(String);

impl PostContent {
    /// # Errors
    /// * `EmptyContent` - Content is empty or whitespace
    pub fn new(content: String) -> Result<Self, PostContentError> {
        if content.trim().is_empty() {
            return Err(PostContentError::EmptyContent);
        }
        Ok(Self(content))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Editable fields of a post, shared by create and update.
#[derive(Debug, Clone)]
pub struct PostFields {
    pub category_id: CategoryId,
    pub title: PostTitle,
    pub head_img: Option<String>,
    pub content: PostContent,
}

/// Command to create a post; the author comes from the authenticated identity.
#[derive(Debug, Clone)]
pub struct CreatePostCommand {
    pub fields: PostFields,
}

/// Command to replace the editable fields of an existing post.
#[derive(Debug, Clone)]
pub struct UpdatePostCommand {
    pub fields: PostFields,
}

/// A post together with its category, if the category still exists.
#[derive(Debug, Clone)]
pub struct PostDetails {
    pub post: Post,
    pub category: Option<Category>,
}

/// Offset pagination request (1-based page number).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page_num: u32,
    page_size: u32,
}

impl PageRequest {
    pub const DEFAULT_PAGE_NUM: u32 = 1;
    pub const DEFAULT_PAGE_SIZE: u32 = 20;
    const MAX_PAGE_SIZE: u32 = 100;

    /// Build a page request, clamping the page number to at least 1 and the
    /// page size to 1..=100.
    pub fn new(page_num: u32, page_size: u32) -> Self {
        Self {
            page_num: page_num.max(1),
            page_size: page_size.clamp(1, Self::MAX_PAGE_SIZE),
        }
    }

    pub fn page_num(&self) -> u32 {
        self.page_num
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> u64 {
        u64::from(self.page_num - 1) * u64::from(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PAGE_NUM, Self::DEFAULT_PAGE_SIZE)
    }
}

/// One page of posts, newest first, plus the total post count.
#[derive(Debug, Clone)]
pub struct PostPage {
    pub posts: Vec<Post>,
    pub total: u64,
}
