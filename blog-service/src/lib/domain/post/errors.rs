use thiserror::Error;

use crate::domain::category::errors::CategoryError;
use crate::domain::category::models::CategoryId;
use crate::domain::post::models::PostId;
use crate::domain::user::models::UserId;

/// Error type for PostId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PostIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error type for post field validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PostContentError {
    #[error("Title is empty")]
    EmptyTitle,

    #[error("Title too long: maximum {max} characters, got {actual}")]
    TitleTooLong { max: usize, actual: usize },

    #[error("Content is empty")]
    EmptyContent,
}

/// Top-level error type for all post-related operations
#[derive(Debug, Clone, Error)]
pub enum PostError {
    #[error("Invalid post ID: {0}")]
    InvalidPostId(#[from] PostIdError),

    #[error("Invalid post: {0}")]
    InvalidContent(#[from] PostContentError),

    #[error("Post not found: {0}")]
    NotFound(PostId),

    #[error("User {user_id} is not the author of post {post_id}")]
    NotOwner { user_id: UserId, post_id: PostId },

    #[error("Category does not exist: {0}")]
    UnknownCategory(CategoryId),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<CategoryError> for PostError {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::NotFound(id) => PostError::UnknownCategory(id),
            other => PostError::DatabaseError(other.to_string()),
        }
    }
}
