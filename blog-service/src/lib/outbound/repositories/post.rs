use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use super::from_db_id;
use super::to_db_id;
use crate::domain::category::models::CategoryId;
use crate::domain::post::errors::PostError;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostContent;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostTitle;
use crate::domain::post::ports::PostRepository;
use crate::domain::user::models::UserId;

pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PostRow {
    id: Uuid,
    user_id: i64,
    category_id: i64,
    title: String,
    head_img: Option<String>,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PostRow> for Post {
    type Error = PostError;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        Ok(Post {
            id: PostId(row.id),
            user_id: UserId(from_db_id(row.user_id).map_err(PostError::DatabaseError)?),
            category_id: CategoryId(from_db_id(row.category_id).map_err(PostError::DatabaseError)?),
            title: PostTitle::new(row.title)?,
            head_img: row.head_img,
            content: PostContent::new(row.content)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn db_ids(post: &Post) -> Result<(i64, i64), PostError> {
    let user_id = to_db_id(post.user_id.0)
        .ok_or_else(|| PostError::DatabaseError(format!("user id out of range: {}", post.user_id)))?;
    let category_id = to_db_id(post.category_id.0)
        .ok_or(PostError::UnknownCategory(post.category_id))?;
    Ok((user_id, category_id))
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, post: &Post) -> Result<(), PostError> {
        let (user_id, category_id) = db_ids(post)?;

        sqlx::query(
            r#"
            INSERT INTO posts (id, user_id, category_id, title, head_img, content, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(post.id.0)
        .bind(user_id)
        .bind(category_id)
        .bind(post.title.as_str())
        .bind(post.head_img.as_deref())
        .bind(post.content.as_str())
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostError> {
        sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, user_id, category_id, title, head_img, content, created_at, updated_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?
        .map(Post::try_from)
        .transpose()
    }

    async fn update(&self, post: &Post) -> Result<(), PostError> {
        let (_, category_id) = db_ids(post)?;

        // user_id and created_at are never written after insert.
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET category_id = $2, title = $3, head_img = $4, content = $5, updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(post.id.0)
        .bind(category_id)
        .bind(post.title.as_str())
        .bind(post.head_img.as_deref())
        .bind(post.content.as_str())
        .bind(post.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(PostError::NotFound(post.id));
        }

        Ok(())
    }

    async fn delete(&self, id: PostId) -> Result<(), PostError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(PostError::NotFound(id));
        }

        Ok(())
    }

    async fn list_page(&self, offset: u64, limit: u32) -> Result<(Vec<Post>, u64), PostError> {
        let offset = i64::try_from(offset).unwrap_or(i64::MAX);

        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, user_id, category_id, title, head_img, content, created_at, updated_at
            FROM posts
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(i64::from(limit))
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        let posts = rows
            .into_iter()
            .map(Post::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((posts, from_db_id(total).map_err(PostError::DatabaseError)?))
    }
}
