use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use super::from_db_id;
use super::to_db_id;
use crate::domain::category::errors::CategoryError;
use crate::domain::category::models::Category;
use crate::domain::category::models::CategoryId;
use crate::domain::category::models::CategoryName;
use crate::domain::category::ports::CategoryRepository;

pub struct PostgresCategoryRepository {
    pool: PgPool,
}

impl PostgresCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CategoryRow {
    id: i64,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CategoryRow> for Category {
    type Error = CategoryError;

    fn try_from(row: CategoryRow) -> Result<Self, Self::Error> {
        Ok(Category {
            id: CategoryId(from_db_id(row.id).map_err(CategoryError::DatabaseError)?),
            name: CategoryName::new(row.name)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn map_write_error(e: sqlx::Error, name: &CategoryName) -> CategoryError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() && db_err.constraint() == Some("categories_name_key") {
            return CategoryError::NameAlreadyExists(name.to_string());
        }
    }
    CategoryError::DatabaseError(e.to_string())
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn create(&self, name: CategoryName) -> Result<Category, CategoryError> {
        sqlx::query_as::<_, CategoryRow>(
            r#"
            INSERT INTO categories (name)
            VALUES ($1)
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(name.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &name))?
        .try_into()
    }

    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, CategoryError> {
        let Some(db_id) = to_db_id(id.0) else {
            return Ok(None);
        };

        sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(db_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CategoryError::DatabaseError(e.to_string()))?
        .map(Category::try_from)
        .transpose()
    }

    async fn update(&self, category: Category) -> Result<Category, CategoryError> {
        let db_id = to_db_id(category.id.0).ok_or(CategoryError::NotFound(category.id))?;

        let result = sqlx::query(
            r#"
            UPDATE categories
            SET name = $2, updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(db_id)
        .bind(category.name.as_str())
        .bind(category.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &category.name))?;

        if result.rows_affected() == 0 {
            return Err(CategoryError::NotFound(category.id));
        }

        Ok(category)
    }

    async fn delete(&self, id: CategoryId) -> Result<(), CategoryError> {
        let db_id = to_db_id(id.0).ok_or(CategoryError::NotFound(id))?;

        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(db_id)
            .execute(&self.pool)
            .await
            .map_err(|e| CategoryError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(CategoryError::NotFound(id));
        }

        Ok(())
    }
}
