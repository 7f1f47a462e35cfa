use async_trait::async_trait;

use super::errors::CategoryError;
use super::models::Category;
use super::models::CategoryId;
use super::models::CategoryName;

/// Port for category domain service operations.
#[async_trait]
pub trait CategoryServicePort: Send + Sync + 'static {
    /// Create a new category.
    ///
    /// # Errors
    /// * `NameAlreadyExists` - Another category uses this name
    /// * `DatabaseError` - Database operation failed
    async fn create_category(&self, name: CategoryName) -> Result<Category, CategoryError>;

    /// Retrieve category by ID.
    ///
    /// # Errors
    /// * `NotFound` - Category does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_category(&self, id: CategoryId) -> Result<Category, CategoryError>;

    /// Rename an existing category.
    ///
    /// # Errors
    /// * `NotFound` - Category does not exist
    /// * `NameAlreadyExists` - Another category uses this name
    /// * `DatabaseError` - Database operation failed
    async fn update_category(
        &self,
        id: CategoryId,
        name: CategoryName,
    ) -> Result<Category, CategoryError>;

    /// Delete a category.
    ///
    /// # Errors
    /// * `NotFound` - Category does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_category(&self, id: CategoryId) -> Result<(), CategoryError>;
}

/// Persistence operations for categories.
#[async_trait]
pub trait CategoryRepository: Send + Sync + 'static {
    /// Persist a new category, assigning its id.
    async fn create(&self, name: CategoryName) -> Result<Category, CategoryError>;

    /// Find category by ID.
    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, CategoryError>;

    /// Store changed fields of an existing category.
    ///
    /// # Errors
    /// * `NotFound` - Category does not exist
    /// * `NameAlreadyExists` - Another category uses this name
    async fn update(&self, category: Category) -> Result<Category, CategoryError>;

    /// Remove a category.
    ///
    /// # Errors
    /// * `NotFound` - Category does not exist
    async fn delete(&self, id: CategoryId) -> Result<(), CategoryError>;
}
