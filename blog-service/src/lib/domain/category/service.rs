use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::errors::CategoryError;
use super::models::Category;
use super::models::CategoryId;
use super::models::CategoryName;
use super::ports::CategoryRepository;
use super::ports::CategoryServicePort;

/// Concrete implementation of CategoryServicePort.
pub struct CategoryService<CR>
where
    CR: CategoryRepository,
{
    category_repository: Arc<CR>,
}

impl<CR> CategoryService<CR>
where
    CR: CategoryRepository,
{
    pub fn new(category_repository: Arc<CR>) -> Self {
        Self {
            category_repository,
        }
    }
}

#[async_trait]
impl<CR> CategoryServicePort for CategoryService<CR>
where
    CR: CategoryRepository,
{
    async fn create_category(&self, name: CategoryName) -> Result<Category, CategoryError> {
        self.category_repository.create(name).await
    }

    async fn get_category(&self, id: CategoryId) -> Result<Category, CategoryError> {
        self.category_repository
            .find_by_id(id)
            .await?
            .ok_or(CategoryError::NotFound(id))
    }

    async fn update_category(
        &self,
        id: CategoryId,
        name: CategoryName,
    ) -> Result<Category, CategoryError> {
        let mut category = self.get_category(id).await?;

        category.name = name;
        category.updated_at = Utc::now();

        self.category_repository.update(category).await
    }

    async fn delete_category(&self, id: CategoryId) -> Result<(), CategoryError> {
        self.category_repository.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;

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

    fn category(id: u64, name: &str) -> Category {
        Category {
            id: CategoryId(id),
            name: CategoryName::new(name.to_string()).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_update_category_renames() {
        let mut repository = MockTestCategoryRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(category(id.0, "old"))));
        repository
            .expect_update()
            .withf(|c| c.id == CategoryId(3) && c.name.as_str() == "new")
            .times(1)
            .returning(|c| Ok(c));

        let service = CategoryService::new(Arc::new(repository));

        let updated = service
            .update_category(CategoryId(3), CategoryName::new("new".to_string()).unwrap())
            .await
            .unwrap();
        assert_eq!(updated.name.as_str(), "new");
    }

    #[tokio::test]
    async fn test_update_missing_category() {
        let mut repository = MockTestCategoryRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_update().times(0);

        let service = CategoryService::new(Arc::new(repository));

        let result = service
            .update_category(CategoryId(3), CategoryName::new("new".to_string()).unwrap())
            .await;
        assert!(matches!(
            result.unwrap_err(),
            CategoryError::NotFound(CategoryId(3))
        ));
    }

    #[tokio::test]
    async fn test_get_category_not_found() {
        let mut repository = MockTestCategoryRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = CategoryService::new(Arc::new(repository));

        assert!(matches!(
            service.get_category(CategoryId(9)).await,
            Err(CategoryError::NotFound(CategoryId(9)))
        ));
    }
}
