pub mod create_category;
pub mod delete_category;
pub mod get_category;
pub mod update_category;

pub use create_category::create_category;
pub use delete_category::delete_category;
pub use get_category::get_category;
pub use update_category::update_category;

use serde::Deserialize;
use utoipa::ToSchema;

use super::ApiError;
use crate::domain::category::models::CategoryName;

/// Request body shared by category create and update.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
pub struct CategoryRequest {
    #[schema(example = "rust")]
    name: String,
}

impl CategoryRequest {
    fn try_into_name(self) -> Result<CategoryName, ApiError> {
        CategoryName::new(self.name).map_err(|e| ApiError::UnprocessableEntity(e.to_string()))
    }
}
