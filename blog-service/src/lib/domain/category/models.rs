use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::category::errors::CategoryNameError;

/// Category unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryId(pub u64);

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Post category.
///
/// Categories have no owner: any authenticated user may edit them.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Category name value object with validation.
///
/// Ensures name is non-empty and within 50 character limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryName(String);

impl CategoryName {
    const MAX_LENGTH: usize = 50;

    /// Create a new validated category name.
    ///
    /// # Errors
    /// * `Empty` - Name is empty or whitespace
    /// * `TooLong` - Name exceeds 50 characters
    pub fn new(name: String) -> Result<Self, CategoryNameError> {
        let length = name.chars().count();
        if name.trim().is_empty() {
            Err(CategoryNameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(CategoryNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_name_validation() {
        assert!(CategoryName::new("rust".to_string()).is_ok());
        assert_eq!(CategoryName::new(String::new()), Err(CategoryNameError::Empty));
        assert_eq!(CategoryName::new("  ".to_string()), Err(CategoryNameError::Empty));
        assert_eq!(
            CategoryName::new("x".repeat(51)),
            Err(CategoryNameError::TooLong { max: 50, actual: 51 })
        );
    }
}
