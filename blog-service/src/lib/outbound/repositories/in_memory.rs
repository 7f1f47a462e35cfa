//! Process-local repositories backed by locked maps.
//!
//! Used for development (`database.backend = "in_memory"`) and by the test
//! suites. Locks are never held across an `.await`.

use std::collections::HashMap;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::category::errors::CategoryError;
use crate::domain::category::models::Category;
use crate::domain::category::models::CategoryId;
use crate::domain::category::models::CategoryName;
use crate::domain::category::ports::CategoryRepository;
use crate::domain::post::errors::PostError;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::ports::PostRepository;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::Telephone;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

const POISONED: &str = "in-memory store lock poisoned";

#[derive(Debug)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
    next_id: AtomicU64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Drop a user record, returning it if it existed.
    pub fn remove(&self, id: UserId) -> Option<User> {
        self.users.write().ok()?.remove(&id)
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut users = self
            .users
            .write()
            .map_err(|_| UserError::DatabaseError(POISONED.to_string()))?;

        if users.values().any(|u| u.telephone == user.telephone) {
            return Err(UserError::TelephoneAlreadyExists(user.telephone.to_string()));
        }

        let now = Utc::now();
        let created = User {
            id: UserId(self.next_id.fetch_add(1, Ordering::Relaxed)),
            name: user.name,
            telephone: user.telephone,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        users.insert(created.id, created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError> {
        let users = self
            .users
            .read()
            .map_err(|_| UserError::DatabaseError(POISONED.to_string()))?;

        Ok(users.get(&id).cloned())
    }

    async fn find_by_telephone(&self, telephone: &Telephone) -> Result<Option<User>, UserError> {
        let users = self
            .users
            .read()
            .map_err(|_| UserError::DatabaseError(POISONED.to_string()))?;

        Ok(users.values().find(|u| &u.telephone == telephone).cloned())
    }
}

#[derive(Debug)]
pub struct InMemoryCategoryRepository {
    categories: RwLock<HashMap<CategoryId, Category>>,
    next_id: AtomicU64,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self {
            categories: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl Default for InMemoryCategoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn create(&self, name: CategoryName) -> Result<Category, CategoryError> {
        let mut categories = self
            .categories
            .write()
            .map_err(|_| CategoryError::DatabaseError(POISONED.to_string()))?;

        if categories.values().any(|c| c.name == name) {
            return Err(CategoryError::NameAlreadyExists(name.to_string()));
        }

        let now = Utc::now();
        let category = Category {
            id: CategoryId(self.next_id.fetch_add(1, Ordering::Relaxed)),
            name,
            created_at: now,
            updated_at: now,
        };
        categories.insert(category.id, category.clone());

        Ok(category)
    }

    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, CategoryError> {
        let categories = self
            .categories
            .read()
            .map_err(|_| CategoryError::DatabaseError(POISONED.to_string()))?;

        Ok(categories.get(&id).cloned())
    }

    async fn update(&self, category: Category) -> Result<Category, CategoryError> {
        let mut categories = self
            .categories
            .write()
            .map_err(|_| CategoryError::DatabaseError(POISONED.to_string()))?;

        if categories
            .values()
            .any(|c| c.id != category.id && c.name == category.name)
        {
            return Err(CategoryError::NameAlreadyExists(category.name.to_string()));
        }

        match categories.get_mut(&category.id) {
            Some(stored) => {
                *stored = category.clone();
                Ok(category)
            }
            None => Err(CategoryError::NotFound(category.id)),
        }
    }

    async fn delete(&self, id: CategoryId) -> Result<(), CategoryError> {
        let mut categories = self
            .categories
            .write()
            .map_err(|_| CategoryError::DatabaseError(POISONED.to_string()))?;

        categories
            .remove(&id)
            .map(|_| ())
            .ok_or(CategoryError::NotFound(id))
    }
}

/// Posts are kept in insertion order so equal timestamps list newest insert first.
#[derive(Debug, Default)]
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, post: &Post) -> Result<(), PostError> {
        let mut posts = self
            .posts
            .write()
            .map_err(|_| PostError::DatabaseError(POISONED.to_string()))?;

        if posts.iter().any(|p| p.id == post.id) {
            return Err(PostError::DatabaseError(format!(
                "duplicate post id: {}",
                post.id
            )));
        }
        posts.push(post.clone());

        Ok(())
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostError> {
        let posts = self
            .posts
            .read()
            .map_err(|_| PostError::DatabaseError(POISONED.to_string()))?;

        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn update(&self, post: &Post) -> Result<(), PostError> {
        let mut posts = self
            .posts
            .write()
            .map_err(|_| PostError::DatabaseError(POISONED.to_string()))?;

        let stored = posts
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or(PostError::NotFound(post.id))?;

        stored.category_id = post.category_id;
        stored.title = post.title.clone();
        stored.head_img = post.head_img.clone();
        stored.content = post.content.clone();
        stored.updated_at = post.updated_at;

        Ok(())
    }

    async fn delete(&self, id: PostId) -> Result<(), PostError> {
        let mut posts = self
            .posts
            .write()
            .map_err(|_| PostError::DatabaseError(POISONED.to_string()))?;

        let index = posts
            .iter()
            .position(|p| p.id == id)
            .ok_or(PostError::NotFound(id))?;
        posts.remove(index);

        Ok(())
    }

    async fn list_page(&self, offset: u64, limit: u32) -> Result<(Vec<Post>, u64), PostError> {
        let posts = self
            .posts
            .read()
            .map_err(|_| PostError::DatabaseError(POISONED.to_string()))?;

        let mut newest_first: Vec<&Post> = posts.iter().rev().collect();
        newest_first.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let page = newest_first
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(limit as usize)
            .cloned()
            .collect();

        Ok((page, posts.len() as u64))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::domain::post::models::PostContent;
    use crate::domain::post::models::PostTitle;
    use crate::domain::user::models::UserName;

    fn new_user(telephone: &str) -> NewUser {
        NewUser {
            name: UserName::new("alice".to_string()).unwrap(),
            telephone: Telephone::new(telephone.to_string()).unwrap(),
            password_hash: "$argon2id$stub".to_string(),
        }
    }

    fn post_at(title: &str, minutes_ago: i64) -> Post {
        let at = Utc::now() - Duration::minutes(minutes_ago);
        Post {
            id: PostId::new(),
            user_id: UserId(1),
            category_id: CategoryId(1),
            title: PostTitle::new(title.to_string()).unwrap(),
            head_img: None,
            content: PostContent::new("body".to_string()).unwrap(),
            created_at: at,
            updated_at: at,
        }
    }

    #[tokio::test]
    async fn test_user_ids_are_assigned_and_telephone_unique() {
        let repository = InMemoryUserRepository::new();

        let first = repository.create(new_user("13800138000")).await.unwrap();
        let second = repository.create(new_user("13800138001")).await.unwrap();
        assert_ne!(first.id, second.id);

        let duplicate = repository.create(new_user("13800138000")).await;
        assert!(matches!(duplicate, Err(UserError::TelephoneAlreadyExists(_))));

        let found = repository
            .find_by_telephone(&second.telephone)
            .await
            .unwrap();
        assert_eq!(found, Some(second));
    }

    #[tokio::test]
    async fn test_category_rename_conflict() {
        let repository = InMemoryCategoryRepository::new();
        let rust = repository
            .create(CategoryName::new("rust".to_string()).unwrap())
            .await
            .unwrap();
        repository
            .create(CategoryName::new("go".to_string()).unwrap())
            .await
            .unwrap();

        let mut renamed = rust.clone();
        renamed.name = CategoryName::new("go".to_string()).unwrap();
        assert!(matches!(
            repository.update(renamed).await,
            Err(CategoryError::NameAlreadyExists(_))
        ));

        repository.delete(rust.id).await.unwrap();
        assert!(matches!(
            repository.delete(rust.id).await,
            Err(CategoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_page_newest_first() {
        let repository = InMemoryPostRepository::new();
        for (title, minutes_ago) in [("old", 30), ("new", 1), ("mid", 10)] {
            repository.create(&post_at(title, minutes_ago)).await.unwrap();
        }

        let (page, total) = repository.list_page(0, 2).await.unwrap();
        let titles: Vec<_> = page.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["new", "mid"]);
        assert_eq!(total, 3);

        let (page, _) = repository.list_page(2, 2).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].title.as_str(), "old");
    }

    #[tokio::test]
    async fn test_update_keeps_author_and_creation_time() {
        let repository = InMemoryPostRepository::new();
        let original = post_at("first", 5);
        repository.create(&original).await.unwrap();

        let mut edited = original.clone();
        edited.user_id = UserId(99);
        edited.title = PostTitle::new("second".to_string()).unwrap();
        edited.updated_at = Utc::now();
        repository.update(&edited).await.unwrap();

        let stored = repository.find_by_id(original.id).await.unwrap().unwrap();
        assert_eq!(stored.user_id, UserId(1));
        assert_eq!(stored.created_at, original.created_at);
        assert_eq!(stored.title.as_str(), "second");
    }
}
