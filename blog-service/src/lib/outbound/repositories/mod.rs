pub mod category;
pub mod in_memory;
pub mod post;
pub mod user;

pub use category::PostgresCategoryRepository;
pub use in_memory::InMemoryCategoryRepository;
pub use in_memory::InMemoryPostRepository;
pub use in_memory::InMemoryUserRepository;
pub use post::PostgresPostRepository;
pub use user::PostgresUserRepository;

/// Convert a domain id to the signed column type. Ids above `i64::MAX` can
/// not exist in storage.
pub(crate) fn to_db_id(id: u64) -> Option<i64> {
    i64::try_from(id).ok()
}

pub(crate) fn from_db_id(id: i64) -> Result<u64, String> {
    u64::try_from(id).map_err(|_| format!("negative id in storage: {}", id))
}
