use std::sync::Arc;

use auth::SessionClaims;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Maps verified session claims back to a live user record.
///
/// The lookup happens on every call; nothing is cached, so a user deleted
/// after the token was issued no longer resolves.
#[derive(Clone)]
pub struct IdentityResolver {
    users: Arc<dyn UserRepository>,
}

impl IdentityResolver {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Look up the user named by the claims' subject.
    ///
    /// # Returns
    /// `None` when no such user exists
    ///
    /// # Errors
    /// * `DatabaseError` - Storage lookup failed
    pub async fn resolve(&self, claims: &SessionClaims) -> Result<Option<User>, UserError> {
        self.users.find_by_id(UserId(claims.user_id)).await
    }
}
