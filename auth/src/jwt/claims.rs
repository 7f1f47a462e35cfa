use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Issuer stamped into every session token.
pub const TOKEN_ISSUER: &str = "oceanlearn.tech";

/// Purpose stamped into the `sub` claim of every session token.
pub const TOKEN_PURPOSE: &str = "user token";

/// Default session lifetime in days.
pub const DEFAULT_TOKEN_LIFETIME_DAYS: i64 = 7;

/// Claims carried by a session token.
///
/// The authenticated user travels in `UserID`; `sub` holds the fixed token
/// purpose rather than the user, matching the wire format clients already parse.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Identifier of the user this session belongs to
    #[serde(rename = "UserID")]
    pub user_id: u64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Issuer
    pub iss: String,

    /// Token purpose
    pub sub: String,
}

impl SessionClaims {
    /// Create claims for a user session starting now.
    ///
    /// # Arguments
    /// * `user_id` - Identifier of the authenticated user
    /// * `lifetime` - How long the session stays valid
    pub fn for_user(user_id: u64, lifetime: Duration) -> Self {
        Self::issued_at(user_id, Utc::now(), lifetime)
    }

    /// Create claims for a user session starting at a given instant.
    pub fn issued_at(user_id: u64, issued_at: DateTime<Utc>, lifetime: Duration) -> Self {
        let expiration = issued_at + lifetime;

        Self {
            user_id,
            exp: expiration.timestamp(),
            iat: issued_at.timestamp(),
            iss: TOKEN_ISSUER.to_string(),
            sub: TOKEN_PURPOSE.to_string(),
        }
    }

}

/// Builders for forging claims the issuer never produces.
#[cfg(test)]
impl SessionClaims {
    pub(crate) fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = exp;
        self
    }

    pub(crate) fn with_issuer(mut self, iss: impl ToString) -> Self {
        self.iss = iss.to_string();
        self
    }
}
