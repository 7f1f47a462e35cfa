use chrono::Duration;

use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::SessionClaims;
use crate::jwt::DEFAULT_TOKEN_LIFETIME_DAYS;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::secret::CredentialSecret;

/// Authentication coordinator combining password verification and session tokens.
///
/// Holds the only copy of the signing keys; share it behind an `Arc`.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    token_lifetime: Duration,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// Signed session token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator with the default hasher and a 7 day session lifetime.
    ///
    /// # Arguments
    /// * `secret` - Key for token signing and verification
    pub fn new(secret: &CredentialSecret) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(secret),
            token_lifetime: Duration::days(DEFAULT_TOKEN_LIFETIME_DAYS),
        }
    }

    /// Replace the password hasher (e.g. to apply a configured work factor).
    pub fn with_password_hasher(mut self, password_hasher: PasswordHasher) -> Self {
        self.password_hasher = password_hasher;
        self
    }

    /// Override how long issued sessions stay valid.
    pub fn with_token_lifetime(mut self, token_lifetime: Duration) -> Self {
        self.token_lifetime = token_lifetime;
        self
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and issue a session token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `user_id` - User the session is issued for
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: u64,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.issue_token(user_id)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Issue a session token without password verification.
    ///
    /// Used right after registration, when the password was just hashed.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn issue_token(&self, user_id: u64) -> Result<String, JwtError> {
        let claims = SessionClaims::for_user(user_id, self.token_lifetime);
        self.jwt_handler.encode(&claims)
    }

    /// Verify a session token and return its claims.
    ///
    /// Never consults any user store: a valid token for a deleted user still
    /// verifies here.
    ///
    /// # Errors
    /// * `JwtError` - Token is malformed, forged, expired, or carries foreign claims
    pub fn validate_token(&self, token: &str) -> Result<SessionClaims, JwtError> {
        self.jwt_handler.decode(token)
    }
}
