//! Authentication utilities library
//!
//! Provides the credential primitives used by the blog service:
//! - Credential secret (process-wide signing key)
//! - Password hashing (Argon2id)
//! - Session token issuance and verification (HS256 JWT)
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{CredentialSecret, JwtHandler, SessionClaims};
//! use chrono::Duration;
//!
//! let secret = CredentialSecret::new("secret_key_at_least_32_bytes_long!").unwrap();
//! let handler = JwtHandler::new(&secret);
//! let claims = SessionClaims::for_user(42, Duration::days(7));
//! let token = handler.encode(&claims).unwrap();
//! let decoded = handler.decode(&token).unwrap();
//! assert_eq!(decoded.user_id, 42);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, CredentialSecret};
//!
//! let secret = CredentialSecret::new("secret_key_at_least_32_bytes_long!").unwrap();
//! let auth = Authenticator::new(&secret);
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let result = auth.authenticate("password123", &hash, 42).unwrap();
//!
//! // Later requests: verify token
//! let claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(claims.user_id, 42);
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;
pub mod secret;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::SessionClaims;
pub use password::PasswordCost;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use secret::CredentialSecret;
pub use secret::SecretError;
