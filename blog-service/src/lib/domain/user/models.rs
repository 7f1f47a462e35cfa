use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::PasswordPolicyError;
use crate::user::errors::TelephoneError;
use crate::user::errors::UserNameError;

/// User aggregate entity.
///
/// Represents a registered account. The id is assigned by storage.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: UserName,
    pub telephone: Telephone,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name value type
///
/// At most 20 characters. Registration without a name gets a random one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    const MAX_LENGTH: usize = 20;
    const GENERATED_LENGTH: usize = 10;

    /// Create a new valid name.
    ///
    /// # Errors
    /// * `TooLong` - Name longer than 20 characters
    pub fn new(name: String) -> Result<Self, UserNameError> {
        let length = name.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(UserNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        Ok(Self(name))
    }

    /// Use the given name, or generate a random 10 character one when it is
    /// missing or blank.
    pub fn or_generated(name: Option<String>) -> Result<Self, UserNameError> {
        match name.filter(|n| !n.trim().is_empty()) {
            Some(name) => Self::new(name),
            None => Ok(Self::generated()),
        }
    }

    fn generated() -> Self {
        let mut name = Uuid::new_v4().simple().to_string();
        name.truncate(Self::GENERATED_LENGTH);
        Self(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Telephone number value type
///
/// Exactly 11 ASCII digits. Unique per account and used as the login name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Telephone(String);

impl Telephone {
    const LENGTH: usize = 11;

    /// Create a new validated telephone number.
    ///
    /// # Errors
    /// * `WrongLength` - Not exactly 11 characters
    /// * `InvalidCharacters` - Contains anything but ASCII digits
    pub fn new(telephone: String) -> Result<Self, TelephoneError> {
        let length = telephone.chars().count();
        if length != Self::LENGTH {
            return Err(TelephoneError::WrongLength {
                expected: Self::LENGTH,
                actual: length,
            });
        }
        if !telephone.chars().all(|c| c.is_ascii_digit()) {
            return Err(TelephoneError::InvalidCharacters);
        }
        Ok(Self(telephone))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Telephone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password as submitted by the client.
///
/// Only the length policy is checked here; the value is hashed by the service
/// and never stored. `Debug` output hides the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 6;

    /// # Errors
    /// * `TooShort` - Fewer than 6 characters
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        let length = password.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        Ok(Self(password))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// User data handed to storage on registration, before an id exists.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: UserName,
    pub telephone: Telephone,
    pub password_hash: String,
}

/// Command to register a new account
#[derive(Debug)]
pub struct RegisterCommand {
    pub name: UserName,
    pub telephone: Telephone,
    pub password: Password,
}

/// Command to log in with telephone and password
#[derive(Debug)]
pub struct LoginCommand {
    pub telephone: Telephone,
    pub password: Password,
}

/// A user together with a freshly issued session token.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_telephone_validation() {
        assert!(Telephone::new("13800138000".to_string()).is_ok());
        assert_eq!(
            Telephone::new("1380013800".to_string()),
            Err(TelephoneError::WrongLength {
                expected: 11,
                actual: 10
            })
        );
        assert_eq!(
            Telephone::new("1380013800a".to_string()),
            Err(TelephoneError::InvalidCharacters)
        );
    }

    #[test]
    fn test_password_minimum_length() {
        assert!(Password::new("secret".to_string()).is_ok());
        assert_eq!(
            Password::new("short".to_string()),
            Err(PasswordPolicyError::TooShort { min: 6, actual: 5 })
        );
    }

    #[test]
    fn test_password_debug_is_redacted() {
        let password = Password::new("hunter22".to_string()).unwrap();
        assert!(!format!("{:?}", password).contains("hunter22"));
    }

    #[test]
    fn test_name_generated_when_missing() {
        let generated = UserName::or_generated(None).unwrap();
        assert_eq!(generated.as_str().len(), 10);

        let blank = UserName::or_generated(Some("   ".to_string())).unwrap();
        assert_eq!(blank.as_str().len(), 10);
        assert_ne!(generated, blank);

        let given = UserName::or_generated(Some("alice".to_string())).unwrap();
        assert_eq!(given.as_str(), "alice");
    }

    #[test]
    fn test_name_too_long() {
        let result = UserName::new("a".repeat(21));
        assert_eq!(result, Err(UserNameError::TooLong { max: 20, actual: 21 }));
    }
}
