use std::fmt;

use thiserror::Error;

/// Error type for credential secret construction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SecretError {
    #[error("Credential secret must not be empty")]
    Empty,
}

/// Symmetric key used to sign and verify session tokens.
///
/// Built once at startup from configuration and shared read-only for the
/// lifetime of the process. The key bytes never appear in `Debug` output.
#[derive(Clone)]
pub struct CredentialSecret(Vec<u8>);

impl CredentialSecret {
    /// Create a secret from raw key bytes.
    ///
    /// # Errors
    /// * `Empty` - No key bytes were provided
    pub fn new(key: impl Into<Vec<u8>>) -> Result<Self, SecretError> {
        let key = key.into();
        if key.is_empty() {
            return Err(SecretError::Empty);
        }
        Ok(Self(key))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for CredentialSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CredentialSecret(<redacted>)")
    }
}
