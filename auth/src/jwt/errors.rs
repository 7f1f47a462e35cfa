use thiserror::Error;

/// Error type for session token operations.
///
/// The variants exist for diagnostics. Callers facing the network are expected
/// to collapse every verification failure into a single "unauthorized" outcome.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Token claims are invalid: {0}")]
    InvalidClaims(String),
}
