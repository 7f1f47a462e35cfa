pub mod claims;
pub mod errors;
pub mod handler;

pub use claims::SessionClaims;
pub use claims::DEFAULT_TOKEN_LIFETIME_DAYS;
pub use claims::TOKEN_ISSUER;
pub use claims::TOKEN_PURPOSE;
pub use errors::JwtError;
pub use handler::JwtHandler;
