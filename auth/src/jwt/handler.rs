use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::SessionClaims;
use super::claims::TOKEN_ISSUER;
use super::claims::TOKEN_PURPOSE;
use super::errors::JwtError;
use crate::secret::CredentialSecret;

/// Session token issuer and verifier.
///
/// Tokens are compact JWTs signed with HS256 (HMAC with SHA-256): three
/// dot-separated base64url segments `header.payload.signature`.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtHandler {
    /// Create a new JWT handler bound to the deployment's credential secret.
    ///
    /// # Arguments
    /// * `secret` - Key shared by issuance and verification
    ///
    /// # Returns
    /// JwtHandler instance configured with HS256 and zero expiry leeway
    pub fn new(secret: &CredentialSecret) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_issuer(&[TOKEN_ISSUER]);
        validation.sub = Some(TOKEN_PURPOSE.to_string());
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Sign claims into a token string.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized or signed
    pub fn encode(&self, claims: &SessionClaims) -> Result<String, JwtError> {
        let header = Header::new(Algorithm::HS256);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token and return its claims.
    ///
    /// The signature is checked before anything in the payload is trusted;
    /// expiry and issuer are checked only once the signature matches.
    ///
    /// # Errors
    /// * `Malformed` - Wrong segment count, bad base64 or unparsable JSON
    /// * `InvalidSignature` - Signature does not match or the algorithm is not HS256
    /// * `Expired` - `exp` lies in the past
    /// * `InvalidClaims` - Issuer or purpose differ, or a required claim is missing
    pub fn decode(&self, token: &str) -> Result<SessionClaims, JwtError> {
        decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    JwtError::InvalidSignature
                }
                ErrorKind::ExpiredSignature => JwtError::Expired,
                ErrorKind::InvalidIssuer
                | ErrorKind::InvalidSubject
                | ErrorKind::InvalidAudience
                | ErrorKind::ImmatureSignature
                | ErrorKind::MissingRequiredClaim(_) => JwtError::InvalidClaims(e.to_string()),
                _ => JwtError::Malformed(e.to_string()),
            })
    }
}
