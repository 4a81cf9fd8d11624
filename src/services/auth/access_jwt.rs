use std::collections::HashSet;

use jsonwebtoken::{Algorithm, DecodingKey, Validation, errors::ErrorKind};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::services::auth::claims::ClaimSet;
use crate::services::auth::jwks::RsaPublicKey;

const BEARER_PREFIX: &str = "Bearer ";

/// RSA PKCS#1 v1.5 signatures. PSS is a different signing method and is not accepted.
pub const RSA_ALGORITHMS: [Algorithm; 3] = [Algorithm::RS256, Algorithm::RS384, Algorithm::RS512];

// Errors returned by bearer extraction + access-token verification.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("missing Authorization header")]
    MissingHeader,

    #[error("missing token")]
    MissingToken,

    #[error("unexpected signing method: {0:?}")]
    AlgorithmMismatch(Algorithm),

    #[error("malformed token: {0}")]
    MalformedToken(jsonwebtoken::errors::Error),

    #[error("signature verification failed")]
    InvalidSignature,

    #[error("token is expired")]
    Expired,

    #[error("token is not valid yet")]
    NotYetValid,

    #[error("unexpected issuer")]
    InvalidIssuer,

    #[error("missing required claim: {0}")]
    MissingClaim(String),
}

impl VerifyError {
    /// Message safe to return to the client.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::MissingHeader => "missing Authorization header",
            Self::MissingToken => "missing token",
            _ => "invalid token",
        }
    }
}

impl From<jsonwebtoken::errors::Error> for VerifyError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::InvalidSignature => Self::InvalidSignature,
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::ImmatureSignature => Self::NotYetValid,
            ErrorKind::InvalidIssuer => Self::InvalidIssuer,
            ErrorKind::MissingRequiredClaim(claim) => Self::MissingClaim(claim.clone()),
            _ => Self::MalformedToken(e),
        }
    }
}

/// Extract the token from an `Authorization` header value.
///
/// - absent or empty header => `MissingHeader`
/// - any other scheme, or nothing after `Bearer ` => `MissingToken`
pub fn bearer_token(authorization: Option<&str>) -> Result<&str, VerifyError> {
    let value = match authorization {
        Some(v) if !v.is_empty() => v,
        _ => return Err(VerifyError::MissingHeader),
    };

    match value.strip_prefix(BEARER_PREFIX) {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(VerifyError::MissingToken),
    }
}

/// RS256/384/512 access-token verifier bound to the key loaded at startup.
///
/// Temporal claims follow the library checks only when present:
/// - `exp` / `nbf` are checked if the token carries them, with no leeway
/// - no claim is required, `aud` is not validated
/// - `iss` is required and validated only after `with_issuer`
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(key: &RsaPublicKey) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.algorithms = RSA_ALGORITHMS.to_vec();
        validation.required_spec_claims = HashSet::new();
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.validate_aud = false;
        validation.leeway = 0;

        Self {
            decoding_key: key.decoding_key(),
            validation,
        }
    }

    /// Narrow the accepted algorithms. Anything outside the RSA family is dropped.
    pub fn with_algorithms(mut self, algorithms: &[Algorithm]) -> Self {
        self.validation.algorithms = algorithms
            .iter()
            .copied()
            .filter(|alg| RSA_ALGORITHMS.contains(alg))
            .collect();
        self
    }

    /// Require `iss` and check it against `issuer`.
    pub fn with_issuer(mut self, issuer: &str) -> Self {
        self.validation.set_issuer(&[issuer]);
        self.validation.required_spec_claims.insert("iss".to_string());
        self
    }

    /// Verify a raw JWT and return its claims.
    pub fn verify(&self, token: &str) -> Result<ClaimSet, VerifyError> {
        let header = jsonwebtoken::decode_header(token).map_err(VerifyError::MalformedToken)?;

        // Reject before touching the key, so HMAC tokens can never be checked against it.
        if !self.validation.algorithms.contains(&header.alg) {
            return Err(VerifyError::AlgorithmMismatch(header.alg));
        }

        let data = jsonwebtoken::decode::<Map<String, Value>>(
            token,
            &self.decoding_key,
            &self.validation,
        )?;

        Ok(ClaimSet::new(data.claims))
    }

    /// Bearer extraction + verification, as done for each protected request.
    pub fn verify_authorization(
        &self,
        authorization: Option<&str>,
    ) -> Result<ClaimSet, VerifyError> {
        let token = bearer_token(authorization)?;
        self.verify(token)
    }
}
