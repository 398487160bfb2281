use crate::types::{AppError, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};

/// Default token lifetime: one hour.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

/// Claims carried by a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Identity of the authenticated user
    pub id: i64,
    /// Issued-at, seconds since the epoch
    pub iat: i64,
    /// Expires-at, seconds since the epoch
    pub exp: i64,
}

/// Why a token was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,
}

/// Issues and verifies HS256-signed, time-limited bearer tokens.
///
/// Stateless: any instance holding the same secret verifies tokens issued by
/// any other instance. Nothing is revoked server-side.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    /// Creates a new TokenService.
    ///
    /// # Arguments
    /// * `secret` - Signing secret, resolved from configuration
    /// * `ttl_secs` - Token validity in seconds
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::seconds(ttl_secs),
        }
    }

    /// Issues a token for `subject_id`, valid from now for the configured TTL.
    pub fn issue(&self, subject_id: i64) -> Result<String> {
        self.issue_at(subject_id, Utc::now())
    }

    /// Issues a token as if the current time were `issued_at`.
    pub fn issue_at(&self, subject_id: i64, issued_at: DateTime<Utc>) -> Result<String> {
        let claims = Claims {
            id: subject_id,
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
    }

    /// Verifies signature and expiry and returns the claims.
    pub fn verify_and_decode(&self, token: &str) -> std::result::Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat"]);

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            })?;

        // The library accepts exp == now; a token is dead at its expiry second.
        if claims.exp <= Utc::now().timestamp() {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    /// Predicate form of [`verify_and_decode`](Self::verify_and_decode).
    pub fn verify(&self, token: &str) -> bool {
        self.verify_and_decode(token).is_ok()
    }
}
