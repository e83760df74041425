//! Signed Bearer Tokens
//!
//! HS256 JWT issuance and validation. The signing secret is decoded with a
//! priority of hex, then base64, then raw UTF-8 bytes, and must be at least
//! 256 bits after decoding.
//!
//! Note: the hex detection is a heuristic. An operator-supplied base64
//! secret that happens to contain only hex digits (even length) is decoded
//! as hex. This matches the documented configuration contract.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum decoded secret length (256 bits)
pub const MIN_SECRET_BYTES: usize = 32;

/// Token errors
#[derive(Debug, Error)]
pub enum TokenError {
    /// Secret is empty or whitespace
    #[error("Token secret must not be empty")]
    EmptySecret,

    /// Secret decodes to fewer than 256 bits
    #[error("Token secret too short ({bits} bits); provide at least a 256-bit secret")]
    WeakSecret { bits: usize },

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Signature does not verify
    #[error("Invalid token signature")]
    InvalidSignature,

    /// Malformed or otherwise invalid token
    #[error("Invalid token: {0}")]
    Invalid(String),

    /// Token could not be generated
    #[error("Token generation failed: {0}")]
    GenerationFailed(String),
}

/// Claims embedded in issued tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (the authenticated principal)
    pub sub: String,
    /// Unique token id; keeps tokens issued within the same second
    /// distinct so replacing one never aliases another
    pub jti: String,
    /// Issued-at timestamp (seconds)
    pub iat: i64,
    /// Expiry timestamp (seconds)
    pub exp: i64,
}

/// Decode a configured signing secret.
///
/// Priority:
/// 1. Hex - even length, only `[0-9a-fA-F]`
/// 2. Base64 (standard alphabet)
/// 3. Raw UTF-8 bytes (fallback)
pub fn decode_secret(value: &str) -> Result<Vec<u8>, TokenError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TokenError::EmptySecret);
    }

    if trimmed.len() % 2 == 0 && trimmed.bytes().all(|b| b.is_ascii_hexdigit()) {
        // Infallible after the character check above
        return hex::decode(trimmed).map_err(|e| TokenError::Invalid(e.to_string()));
    }

    match BASE64.decode(trimmed) {
        Ok(bytes) => Ok(bytes),
        Err(_) => Ok(trimmed.as_bytes().to_vec()),
    }
}

/// Token issuance and validation service
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    /// Build a service from a configured secret string and token TTL.
    ///
    /// Refuses to construct when the decoded secret is weaker than 256 bits.
    pub fn from_secret(secret: &str, ttl_ms: i64) -> Result<Self, TokenError> {
        let key_bytes = decode_secret(secret)?;

        if key_bytes.len() < MIN_SECRET_BYTES {
            return Err(TokenError::WeakSecret {
                bits: key_bytes.len() * 8,
            });
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(&key_bytes),
            decoding_key: DecodingKey::from_secret(&key_bytes),
            ttl: Duration::milliseconds(ttl_ms),
        })
    }

    /// Issue a signed token for the given subject.
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            jti: uuid::Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TokenError::GenerationFailed(e.to_string()))
    }

    /// Validate a token and return its subject.
    ///
    /// Fails with [`TokenError::Expired`] past the expiry timestamp and with
    /// [`TokenError::InvalidSignature`] when the signature does not verify.
    pub fn subject(&self, token: &str) -> Result<String, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "exp", "iat"]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Invalid(e.to_string()),
            }
        })?;

        Ok(data.claims.sub)
    }

    /// Whether a token fails validation specifically because it expired.
    pub fn is_expired(&self, token: &str) -> bool {
        matches!(self.subject(token), Err(TokenError::Expired))
    }

    /// Token TTL in milliseconds
    pub fn ttl_ms(&self) -> i64 {
        self.ttl.num_milliseconds()
    }

    /// Extract the raw token from an `Authorization` header value.
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }
}
