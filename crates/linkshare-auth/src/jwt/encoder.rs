//! Session token creation for development and tests.

use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use linkshare_core::config::AuthConfig;
use linkshare_core::error::AppError;
use linkshare_entity::identity::UserRole;

use super::claims::Claims;

/// Creates signed session tokens compatible with [`JwtDecoder`](super::JwtDecoder).
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Token TTL.
    ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder").field("ttl", &self.ttl).finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl: Duration::minutes(config.access_ttl_minutes as i64),
        }
    }

    /// Issues a token with the configured TTL.
    pub fn issue(
        &self,
        user_id: Uuid,
        email: Option<&str>,
        role: UserRole,
    ) -> Result<String, AppError> {
        self.issue_with_ttl(user_id, email, role, self.ttl)
    }

    /// Issues a token valid for `ttl` (negative values give an expired token).
    pub fn issue_with_ttl(
        &self,
        user_id: Uuid,
        email: Option<&str>,
        role: UserRole,
        ttl: Duration,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            email: email.map(str::to_string),
            role,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode session token: {e}")))
    }
}
