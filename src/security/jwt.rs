/// Session token generation and validation using HS256
///
/// Tokens assert a user id through the `sub` claim. By default they carry
/// no expiry; setting a token lifetime in configuration adds and enforces
/// the `exp` claim.
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, Result};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp); absent for non-expiring sessions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

/// Signing and validation keys for session tokens.
///
/// Built once at startup from the configured secret and shared with
/// handlers through app data.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiry: Option<Duration>,
}

impl SessionKeys {
    pub fn new(secret: &str, expiry_hours: Option<i64>) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expiry: expiry_hours.map(Duration::hours),
        }
    }

    /// Issue a session token bound to a user id
    pub fn issue(&self, user_id: Uuid) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: self.expiry.map(|ttl| (now + ttl).timestamp()),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("Failed to sign session token: {}", e)))
    }

    /// Validate a session token and return the user id it asserts
    pub fn verify(&self, token: &str) -> Result<Uuid> {
        let mut validation = Validation::default();
        if self.expiry.is_none() {
            validation.required_spec_claims.clear();
            validation.validate_exp = false;
        }

        let token_data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            tracing::debug!("Token validation failed: {}", e);
            AppError::Authentication("Invalid or expired token".to_string())
        })?;

        Uuid::parse_str(&token_data.claims.sub)
            .map_err(|_| AppError::Authentication("Invalid user ID in token".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_round_trips_to_the_same_user() {
        let keys = SessionKeys::new("test-secret", None);
        let user_id = Uuid::new_v4();

        let token = keys.issue(user_id).unwrap();
        assert_eq!(keys.verify(&token).unwrap(), user_id);
    }

    #[test]
    fn default_tokens_carry_no_expiry() {
        let keys = SessionKeys::new("test-secret", None);
        let token = keys.issue(Uuid::new_v4()).unwrap();

        let mut validation = Validation::default();
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        let decoded = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &validation,
        )
        .unwrap();
        assert!(decoded.claims.exp.is_none());
    }

    #[test]
    fn configured_expiry_is_embedded() {
        let keys = SessionKeys::new("test-secret", Some(2));
        let token = keys.issue(Uuid::new_v4()).unwrap();

        let decoded = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &Validation::default(),
        )
        .unwrap();
        let exp = decoded.claims.exp.unwrap();
        assert!(exp > Utc::now().timestamp());
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let keys = SessionKeys::new("test-secret", None);
        let other = SessionKeys::new("other-secret", None);

        let token = other.issue(Uuid::new_v4()).unwrap();
        assert!(keys.verify(&token).is_err());
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        let keys = SessionKeys::new("test-secret", None);
        assert!(keys.verify("not-a-jwt").is_err());
        assert!(keys.verify("").is_err());
    }
}
