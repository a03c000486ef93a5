use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use teamhub_core::DomainError;

use crate::Role;

/// Claims carried inside a signed token.
///
/// Access tokens carry `role`; refresh tokens carry the identity only.
/// Timestamps are encoded as Unix seconds (standard `iat` / `exp`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the member's email.
    pub sub: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,

    #[serde(with = "chrono::serde::ts_seconds")]
    pub iat: DateTime<Utc>,

    #[serde(with = "chrono::serde::ts_seconds")]
    pub exp: DateTime<Utc>,

    /// Unique per issued token.
    pub jti: Uuid,
}

/// Verified token contents handed to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    pub identity: String,
    pub role: Option<Role>,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl From<TokenClaims> for VerifiedToken {
    fn from(claims: TokenClaims) -> Self {
        Self {
            identity: claims.sub,
            role: claims.role,
            issued_at: claims.iat,
            expires_at: claims.exp,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("invalid token: {0}")]
    Invalid(String),
}

impl From<TokenValidationError> for DomainError {
    fn from(err: TokenValidationError) -> Self {
        match err {
            TokenValidationError::Expired => DomainError::token_expired(),
            TokenValidationError::Invalid(msg) => DomainError::token_invalid(msg),
        }
    }
}

/// Deterministically validate decoded claims against `now`.
///
/// Signature verification happens before this is called.
pub fn validate_claims(claims: &TokenClaims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    if claims.sub.is_empty() {
        return Err(TokenValidationError::Invalid("empty subject".to_string()));
    }
    if claims.exp <= claims.iat {
        return Err(TokenValidationError::Invalid(
            "expiry is not after issued-at".to_string(),
        ));
    }
    if now >= claims.exp {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn claims(now: DateTime<Utc>) -> TokenClaims {
        TokenClaims {
            sub: "a@x.com".to_string(),
            role: Some(Role::Member),
            iat: now,
            exp: now + Duration::minutes(30),
            jti: Uuid::now_v7(),
        }
    }

    #[test]
    fn valid_inside_window() {
        let now = Utc::now();
        assert_eq!(validate_claims(&claims(now), now), Ok(()));
    }

    #[test]
    fn expiry_instant_is_already_expired() {
        let now = Utc::now();
        let c = claims(now);
        assert_eq!(validate_claims(&c, c.exp), Err(TokenValidationError::Expired));
    }

    #[test]
    fn inverted_window_is_invalid() {
        let now = Utc::now();
        let mut c = claims(now);
        c.exp = c.iat;
        assert!(matches!(
            validate_claims(&c, now),
            Err(TokenValidationError::Invalid(_))
        ));
    }

    #[test]
    fn refresh_claims_omit_role_on_the_wire() {
        let mut c = claims(Utc::now());
        c.role = None;
        let json = serde_json::to_value(&c).unwrap();
        assert!(json.get("role").is_none());
        assert!(json["iat"].is_i64());
    }
}
