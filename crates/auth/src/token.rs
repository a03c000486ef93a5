//! Token codec: issues and verifies HS256-signed bearer tokens.
//!
//! Tokens are standard compact JWTs. Expiry is checked against the injected
//! [`Clock`] rather than by the JWT library, so time can be simulated.

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use teamhub_core::{Clock, DomainError, DomainResult};

use crate::claims::{validate_claims, TokenClaims, TokenValidationError, VerifiedToken};
use crate::Role;

/// Verification side of the codec, as consumed by the request authenticator.
pub trait TokenVerifier: Send + Sync {
    /// Verify signature, structure and expiry.
    fn parse_and_verify(&self, token: &str) -> Result<VerifiedToken, TokenValidationError>;

    /// Like [`TokenVerifier::parse_and_verify`], but also requires the `role` claim.
    fn parse_access(&self, token: &str) -> Result<(VerifiedToken, Role), TokenValidationError> {
        let verified = self.parse_and_verify(token)?;
        match verified.role {
            Some(role) => Ok((verified, role)),
            None => Err(TokenValidationError::Invalid("missing role claim".to_string())),
        }
    }
}

/// Token lifetimes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TokenTtls {
    pub access: Duration,
    pub refresh: Duration,
}

impl Default for TokenTtls {
    fn default() -> Self {
        Self {
            access: Duration::minutes(30),
            refresh: Duration::days(7),
        }
    }
}

/// HS256 issuer/verifier sharing one process-wide secret.
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttls: TokenTtls,
    clock: Arc<dyn Clock>,
}

impl core::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("ttls", &self.ttls)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    /// The secret should carry at least 256 bits of entropy; this is not checked here.
    pub fn new(secret: &[u8], ttls: TokenTtls, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttls,
            clock,
        }
    }

    pub fn ttls(&self) -> TokenTtls {
        self.ttls
    }

    pub fn issue_access(&self, identity: &str, role: Role) -> DomainResult<String> {
        self.issue(identity, Some(role), self.ttls.access)
    }

    pub fn issue_refresh(&self, identity: &str) -> DomainResult<String> {
        self.issue(identity, None, self.ttls.refresh)
    }

    fn issue(&self, identity: &str, role: Option<Role>, ttl: Duration) -> DomainResult<String> {
        let now = self.clock.now();
        let claims = TokenClaims {
            sub: identity.to_string(),
            role,
            iat: now,
            exp: now + ttl,
            jti: Uuid::now_v7(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| DomainError::internal(format!("token signing failed: {e}")))
    }
}

impl TokenVerifier for TokenCodec {
    fn parse_and_verify(&self, token: &str) -> Result<VerifiedToken, TokenValidationError> {
        let data = jsonwebtoken::decode::<TokenClaims>(token, &self.decoding, &self.validation)
            .map_err(|e| TokenValidationError::Invalid(e.to_string()))?;

        validate_claims(&data.claims, self.clock.now())?;
        Ok(data.claims.into())
    }
}
