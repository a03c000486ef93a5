//! Auth service: sign-up, login, token reissue and logout.
//!
//! Session record lifecycle per identity:
//! absent → active (login) → active (reissue leaves the stored token as is)
//! → absent (logout or TTL expiry). A new login replaces the stored token.

use std::sync::Arc;

use serde::Serialize;

use teamhub_core::{Clock, DomainError, DomainResult};

use crate::member::{Member, MemberStore, NewMember};
use crate::password::PasswordHasher;
use crate::session::SessionRegistry;
use crate::token::{TokenCodec, TokenVerifier};
use crate::Role;

/// Sign-up input (already validated at the boundary).
#[derive(Debug, Clone)]
pub struct SignUp {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Role,
}

/// Access + refresh token pair returned by login and reissue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Clone)]
pub struct AuthService {
    members: Arc<dyn MemberStore>,
    sessions: Arc<dyn SessionRegistry>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: TokenCodec,
    clock: Arc<dyn Clock>,
}

impl AuthService {
    pub fn new(
        members: Arc<dyn MemberStore>,
        sessions: Arc<dyn SessionRegistry>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: TokenCodec,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            members,
            sessions,
            hasher,
            tokens,
            clock,
        }
    }

    pub fn tokens(&self) -> &TokenCodec {
        &self.tokens
    }

    /// Register a new member. Issues no tokens.
    pub fn sign_up(&self, req: SignUp) -> DomainResult<Member> {
        if self.members.exists_by_identity(&req.email)? {
            return Err(DomainError::duplicate_identity());
        }

        let password_hash = self.hasher.hash(&req.password)?;
        let member = self.members.save(NewMember {
            email: req.email,
            password_hash,
            name: req.name,
            role: req.role,
            created_at: self.clock.now(),
        })?;

        tracing::info!(member_id = %member.id, role = %member.role, "member signed up");
        Ok(member)
    }

    /// Verify credentials, issue a token pair and replace the identity's session.
    pub fn login(&self, email: &str, password: &str) -> DomainResult<TokenPair> {
        let member = self
            .members
            .find_by_identity(email)?
            .ok_or_else(DomainError::identity_not_found)?;

        if !self.hasher.verify(password, &member.password_hash) {
            tracing::debug!(member_id = %member.id, "login rejected: password mismatch");
            return Err(DomainError::invalid_credential());
        }

        let access_token = self.tokens.issue_access(&member.email, member.role)?;
        let refresh_token = self.tokens.issue_refresh(&member.email)?;

        self.sessions
            .put(&member.email, &refresh_token, self.tokens.ttls().refresh)?;

        tracing::info!(member_id = %member.id, "login succeeded");
        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Exchange a live refresh token for a new access token.
    ///
    /// The refresh token must byte-equal the one stored for its identity, so a
    /// token superseded by a newer login (or revoked by logout) is refused.
    /// The role is re-read from the store; the refresh token is returned as is.
    pub fn reissue(&self, refresh_token: &str) -> DomainResult<TokenPair> {
        let verified = self.tokens.parse_and_verify(refresh_token)?;

        match self.sessions.get(&verified.identity)? {
            Some(stored) if stored == refresh_token => {}
            _ => return Err(DomainError::session_not_found()),
        }

        let member = self
            .members
            .find_by_identity(&verified.identity)?
            .ok_or_else(DomainError::identity_not_found)?;

        let access_token = self.tokens.issue_access(&member.email, member.role)?;

        tracing::info!(member_id = %member.id, "access token reissued");
        Ok(TokenPair {
            access_token,
            refresh_token: refresh_token.to_string(),
        })
    }

    /// Drop the identity's session record. Idempotent.
    pub fn logout(&self, identity: &str) -> DomainResult<()> {
        self.sessions.delete(identity)?;
        tracing::info!("session closed");
        Ok(())
    }
}
