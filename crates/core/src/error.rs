//! Domain error model.
//!
//! Every failure the services can report is a [`DomainError`]: a closed
//! [`ErrorKind`] plus a human-readable message. Boundary layers translate the
//! kind into a transport status; the message is safe to show to callers except
//! for [`ErrorKind::InternalError`].

use serde::Serialize;
use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Closed set of failure kinds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Sign-up with an email that is already registered.
    DuplicateIdentity,
    /// No member exists for the given identity.
    IdentityNotFound,
    /// Password verification failed.
    InvalidCredential,
    /// Role or ownership mismatch.
    Forbidden,
    /// Token is malformed, badly signed or misses required claims.
    TokenInvalid,
    /// Token is past its expiry.
    TokenExpired,
    /// No live session record matches the presented refresh token.
    SessionNotFound,
    /// The operation conflicts with the current state (e.g. already on a team).
    InvalidState,
    /// A referenced resource does not exist.
    NotFound,
    /// Malformed input.
    ValidationFailed,
    /// The caller is anonymous but the resource requires authentication.
    Unauthenticated,
    /// Anything unanticipated.
    InternalError,
}

impl ErrorKind {
    pub fn default_message(self) -> &'static str {
        match self {
            ErrorKind::DuplicateIdentity => "email is already in use",
            ErrorKind::IdentityNotFound => "member does not exist",
            ErrorKind::InvalidCredential => "password does not match",
            ErrorKind::Forbidden => "access denied",
            ErrorKind::TokenInvalid => "invalid token",
            ErrorKind::TokenExpired => "token has expired",
            ErrorKind::SessionNotFound => "no active session for this token",
            ErrorKind::InvalidState => "invalid state for this operation",
            ErrorKind::NotFound => "resource not found",
            ErrorKind::ValidationFailed => "invalid input",
            ErrorKind::Unauthenticated => "authentication required",
            ErrorKind::InternalError => "internal server error",
        }
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(self, f)
    }
}

/// Domain-level error: a kind and a message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct DomainError {
    kind: ErrorKind,
    message: String,
}

impl DomainError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn duplicate_identity() -> Self {
        ErrorKind::DuplicateIdentity.into()
    }

    pub fn identity_not_found() -> Self {
        ErrorKind::IdentityNotFound.into()
    }

    pub fn invalid_credential() -> Self {
        ErrorKind::InvalidCredential.into()
    }

    pub fn forbidden() -> Self {
        ErrorKind::Forbidden.into()
    }

    pub fn token_invalid(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::TokenInvalid, msg)
    }

    pub fn token_expired() -> Self {
        ErrorKind::TokenExpired.into()
    }

    pub fn session_not_found() -> Self {
        ErrorKind::SessionNotFound.into()
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidState, msg)
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, msg)
    }

    /// Validation failure for a single field, rendered as `field: message`.
    pub fn validation(field: &str, msg: impl AsRef<str>) -> Self {
        Self::new(
            ErrorKind::ValidationFailed,
            format!("{field}: {}", msg.as_ref()),
        )
    }

    pub fn unauthenticated() -> Self {
        ErrorKind::Unauthenticated.into()
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::InternalError, msg)
    }
}

impl From<ErrorKind> for DomainError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind, kind.default_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_conversion_uses_default_message() {
        let err = DomainError::from(ErrorKind::Forbidden);
        assert_eq!(err.kind(), ErrorKind::Forbidden);
        assert_eq!(err.message(), "access denied");
        assert_eq!(err.to_string(), "Forbidden: access denied");
    }

    #[test]
    fn validation_message_names_the_field() {
        let err = DomainError::validation("email", "must not be blank");
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
        assert_eq!(err.message(), "email: must not be blank");
    }

    #[test]
    fn kinds_serialize_as_screaming_snake_case() {
        let json = serde_json::to_string(&ErrorKind::SessionNotFound).unwrap();
        assert_eq!(json, "\"SESSION_NOT_FOUND\"");
    }
}
