use serde::Serialize;

use crate::Role;

/// Authenticated caller of a single request.
///
/// Built once by the request authenticator and passed explicitly to every
/// downstream call; it is never stored in shared or global state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthContext {
    identity: String,
    role: Role,
}

impl AuthContext {
    pub fn new(identity: impl Into<String>, role: Role) -> Self {
        Self {
            identity: identity.into(),
            role,
        }
    }

    /// The member's email.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn role(&self) -> Role {
        self.role
    }
}
