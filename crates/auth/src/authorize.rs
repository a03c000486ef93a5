use thiserror::Error;

use teamhub_core::DomainError;

use crate::{AuthContext, Role};

/// Role-restricted actions.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    CreateTeam,
    JoinTeam,
    AdministerMembers,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("authentication required")]
    Unauthenticated,

    #[error("forbidden: role {role} may not perform {action:?}")]
    Forbidden { role: Role, action: Action },
}

impl From<AuthzError> for DomainError {
    fn from(err: AuthzError) -> Self {
        match err {
            AuthzError::Unauthenticated => DomainError::unauthenticated(),
            AuthzError::Forbidden { .. } => DomainError::forbidden(),
        }
    }
}

/// Pure role → action policy.
pub fn permits(role: Role, action: Action) -> bool {
    match (action, role) {
        (Action::CreateTeam, Role::Leader) => true,
        (Action::CreateTeam, Role::Admin | Role::Member) => false,
        (Action::JoinTeam, Role::Member) => true,
        (Action::JoinTeam, Role::Admin | Role::Leader) => false,
        (Action::AdministerMembers, Role::Admin) => true,
        (Action::AdministerMembers, Role::Leader | Role::Member) => false,
    }
}

/// Authorize an authenticated caller for an action.
///
/// - No IO
/// - No panics
pub fn authorize(ctx: &AuthContext, action: Action) -> Result<(), AuthzError> {
    if permits(ctx.role(), action) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden {
            role: ctx.role(),
            action,
        })
    }
}

/// Reject anonymous callers.
pub fn require_authenticated(ctx: Option<&AuthContext>) -> Result<&AuthContext, AuthzError> {
    ctx.ok_or(AuthzError::Unauthenticated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use teamhub_core::ErrorKind;

    #[test]
    fn each_action_has_exactly_one_role() {
        for action in [Action::CreateTeam, Action::JoinTeam, Action::AdministerMembers] {
            let allowed: Vec<Role> = Role::ALL.into_iter().filter(|r| permits(*r, action)).collect();
            assert_eq!(allowed.len(), 1, "{action:?}");
        }
    }

    #[test]
    fn leader_cannot_join() {
        let ctx = AuthContext::new("l@x.com", Role::Leader);
        let err = authorize(&ctx, Action::JoinTeam).unwrap_err();
        assert_eq!(DomainError::from(err).kind(), ErrorKind::Forbidden);
        assert!(authorize(&ctx, Action::CreateTeam).is_ok());
    }

    #[test]
    fn anonymous_is_unauthenticated() {
        let err = require_authenticated(None).unwrap_err();
        assert_eq!(DomainError::from(err).kind(), ErrorKind::Unauthenticated);

        let ctx = AuthContext::new("a@x.com", Role::Admin);
        assert_eq!(require_authenticated(Some(&ctx)).unwrap(), &ctx);
    }
}
