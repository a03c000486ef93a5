//! Member record and the credential store contract.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use teamhub_core::{DomainResult, Entity, MemberId, TeamId};

use crate::Role;

/// A registered member.
///
/// # Invariants
/// - `email` is unique across members.
/// - A member references at most one team (`team_id`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: MemberId,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: Role,
    pub team_id: Option<TeamId>,
    pub created_at: DateTime<Utc>,
}

impl Entity for Member {
    type Id = MemberId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Member row before the store assigns an id.
#[derive(Debug, Clone)]
pub struct NewMember {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Public projection of a member (never exposes the password hash).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSummary {
    pub id: MemberId,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<TeamId>,
}

impl From<&Member> for MemberSummary {
    fn from(m: &Member) -> Self {
        Self {
            id: m.id,
            email: m.email.clone(),
            name: m.name.clone(),
            role: m.role,
            team_id: m.team_id,
        }
    }
}

/// Credential store (member repository).
pub trait MemberStore: Send + Sync {
    fn find_by_identity(&self, email: &str) -> DomainResult<Option<Member>>;

    fn exists_by_identity(&self, email: &str) -> DomainResult<bool>;

    /// Persist a new member. Fails with `DuplicateIdentity` if the email is taken.
    fn save(&self, member: NewMember) -> DomainResult<Member>;

    fn find_by_id(&self, id: MemberId) -> DomainResult<Option<Member>>;

    /// All members whose team reference points at `team_id`.
    fn list_by_team(&self, team_id: TeamId) -> DomainResult<Vec<Member>>;

    fn list(&self) -> DomainResult<Vec<Member>>;

    /// Set the member's team reference if and only if it is currently empty.
    ///
    /// This compare-and-swap is what keeps concurrent joins from the same
    /// member from both succeeding; it fails with `InvalidState` otherwise.
    fn assign_team(&self, id: MemberId, team_id: TeamId) -> DomainResult<Member>;

    fn update_role(&self, email: &str, role: Role) -> DomainResult<Member>;
}

impl<S> MemberStore for Arc<S>
where
    S: MemberStore + ?Sized,
{
    fn find_by_identity(&self, email: &str) -> DomainResult<Option<Member>> {
        (**self).find_by_identity(email)
    }

    fn exists_by_identity(&self, email: &str) -> DomainResult<bool> {
        (**self).exists_by_identity(email)
    }

    fn save(&self, member: NewMember) -> DomainResult<Member> {
        (**self).save(member)
    }

    fn find_by_id(&self, id: MemberId) -> DomainResult<Option<Member>> {
        (**self).find_by_id(id)
    }

    fn list_by_team(&self, team_id: TeamId) -> DomainResult<Vec<Member>> {
        (**self).list_by_team(team_id)
    }

    fn list(&self) -> DomainResult<Vec<Member>> {
        (**self).list()
    }

    fn assign_team(&self, id: MemberId, team_id: TeamId) -> DomainResult<Member> {
        (**self).assign_team(id, team_id)
    }

    fn update_role(&self, email: &str, role: Role) -> DomainResult<Member> {
        (**self).update_role(email, role)
    }
}
