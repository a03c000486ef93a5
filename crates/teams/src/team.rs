use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use teamhub_core::{DomainResult, Entity, MemberId, TeamId};

pub const INVITE_CODE_LEN: usize = 8;

/// A team.
///
/// # Invariants
/// - `leader_id` always references a member with role LEADER.
/// - `invite_code` is unique and never changes after creation.
///
/// Membership is not stored here: members point at the team through their own
/// `team_id`, and the member list is a query over that back-reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub invite_code: String,
    pub leader_id: MemberId,
    pub created_at: DateTime<Utc>,
}

impl Entity for Team {
    type Id = TeamId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[derive(Debug, Clone)]
pub struct NewTeam {
    pub name: String,
    pub invite_code: String,
    pub leader_id: MemberId,
    pub created_at: DateTime<Utc>,
}

/// Short uppercase code drawn from a random UUID (statistically unique only).
pub fn generate_invite_code() -> String {
    let mut code = Uuid::new_v4().simple().to_string();
    code.truncate(INVITE_CODE_LEN);
    code.to_ascii_uppercase()
}

/// Team repository.
pub trait TeamStore: Send + Sync {
    /// Persist a new team. Fails with `InvalidState` if the invite code is taken.
    fn save(&self, team: NewTeam) -> DomainResult<Team>;

    fn find_by_id(&self, id: TeamId) -> DomainResult<Option<Team>>;

    fn find_by_invite_code(&self, code: &str) -> DomainResult<Option<Team>>;

    fn list_by_leader(&self, leader_id: MemberId) -> DomainResult<Vec<Team>>;
}

impl<S> TeamStore for Arc<S>
where
    S: TeamStore + ?Sized,
{
    fn save(&self, team: NewTeam) -> DomainResult<Team> {
        (**self).save(team)
    }

    fn find_by_id(&self, id: TeamId) -> DomainResult<Option<Team>> {
        (**self).find_by_id(id)
    }

    fn find_by_invite_code(&self, code: &str) -> DomainResult<Option<Team>> {
        (**self).find_by_invite_code(code)
    }

    fn list_by_leader(&self, leader_id: MemberId) -> DomainResult<Vec<Team>> {
        (**self).list_by_leader(leader_id)
    }
}
