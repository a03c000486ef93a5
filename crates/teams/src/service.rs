//! Team service: role-gated creation, invite-code joins and read projections.
//!
//! Callers are identified by the [`AuthContext`] produced by the request
//! authenticator; it is passed into every operation explicitly.

use std::sync::Arc;

use serde::Serialize;

use teamhub_auth::{authorize, Action, AuthContext, Member, MemberStore, Role};
use teamhub_core::{Clock, DomainError, DomainResult, ErrorKind, TeamId};

use crate::team::{generate_invite_code, NewTeam, Team, TeamStore};

/// How many fresh invite codes to try before giving up on a create.
const INVITE_CODE_ATTEMPTS: usize = 3;

/// Team as presented to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamView {
    pub id: TeamId,
    pub name: String,
    pub invite_code: String,
    pub leader_name: String,
    pub member_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamMemberView {
    pub name: String,
    pub email: String,
}

#[derive(Clone)]
pub struct TeamService {
    teams: Arc<dyn TeamStore>,
    members: Arc<dyn MemberStore>,
    clock: Arc<dyn Clock>,
}

impl TeamService {
    pub fn new(teams: Arc<dyn TeamStore>, members: Arc<dyn MemberStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            teams,
            members,
            clock,
        }
    }

    /// LEADER only. The new team starts with no members.
    pub fn create_team(&self, ctx: &AuthContext, name: &str) -> DomainResult<TeamView> {
        authorize(ctx, Action::CreateTeam)?;
        let leader = self.caller(ctx)?;
        if leader.role != Role::Leader {
            return Err(DomainError::forbidden());
        }

        for _ in 0..INVITE_CODE_ATTEMPTS {
            let invite_code = generate_invite_code();
            if self.teams.find_by_invite_code(&invite_code)?.is_some() {
                continue;
            }

            let saved = self.teams.save(NewTeam {
                name: name.trim().to_string(),
                invite_code,
                leader_id: leader.id,
                created_at: self.clock.now(),
            });

            match saved {
                Ok(team) => {
                    tracing::info!(team_id = %team.id, leader_id = %leader.id, "team created");
                    return self.view(team);
                }
                Err(e) if e.kind() == ErrorKind::InvalidState => continue,
                Err(e) => return Err(e),
            }
        }

        Err(DomainError::internal("could not allocate a unique invite code"))
    }

    /// MEMBER only, and only while not yet on a team.
    pub fn join_team(&self, ctx: &AuthContext, invite_code: &str) -> DomainResult<TeamView> {
        authorize(ctx, Action::JoinTeam)?;
        let member = self.caller(ctx)?;
        if member.team_id.is_some() {
            return Err(DomainError::invalid_state("already a member of a team"));
        }

        let team = self
            .teams
            .find_by_invite_code(invite_code.trim())?
            .ok_or_else(|| DomainError::not_found("no team for this invite code"))?;

        self.members.assign_team(member.id, team.id)?;

        tracing::info!(team_id = %team.id, member_id = %member.id, "member joined team");
        self.view(team)
    }

    /// Leaders see the teams they lead; everyone else sees the team they are on.
    pub fn my_teams(&self, ctx: &AuthContext) -> DomainResult<Vec<TeamView>> {
        let member = self.caller(ctx)?;

        let teams = match member.role {
            Role::Leader => self.teams.list_by_leader(member.id)?,
            Role::Member | Role::Admin => match member.team_id {
                Some(team_id) => self.teams.find_by_id(team_id)?.into_iter().collect(),
                None => Vec::new(),
            },
        };

        teams.into_iter().map(|t| self.view(t)).collect()
    }

    /// Only the team's own leader may list its members.
    pub fn team_members(&self, ctx: &AuthContext, team_id: TeamId) -> DomainResult<Vec<TeamMemberView>> {
        let team = self
            .teams
            .find_by_id(team_id)?
            .ok_or_else(|| DomainError::not_found("team not found"))?;

        let caller = self.caller(ctx)?;
        if caller.id != team.leader_id {
            return Err(DomainError::forbidden());
        }

        Ok(self
            .members
            .list_by_team(team.id)?
            .into_iter()
            .map(|m| TeamMemberView {
                name: m.name,
                email: m.email,
            })
            .collect())
    }

    fn caller(&self, ctx: &AuthContext) -> DomainResult<Member> {
        self.members
            .find_by_identity(ctx.identity())?
            .ok_or_else(DomainError::identity_not_found)
    }

    fn view(&self, team: Team) -> DomainResult<TeamView> {
        let leader = self
            .members
            .find_by_id(team.leader_id)?
            .ok_or_else(|| DomainError::internal(format!("leader of team {} is missing", team.id)))?;
        let member_count = self.members.list_by_team(team.id)?.len();

        Ok(TeamView {
            id: team.id,
            name: team.name,
            invite_code: team.invite_code,
            leader_name: leader.name,
            member_count,
        })
    }
}
