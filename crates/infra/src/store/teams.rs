use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use teamhub_core::{DomainError, DomainResult, MemberId, TeamId};
use teamhub_teams::{NewTeam, Team, TeamStore};

use super::poisoned;

#[derive(Debug, Default)]
struct TeamTable {
    last_id: i64,
    rows: BTreeMap<TeamId, Team>,
    by_code: HashMap<String, TeamId>,
}

/// In-memory team repository.
#[derive(Debug, Default)]
pub struct InMemoryTeamStore {
    inner: RwLock<TeamTable>,
}

impl InMemoryTeamStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TeamStore for InMemoryTeamStore {
    fn save(&self, team: NewTeam) -> DomainResult<Team> {
        let mut table = self.inner.write().map_err(poisoned)?;
        if table.by_code.contains_key(&team.invite_code) {
            return Err(DomainError::invalid_state("invite code already in use"));
        }

        table.last_id += 1;
        let id = TeamId::new(table.last_id);
        let row = Team {
            id,
            name: team.name,
            invite_code: team.invite_code,
            leader_id: team.leader_id,
            created_at: team.created_at,
        };

        table.by_code.insert(row.invite_code.clone(), id);
        table.rows.insert(id, row.clone());
        Ok(row)
    }

    fn find_by_id(&self, id: TeamId) -> DomainResult<Option<Team>> {
        let table = self.inner.read().map_err(poisoned)?;
        Ok(table.rows.get(&id).cloned())
    }

    fn find_by_invite_code(&self, code: &str) -> DomainResult<Option<Team>> {
        let table = self.inner.read().map_err(poisoned)?;
        Ok(table
            .by_code
            .get(code)
            .and_then(|id| table.rows.get(id))
            .cloned())
    }

    fn list_by_leader(&self, leader_id: MemberId) -> DomainResult<Vec<Team>> {
        let table = self.inner.read().map_err(poisoned)?;
        Ok(table
            .rows
            .values()
            .filter(|t| t.leader_id == leader_id)
            .cloned()
            .collect())
    }
}
