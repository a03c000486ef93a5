use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use teamhub_auth::{Member, MemberStore, NewMember, Role};
use teamhub_core::{DomainError, DomainResult, MemberId, TeamId};

use super::poisoned;

#[derive(Debug, Default)]
struct MemberTable {
    last_id: i64,
    rows: BTreeMap<MemberId, Member>,
    by_email: HashMap<String, MemberId>,
}

/// In-memory credential store.
#[derive(Debug, Default)]
pub struct InMemoryMemberStore {
    inner: RwLock<MemberTable>,
}

impl InMemoryMemberStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MemberStore for InMemoryMemberStore {
    fn find_by_identity(&self, email: &str) -> DomainResult<Option<Member>> {
        let table = self.inner.read().map_err(poisoned)?;
        Ok(table
            .by_email
            .get(email)
            .and_then(|id| table.rows.get(id))
            .cloned())
    }

    fn exists_by_identity(&self, email: &str) -> DomainResult<bool> {
        let table = self.inner.read().map_err(poisoned)?;
        Ok(table.by_email.contains_key(email))
    }

    fn save(&self, member: NewMember) -> DomainResult<Member> {
        let mut table = self.inner.write().map_err(poisoned)?;
        if table.by_email.contains_key(&member.email) {
            return Err(DomainError::duplicate_identity());
        }

        table.last_id += 1;
        let id = MemberId::new(table.last_id);
        let row = Member {
            id,
            email: member.email,
            password_hash: member.password_hash,
            name: member.name,
            role: member.role,
            team_id: None,
            created_at: member.created_at,
        };

        table.by_email.insert(row.email.clone(), id);
        table.rows.insert(id, row.clone());
        Ok(row)
    }

    fn find_by_id(&self, id: MemberId) -> DomainResult<Option<Member>> {
        let table = self.inner.read().map_err(poisoned)?;
        Ok(table.rows.get(&id).cloned())
    }

    fn list_by_team(&self, team_id: TeamId) -> DomainResult<Vec<Member>> {
        let table = self.inner.read().map_err(poisoned)?;
        Ok(table
            .rows
            .values()
            .filter(|m| m.team_id == Some(team_id))
            .cloned()
            .collect())
    }

    fn list(&self) -> DomainResult<Vec<Member>> {
        let table = self.inner.read().map_err(poisoned)?;
        Ok(table.rows.values().cloned().collect())
    }

    fn assign_team(&self, id: MemberId, team_id: TeamId) -> DomainResult<Member> {
        let mut table = self.inner.write().map_err(poisoned)?;
        let row = table
            .rows
            .get_mut(&id)
            .ok_or_else(DomainError::identity_not_found)?;

        if row.team_id.is_some() {
            return Err(DomainError::invalid_state("already a member of a team"));
        }
        row.team_id = Some(team_id);
        Ok(row.clone())
    }

    fn update_role(&self, email: &str, role: Role) -> DomainResult<Member> {
        let mut table = self.inner.write().map_err(poisoned)?;
        let id = *table
            .by_email
            .get(email)
            .ok_or_else(DomainError::identity_not_found)?;
        let row = table
            .rows
            .get_mut(&id)
            .ok_or_else(DomainError::identity_not_found)?;

        row.role = role;
        Ok(row.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use teamhub_core::ErrorKind;

    fn new_member(email: &str, role: Role) -> NewMember {
        NewMember {
            email: email.to_string(),
            password_hash: "$argon2id$stub".to_string(),
            name: "Someone".to_string(),
            role,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn ids_are_sequential_and_emails_unique() {
        let store = InMemoryMemberStore::new();
        let a = store.save(new_member("a@x.com", Role::Leader)).unwrap();
        let b = store.save(new_member("b@x.com", Role::Member)).unwrap();
        assert_eq!(a.id, MemberId::new(1));
        assert_eq!(b.id, MemberId::new(2));

        let err = store.save(new_member("a@x.com", Role::Member)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateIdentity);
        assert!(store.exists_by_identity("a@x.com").unwrap());
        assert!(!store.exists_by_identity("c@x.com").unwrap());
    }

    #[test]
    fn assign_team_is_compare_and_swap() {
        let store = InMemoryMemberStore::new();
        let m = store.save(new_member("b@x.com", Role::Member)).unwrap();

        let joined = store.assign_team(m.id, TeamId::new(1)).unwrap();
        assert_eq!(joined.team_id, Some(TeamId::new(1)));

        let err = store.assign_team(m.id, TeamId::new(2)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        assert_eq!(
            store.find_by_id(m.id).unwrap().unwrap().team_id,
            Some(TeamId::new(1))
        );
        assert_eq!(store.list_by_team(TeamId::new(1)).unwrap().len(), 1);
        assert!(store.list_by_team(TeamId::new(2)).unwrap().is_empty());
    }

    #[test]
    fn update_role_requires_existing_member() {
        let store = InMemoryMemberStore::new();
        store.save(new_member("a@x.com", Role::Member)).unwrap();

        let updated = store.update_role("a@x.com", Role::Leader).unwrap();
        assert_eq!(updated.role, Role::Leader);

        let err = store.update_role("nobody@x.com", Role::Leader).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IdentityNotFound);
    }
}
