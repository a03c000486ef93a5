use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Duration, Utc};

use teamhub_auth::{session_key, SessionRegistry};
use teamhub_core::{Clock, DomainError, DomainResult};

#[derive(Debug, Clone)]
struct Entry {
    token: String,
    expires_at: DateTime<Utc>,
}

/// In-process session registry with passive expiry.
///
/// Expired entries are invisible to `get` and are swept on the next `put`.
#[derive(Debug)]
pub struct InMemorySessionRegistry {
    entries: RwLock<HashMap<String, Entry>>,
    clock: Arc<dyn Clock>,
}

impl InMemorySessionRegistry {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
        }
    }

    /// Number of entries that have not yet expired.
    pub fn live_sessions(&self) -> usize {
        let now = self.clock.now();
        match self.entries.read() {
            Ok(map) => map.values().filter(|e| now < e.expires_at).count(),
            Err(_) => 0,
        }
    }
}

fn poisoned<T>(_: T) -> DomainError {
    DomainError::internal("session registry lock poisoned")
}

impl SessionRegistry for InMemorySessionRegistry {
    fn put(&self, identity: &str, refresh_token: &str, ttl: Duration) -> DomainResult<()> {
        let now = self.clock.now();
        let mut map = self.entries.write().map_err(poisoned)?;
        map.retain(|_, e| now < e.expires_at);
        map.insert(
            session_key(identity),
            Entry {
                token: refresh_token.to_string(),
                expires_at: now + ttl,
            },
        );
        Ok(())
    }

    fn get(&self, identity: &str) -> DomainResult<Option<String>> {
        let now = self.clock.now();
        let map = self.entries.read().map_err(poisoned)?;
        Ok(map
            .get(&session_key(identity))
            .filter(|e| now < e.expires_at)
            .map(|e| e.token.clone()))
    }

    fn delete(&self, identity: &str) -> DomainResult<()> {
        let mut map = self.entries.write().map_err(poisoned)?;
        map.remove(&session_key(identity));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teamhub_core::ManualClock;

    fn registry() -> (InMemorySessionRegistry, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::starting_now());
        (InMemorySessionRegistry::new(clock.clone()), clock)
    }

    #[test]
    fn put_overwrites_single_slot() {
        let (reg, _) = registry();
        reg.put("a@x.com", "first", Duration::days(7)).unwrap();
        reg.put("a@x.com", "second", Duration::days(7)).unwrap();

        assert_eq!(reg.get("a@x.com").unwrap().as_deref(), Some("second"));
        assert_eq!(reg.live_sessions(), 1);
    }

    #[test]
    fn entries_expire_passively() {
        let (reg, clock) = registry();
        reg.put("a@x.com", "token", Duration::days(7)).unwrap();

        clock.advance(Duration::days(7) - Duration::seconds(1));
        assert!(reg.get("a@x.com").unwrap().is_some());

        clock.advance(Duration::seconds(1));
        assert_eq!(reg.get("a@x.com").unwrap(), None);
        assert_eq!(reg.live_sessions(), 0);
    }

    #[test]
    fn delete_is_idempotent() {
        let (reg, _) = registry();
        reg.put("a@x.com", "token", Duration::days(7)).unwrap();

        reg.delete("a@x.com").unwrap();
        reg.delete("a@x.com").unwrap();
        assert_eq!(reg.get("a@x.com").unwrap(), None);
    }

    #[test]
    fn identities_are_isolated() {
        let (reg, _) = registry();
        reg.put("a@x.com", "ta", Duration::days(7)).unwrap();
        reg.put("b@x.com", "tb", Duration::days(7)).unwrap();
        reg.delete("a@x.com").unwrap();

        assert_eq!(reg.get("b@x.com").unwrap().as_deref(), Some("tb"));
    }
}
