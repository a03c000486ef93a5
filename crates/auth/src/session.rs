//! Session registry contract.
//!
//! The registry is the only source of truth for refresh-token revocation: it
//! holds at most one refresh token per identity, keyed `RT:<identity>`.

use std::sync::Arc;

use chrono::Duration;

use teamhub_core::DomainResult;

pub const SESSION_KEY_PREFIX: &str = "RT:";

pub fn session_key(identity: &str) -> String {
    format!("{SESSION_KEY_PREFIX}{identity}")
}

/// TTL-keyed store of the currently valid refresh token per identity.
///
/// `put` is an unconditional overwrite (last writer wins). Entries vanish on
/// their own once `ttl` has elapsed.
pub trait SessionRegistry: Send + Sync {
    fn put(&self, identity: &str, refresh_token: &str, ttl: Duration) -> DomainResult<()>;

    fn get(&self, identity: &str) -> DomainResult<Option<String>>;

    /// Idempotent: deleting an absent entry succeeds.
    fn delete(&self, identity: &str) -> DomainResult<()>;
}

impl<S> SessionRegistry for Arc<S>
where
    S: SessionRegistry + ?Sized,
{
    fn put(&self, identity: &str, refresh_token: &str, ttl: Duration) -> DomainResult<()> {
        (**self).put(identity, refresh_token, ttl)
    }

    fn get(&self, identity: &str) -> DomainResult<Option<String>> {
        (**self).get(identity)
    }

    fn delete(&self, identity: &str) -> DomainResult<()> {
        (**self).delete(identity)
    }
}
