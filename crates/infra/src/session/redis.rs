//! Redis-backed session registry (feature `redis`).
//!
//! Each record is a plain string key `RT:<identity>` written with `SET .. EX`,
//! so expiry is handled by Redis itself.

use chrono::Duration;
use redis::Commands;

use teamhub_auth::{session_key, SessionRegistry};
use teamhub_core::{DomainError, DomainResult};

#[derive(Debug, Clone)]
pub struct RedisSessionRegistry {
    client: redis::Client,
}

impl RedisSessionRegistry {
    pub fn new(redis_url: impl AsRef<str>) -> DomainResult<Self> {
        let client = redis::Client::open(redis_url.as_ref()).map_err(redis_error)?;
        Ok(Self { client })
    }

    fn connection(&self) -> DomainResult<redis::Connection> {
        self.client.get_connection().map_err(redis_error)
    }
}

fn redis_error(e: redis::RedisError) -> DomainError {
    tracing::error!("session registry backend error: {e}");
    DomainError::internal(format!("session registry unavailable: {e}"))
}

impl SessionRegistry for RedisSessionRegistry {
    fn put(&self, identity: &str, refresh_token: &str, ttl: Duration) -> DomainResult<()> {
        let seconds = ttl.num_seconds().max(1) as u64;
        let mut conn = self.connection()?;
        conn.set_ex::<_, _, ()>(session_key(identity), refresh_token, seconds)
            .map_err(redis_error)
    }

    fn get(&self, identity: &str) -> DomainResult<Option<String>> {
        let mut conn = self.connection()?;
        conn.get::<_, Option<String>>(session_key(identity))
            .map_err(redis_error)
    }

    fn delete(&self, identity: &str) -> DomainResult<()> {
        let mut conn = self.connection()?;
        conn.del::<_, ()>(session_key(identity)).map_err(redis_error)
    }
}
