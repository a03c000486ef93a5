//! Session registry backends.

pub mod in_memory;
#[cfg(feature = "redis")]
pub mod redis;

pub use in_memory::InMemorySessionRegistry;
#[cfg(feature = "redis")]
pub use self::redis::RedisSessionRegistry;
