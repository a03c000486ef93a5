//! Infrastructure layer: storage adapters, session registry backends, config.

pub mod config;
pub mod session;
pub mod store;


pub use config::{AdminBootstrap, AppConfig};
pub use session::InMemorySessionRegistry;
#[cfg(feature = "redis")]
pub use session::RedisSessionRegistry;
pub use store::{InMemoryMemberStore, InMemoryTeamStore};
