//! In-memory repositories for members and teams.
//!
//! These back tests and single-process dev deployments. Each store keeps its
//! rows plus unique indexes behind one `RwLock`, so uniqueness checks and the
//! team-assignment compare-and-swap happen atomically with the write.

pub mod members;
pub mod teams;

pub use members::InMemoryMemberStore;
pub use teams::InMemoryTeamStore;

use teamhub_core::DomainError;

fn poisoned<T>(_: T) -> DomainError {
    DomainError::internal("store lock poisoned")
}
