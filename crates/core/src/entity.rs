//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Relationships between entities are expressed through these identifiers,
/// never through owned or borrowed references to other entities.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
