//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Stores use the identifier to address rows without knowing the concrete
/// record type.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}
