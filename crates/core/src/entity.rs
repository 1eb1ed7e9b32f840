//! Entity trait: things that keep their identity while their attributes change.

/// An object identified by key rather than by value.
///
/// An item descriptor is an entity: re-weighing a pallet of `BOLT-M8` does not
/// make it a different item.
pub trait Entity {
    /// Strongly-typed entity identifier (e.g. [`crate::Sku`]).
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// Two entities are the same when their identifiers match.
    fn same_identity_as(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
