//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity; two with the same attributes are equal.
/// Warehouse examples are a location in space, the outer dimensions of a box,
/// or a weight with its unit.
///
/// Implementors are immutable once constructed. Constructors validate their
/// input and return a [`crate::DomainResult`], so a value that exists is
/// always a valid one. To "change" a value object, build a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
