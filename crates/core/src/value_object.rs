//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**; they represent
/// concepts where identity does not matter. A kit line item (item reference plus
/// quantity) is a value object; an inventory item, which keeps its identity
/// across renames and deactivation, is an entity.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
