//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Everything the projection engine produces (monthly buckets, metrics,
/// recommendations) is a value object: immutable once built and compared by
/// its attribute values. Two runs over the same inputs yield equal values.
///
/// The trait requires:
/// - **Clone**: values are handed to presentation layers by copy
/// - **PartialEq**: values are compared attribute by attribute
/// - **Debug**: values show up in logs and test failures
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
