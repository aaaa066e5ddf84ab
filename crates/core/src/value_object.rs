//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have **no identity**: two instances with the same attribute
/// values are equal and interchangeable. They are immutable; to "modify" one,
/// build a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct AvailabilityEntry {
///     sku_code: SkuCode,
///     is_in_stock: bool,
/// }
///
/// impl ValueObject for AvailabilityEntry {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
