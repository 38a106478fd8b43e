//! # Slot Definitions
//!
//! A slot is an acceptance predicate over resource types. A matching request
//! is an ordered list of slots; order only matters for reporting.

/// An acceptance predicate for one matching requirement.
///
/// Any `Fn(&K) -> bool` closure is a slot:
///
/// ```rust
/// use slotforge_core::Slot;
///
/// let planks = |kind: &&str| kind.ends_with("_planks");
/// assert!(planks.accepts(&"oak_planks"));
/// assert!(!planks.accepts(&"cobblestone"));
/// ```
pub trait Slot<K> {
    /// Returns true if `resource` can fill this slot.
    fn accepts(&self, resource: &K) -> bool;
}

impl<K, F> Slot<K> for F
where
    F: Fn(&K) -> bool,
{
    #[inline]
    fn accepts(&self, resource: &K) -> bool {
        self(resource)
    }
}

/// A slot accepting any of a fixed set of resource types.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnyOf<K> {
    accepted: Vec<K>,
}

impl<K: PartialEq> AnyOf<K> {
    /// Creates a slot accepting exactly the given types.
    #[must_use]
    pub fn new(accepted: impl IntoIterator<Item = K>) -> Self {
        Self {
            accepted: accepted.into_iter().collect(),
        }
    }

    /// Creates a slot accepting a single type.
    #[must_use]
    pub fn single(resource: K) -> Self {
        Self {
            accepted: vec![resource],
        }
    }

    /// The accepted types, in construction order.
    #[must_use]
    pub fn accepted(&self) -> &[K] {
        &self.accepted
    }
}

impl<K: PartialEq> Slot<K> for AnyOf<K> {
    #[inline]
    fn accepts(&self, resource: &K) -> bool {
        self.accepted.contains(resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_of() {
        let slot = AnyOf::new(["wood", "stone"]);
        assert!(slot.accepts(&"wood"));
        assert!(slot.accepts(&"stone"));
        assert!(!slot.accepts(&"iron"));
        assert_eq!(slot.accepted(), &["wood", "stone"]);
    }

    #[test]
    fn test_closure_slot() {
        let even = |n: &u32| n % 2 == 0;
        assert!(even.accepts(&4));
        assert!(!even.accepts(&3));
    }

    #[test]
    fn test_empty_any_of_accepts_nothing() {
        let slot: AnyOf<u32> = AnyOf::new([]);
        assert!(!slot.accepts(&0));
    }
}
