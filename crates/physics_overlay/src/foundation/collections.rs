//! Specialized collection types
//!
//! Every long-lived object in the overlay (bodies, scene nodes, materials) is
//! addressed through a slot-map key, so stale handles are detected instead of
//! aliasing a recycled slot.

pub use slotmap::{SlotMap, SecondaryMap};

slotmap::new_key_type! {
    /// Handle to a rigid or soft body owned by a physics space
    pub struct BodyId;

    /// Handle to a node in a scene tree
    pub struct NodeId;

    /// Handle to a material in a material library
    pub struct MaterialId;
}

/// Handle-based map using slot map for stable references
pub type HandleMap<K, T> = SlotMap<K, T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removed_handle_is_not_reused() {
        let mut map: HandleMap<NodeId, &str> = HandleMap::with_key();
        let first = map.insert("first");
        map.remove(first);
        let second = map.insert("second");

        assert_ne!(first, second);
        assert!(map.get(first).is_none());
        assert_eq!(map.get(second), Some(&"second"));
    }
}
