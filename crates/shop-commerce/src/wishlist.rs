//! Wishlist membership.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Ordered set of wished-for products.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wishlist {
    items: Vec<ProductId>,
}

impl Wishlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the product if absent, remove it if present.
    ///
    /// Returns whether the product is wished for afterwards.
    pub fn toggle(&mut self, id: ProductId) -> bool {
        if let Some(pos) = self.items.iter().position(|i| *i == id) {
            self.items.remove(pos);
            tracing::info!(product = %id, "removed from wishlist");
            false
        } else {
            self.items.push(id);
            tracing::info!(product = %id, "added to wishlist");
            true
        }
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.items.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Members in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = ProductId> + '_ {
        self.items.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut wishlist = Wishlist::new();
        let id = ProductId::new(4);

        assert!(wishlist.toggle(id));
        assert!(wishlist.contains(id));
        assert_eq!(wishlist.len(), 1);

        assert!(!wishlist.toggle(id));
        assert!(!wishlist.contains(id));
        assert!(wishlist.is_empty());
    }

    #[test]
    fn test_keeps_insertion_order() {
        let mut wishlist = Wishlist::new();
        for id in [3, 1, 2] {
            wishlist.toggle(ProductId::new(id));
        }
        wishlist.toggle(ProductId::new(1));
        let ids: Vec<u32> = wishlist.iter().map(|id| id.get()).collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[test]
    fn test_serializes_as_id_list() {
        let mut wishlist = Wishlist::new();
        wishlist.toggle(ProductId::new(7));
        assert_eq!(serde_json::to_string(&wishlist).unwrap(), "[7]");
    }
}
