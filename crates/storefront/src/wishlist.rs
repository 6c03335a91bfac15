//! Wishlist store.
//!
//! Set semantics keyed by product id: a product appears at most once, and
//! toggling removes it when present. Insertion order is preserved; nothing
//! more is promised.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use copperleaf_core::{CategoryId, ProductId};

/// A product saved for later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    pub list_price: Decimal,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<CategoryId>,
    #[serde(default)]
    pub rating: Option<f32>,
}

/// Actions the wishlist reducer understands.
#[derive(Debug, Clone, PartialEq)]
pub enum WishlistAction {
    /// Remove when present, add when absent.
    Toggle(WishlistItem),
    /// Remove unconditionally. Unknown ids are ignored.
    Remove(ProductId),
    /// Empty the wishlist.
    Clear,
}

/// The wishlist.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistState {
    items: Vec<WishlistItem>,
}

impl WishlistState {
    /// An empty wishlist.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one action. Cannot fail.
    pub fn apply(&mut self, action: WishlistAction) {
        match action {
            WishlistAction::Toggle(item) => {
                if let Some(position) = self
                    .items
                    .iter()
                    .position(|existing| existing.product_id == item.product_id)
                {
                    self.items.remove(position);
                } else {
                    self.items.push(item);
                }
            }
            WishlistAction::Remove(product_id) => {
                self.items.retain(|item| item.product_id != product_id);
            }
            WishlistAction::Clear => self.items.clear(),
        }
    }

    /// Saved items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[WishlistItem] {
        &self.items
    }

    /// Number of saved items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the given product is saved.
    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.items.iter().any(|item| &item.product_id == product_id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(id: &str) -> WishlistItem {
        WishlistItem {
            product_id: ProductId::new(id),
            name: format!("Product {id}"),
            unit_price: Decimal::from(900),
            list_price: Decimal::from(1100),
            image: None,
            category: None,
            rating: Some(4.5),
        }
    }

    #[test]
    fn test_double_toggle_restores_membership_and_length() {
        let mut wishlist = WishlistState::new();
        wishlist.apply(WishlistAction::Toggle(item("p_1")));
        wishlist.apply(WishlistAction::Toggle(item("p_2")));
        let before = wishlist.clone();

        wishlist.apply(WishlistAction::Toggle(item("p_3")));
        wishlist.apply(WishlistAction::Toggle(item("p_3")));

        assert_eq!(wishlist, before);
        assert_eq!(wishlist.len(), 2);
    }

    #[test]
    fn test_toggle_never_duplicates() {
        let mut wishlist = WishlistState::new();
        wishlist.apply(WishlistAction::Toggle(item("p_1")));
        wishlist.apply(WishlistAction::Toggle(item("p_1")));
        wishlist.apply(WishlistAction::Toggle(item("p_1")));

        assert_eq!(wishlist.len(), 1);
        assert!(wishlist.contains(&ProductId::new("p_1")));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut wishlist = WishlistState::new();
        for id in ["p_3", "p_1", "p_2"] {
            wishlist.apply(WishlistAction::Toggle(item(id)));
        }
        let ids: Vec<&str> = wishlist.items().iter().map(|i| i.product_id.as_str()).collect();
        assert_eq!(ids, vec!["p_3", "p_1", "p_2"]);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut wishlist = WishlistState::new();
        wishlist.apply(WishlistAction::Toggle(item("p_1")));
        wishlist.apply(WishlistAction::Toggle(item("p_2")));

        wishlist.apply(WishlistAction::Remove(ProductId::new("p_1")));
        assert!(!wishlist.contains(&ProductId::new("p_1")));

        wishlist.apply(WishlistAction::Clear);
        assert!(wishlist.is_empty());
    }
}
