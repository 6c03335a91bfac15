//! Shopping cart store.
//!
//! The cart is client-owned: it never syncs to the server except at checkout,
//! where the whole thing is submitted as an order draft. Totals are recomputed
//! over the full item list after every action - O(n) per mutation, which is
//! fine at tens of line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use copperleaf_core::{CategoryId, CurrencyCode, Money, ProductId};

/// The product snapshot captured when an item enters the cart.
///
/// Prices are frozen at add time; the server re-prices at submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartProduct {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    pub list_price: Decimal,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<CategoryId>,
}

/// One cart line: a product snapshot plus a quantity that is always >= 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(flatten)]
    pub product: CartProduct,
    pub quantity: u32,
}

impl CartItem {
    /// Line total at the captured unit price.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.unit_price * Decimal::from(self.quantity)
    }
}

/// Actions the cart reducer understands.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Add one unit; merges into an existing line for the same product.
    Add(CartProduct),
    /// Drop a line entirely regardless of quantity.
    Remove(ProductId),
    /// Bump a line's quantity by one. Unknown ids are ignored.
    Increase(ProductId),
    /// Lower a line's quantity by one; at quantity 1 the line is removed.
    Decrease(ProductId),
    /// Empty the cart (checkout success, explicit clear).
    Clear,
}

/// The cart: lines plus aggregates recomputed on every action.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    items: Vec<CartItem>,
    total_quantity: u32,
    total_price: Decimal,
}

impl CartState {
    /// An empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one action. Cannot fail: unknown product ids are no-ops.
    pub fn apply(&mut self, action: CartAction) {
        match action {
            CartAction::Add(product) => {
                match self
                    .items
                    .iter_mut()
                    .find(|item| item.product.product_id == product.product_id)
                {
                    Some(item) => item.quantity += 1,
                    None => self.items.push(CartItem {
                        product,
                        quantity: 1,
                    }),
                }
            }
            CartAction::Remove(product_id) => {
                self.items.retain(|item| item.product.product_id != product_id);
            }
            CartAction::Increase(product_id) => {
                if let Some(item) = self
                    .items
                    .iter_mut()
                    .find(|item| item.product.product_id == product_id)
                {
                    item.quantity += 1;
                }
            }
            CartAction::Decrease(product_id) => {
                if let Some(position) = self
                    .items
                    .iter()
                    .position(|item| item.product.product_id == product_id)
                {
                    match self.items.get_mut(position) {
                        Some(item) if item.quantity > 1 => item.quantity -= 1,
                        _ => {
                            self.items.remove(position);
                        }
                    }
                }
            }
            CartAction::Clear => self.items.clear(),
        }

        self.recompute_totals();
    }

    /// Sum quantity and price over the full list. No delta accounting.
    fn recompute_totals(&mut self) {
        self.total_quantity = self.items.iter().map(|item| item.quantity).sum();
        self.total_price = self.items.iter().map(CartItem::line_total).sum();
    }

    /// Current lines, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all lines.
    #[must_use]
    pub const fn total_quantity(&self) -> u32 {
        self.total_quantity
    }

    /// Total price across all lines.
    #[must_use]
    pub const fn total_price(&self) -> Decimal {
        self.total_price
    }

    /// The subtotal as displayable money.
    #[must_use]
    pub const fn subtotal(&self, currency: CurrencyCode) -> Money {
        Money::new(self.total_price, currency)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: &str, price: i64) -> CartProduct {
        CartProduct {
            product_id: ProductId::new(id),
            name: format!("Product {id}"),
            unit_price: Decimal::from(price),
            list_price: Decimal::from(price + 500),
            image: None,
            category: None,
        }
    }

    /// Recompute the expected totals independently of the store's own sums.
    fn expected_totals(cart: &CartState) -> (u32, Decimal) {
        let quantity = cart.items().iter().map(|i| i.quantity).sum();
        let price = cart
            .items()
            .iter()
            .map(|i| i.product.unit_price * Decimal::from(i.quantity))
            .sum();
        (quantity, price)
    }

    #[test]
    fn test_totals_invariant_over_action_sequence() {
        let mut cart = CartState::new();
        let actions = vec![
            CartAction::Add(product("p_1", 1200)),
            CartAction::Add(product("p_2", 800)),
            CartAction::Add(product("p_1", 1200)),
            CartAction::Increase(ProductId::new("p_2")),
            CartAction::Decrease(ProductId::new("p_1")),
            CartAction::Add(product("p_3", 50)),
            CartAction::Remove(ProductId::new("p_2")),
            CartAction::Decrease(ProductId::new("p_3")),
        ];

        for action in actions {
            cart.apply(action);
            let (quantity, price) = expected_totals(&cart);
            assert_eq!(cart.total_quantity(), quantity);
            assert_eq!(cart.total_price(), price);
        }
    }

    #[test]
    fn test_add_merges_by_product_id() {
        let mut cart = CartState::new();
        cart.apply(CartAction::Add(product("p_1", 1000)));
        cart.apply(CartAction::Add(product("p_1", 1000)));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.total_quantity(), 2);
    }

    #[test]
    fn test_first_add_seeds_quantity_one() {
        let mut cart = CartState::new();
        cart.apply(CartAction::Add(product("p_1", 1000)));
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn test_decrement_floor_removes_line() {
        let mut cart = CartState::new();
        cart.apply(CartAction::Add(product("p_1", 1000)));
        cart.apply(CartAction::Decrease(ProductId::new("p_1")));

        assert!(cart.is_empty());
        assert_eq!(cart.total_quantity(), 0);
        assert_eq!(cart.total_price(), Decimal::ZERO);
    }

    #[test]
    fn test_no_line_ever_below_one() {
        let mut cart = CartState::new();
        cart.apply(CartAction::Add(product("p_1", 1000)));
        cart.apply(CartAction::Increase(ProductId::new("p_1")));
        for _ in 0..5 {
            cart.apply(CartAction::Decrease(ProductId::new("p_1")));
            assert!(cart.items().iter().all(|item| item.quantity >= 1));
        }
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_drops_whole_line() {
        let mut cart = CartState::new();
        cart.apply(CartAction::Add(product("p_1", 1000)));
        cart.apply(CartAction::Increase(ProductId::new("p_1")));
        cart.apply(CartAction::Add(product("p_2", 300)));
        cart.apply(CartAction::Remove(ProductId::new("p_1")));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_price(), Decimal::from(300));
    }

    #[test]
    fn test_unknown_ids_are_no_ops() {
        let mut cart = CartState::new();
        cart.apply(CartAction::Add(product("p_1", 1000)));
        cart.apply(CartAction::Increase(ProductId::new("ghost")));
        cart.apply(CartAction::Decrease(ProductId::new("ghost")));
        cart.apply(CartAction::Remove(ProductId::new("ghost")));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_quantity(), 1);
    }

    #[test]
    fn test_clear() {
        let mut cart = CartState::new();
        cart.apply(CartAction::Add(product("p_1", 1000)));
        cart.apply(CartAction::Add(product("p_2", 2000)));
        cart.apply(CartAction::Clear);

        assert!(cart.is_empty());
        assert_eq!(cart.total_price(), Decimal::ZERO);
    }

    #[test]
    fn test_serde_roundtrip_preserves_totals() {
        let mut cart = CartState::new();
        cart.apply(CartAction::Add(product("p_1", 1200)));
        cart.apply(CartAction::Add(product("p_1", 1200)));
        cart.apply(CartAction::Add(product("p_2", 800)));

        let json = serde_json::to_string(&cart).unwrap();
        let restored: CartState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);
        assert_eq!(restored.total_quantity(), 3);
        assert_eq!(restored.total_price(), Decimal::from(3200));
    }

    #[test]
    fn test_subtotal_money() {
        let mut cart = CartState::new();
        cart.apply(CartAction::Add(product("p_1", 4999)));
        let subtotal = cart.subtotal(CurrencyCode::BDT);
        assert_eq!(subtotal.amount, Decimal::from(4999));
        assert_eq!(subtotal.currency, CurrencyCode::BDT);
    }
}
