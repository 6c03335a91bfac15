//! Copperleaf Storefront - client-owned state and the checkout flow.
//!
//! Everything in this crate is state the server never sees (until checkout):
//! the cart, the wishlist, the theme palette, browse filters, and transient UI
//! flags. Each store is a pure reducer - `(state, action) -> state` with no
//! hidden I/O - so none of them can fail; aggregates like the cart totals are
//! recomputed on every action rather than maintained incrementally.
//!
//! The one place this crate touches the network is [`checkout`], where the
//! full cart is packaged into an order draft and handed to the API layer.
//!
//! # Ownership rule
//!
//! Entities with a server-assigned id are cache replicas owned by
//! `copperleaf-api`; the stores here hold only entities *without* server ids,
//! which the client may mutate unilaterally.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod filters;
pub mod theme;
pub mod ui;
pub mod wishlist;

pub use cart::{CartAction, CartItem, CartProduct, CartState};
pub use checkout::{CheckoutError, CheckoutForm, CheckoutGate, gate, shipping_cost, submit};
pub use filters::{BrowseFilters, FilterAction};
pub use theme::{Palette, ThemeAction, ThemeState};
pub use ui::{Toast, ToastLevel, UiAction, UiState};
pub use wishlist::{WishlistAction, WishlistItem, WishlistState};
