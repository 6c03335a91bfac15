//! Checkout flow: gate, shipping cost display, and order submission.
//!
//! The client computes nothing the server relies on. The shipping cost here is
//! the *displayed* figure (the server recomputes it), and order status always
//! starts wherever the server says it does. What the client does own is the
//! gate (where to send the visitor) and clearing the cart once the server has
//! accepted the draft.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::instrument;
use uuid::Uuid;

use copperleaf_api::storefront::OrdersApi;
use copperleaf_api::types::{Address, DraftItem, OrderConfirmation, OrderDraft};
use copperleaf_api::{ApiError, SessionProvider};
use copperleaf_core::{PaymentMethod, ShippingMethod};

use crate::cart::{CartAction, CartState};

/// Standard shipping is free at or above this subtotal.
const FREE_SHIPPING_THRESHOLD: u32 = 5000;
/// Flat standard fee below the threshold.
const STANDARD_SHIPPING_FEE: u32 = 60;
/// Express fee, charged at any subtotal.
const EXPRESS_SHIPPING_FEE: u32 = 150;

/// Where the checkout view should send the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutGate {
    /// Cart has items but the visitor is not signed in.
    RedirectToLogin,
    /// Nothing to check out.
    RedirectToCart,
    /// Render the form.
    Proceed,
}

/// Resolve the gate for the current visitor.
#[must_use]
pub fn gate(is_authenticated: bool, cart: &CartState) -> CheckoutGate {
    if cart.is_empty() {
        CheckoutGate::RedirectToCart
    } else if !is_authenticated {
        CheckoutGate::RedirectToLogin
    } else {
        CheckoutGate::Proceed
    }
}

/// Shipping cost shown next to the method selector.
///
/// Standard: free at subtotal >= 5000, flat 60 below it. Express: flat 150.
#[must_use]
pub fn shipping_cost(method: ShippingMethod, subtotal: Decimal) -> Decimal {
    match method {
        ShippingMethod::Standard => {
            if subtotal >= Decimal::from(FREE_SHIPPING_THRESHOLD) {
                Decimal::ZERO
            } else {
                Decimal::from(STANDARD_SHIPPING_FEE)
            }
        }
        ShippingMethod::Express => Decimal::from(EXPRESS_SHIPPING_FEE),
    }
}

/// What the customer filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutForm {
    pub shipping_address: Address,
    pub payment_method: PaymentMethod,
    pub shipping_method: ShippingMethod,
    /// Coupon code already validated against the server, if any.
    pub coupon_code: Option<String>,
}

/// Why a checkout attempt did not produce an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The visitor must sign in first.
    #[error("sign in to continue to checkout")]
    NotAuthenticated,
    /// The cart is empty.
    #[error("your cart is empty")]
    EmptyCart,
    /// The selected payment method cannot be used yet.
    #[error("{0} is not available yet")]
    PaymentMethodUnavailable(PaymentMethod),
    /// The server rejected the draft or the request failed. The cart is left
    /// intact for retry.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Package the cart and form into a submission draft.
///
/// Every call mints a fresh idempotency key: one checkout attempt, one key.
#[must_use]
pub fn build_draft(cart: &CartState, form: &CheckoutForm) -> OrderDraft {
    let subtotal = cart.total_price();
    OrderDraft {
        idempotency_key: Uuid::new_v4(),
        items: cart
            .items()
            .iter()
            .map(|item| DraftItem {
                product_id: item.product.product_id.clone(),
                quantity: item.quantity,
                unit_price: item.product.unit_price,
            })
            .collect(),
        shipping_address: form.shipping_address.clone(),
        payment_method: form.payment_method,
        shipping_method: form.shipping_method,
        coupon_code: form.coupon_code.clone(),
        subtotal,
        shipping_cost: shipping_cost(form.shipping_method, subtotal),
    }
}

/// Submit the checkout.
///
/// On success the cart is cleared and the confirmation returned. On failure
/// the cart is left intact and the server's message is surfaced through the
/// error, ready for a toast.
///
/// # Errors
///
/// Returns a [`CheckoutError`] when the gate rejects the attempt, the payment
/// method is unavailable, or the server rejects the draft.
#[instrument(skip(orders, session, cart, form))]
pub async fn submit(
    orders: &OrdersApi,
    session: &SessionProvider,
    cart: &mut CartState,
    form: &CheckoutForm,
) -> Result<OrderConfirmation, CheckoutError> {
    match gate(session.is_authenticated(), cart) {
        CheckoutGate::RedirectToLogin => return Err(CheckoutError::NotAuthenticated),
        CheckoutGate::RedirectToCart => return Err(CheckoutError::EmptyCart),
        CheckoutGate::Proceed => {}
    }

    if !form.payment_method.is_available() {
        return Err(CheckoutError::PaymentMethodUnavailable(form.payment_method));
    }

    let draft = build_draft(cart, form);
    let confirmation = orders.submit(&draft).await?;

    cart.apply(CartAction::Clear);
    Ok(confirmation)
}
