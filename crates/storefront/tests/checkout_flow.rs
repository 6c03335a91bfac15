//! Checkout flow tests against a real client aggregate.
//!
//! Gate and payment-method rejections resolve before any request is built, so
//! these run with an unreachable API host; the one case that does reach the
//! transport asserts the cart survives the failure.

use std::time::Duration;

use rust_decimal::Decimal;
use secrecy::SecretString;
use url::Url;

use copperleaf_api::types::Address;
use copperleaf_api::{ApiConfig, CommerceClient, Session};
use copperleaf_core::{CustomerId, Email, PaymentMethod, ProductId, ShippingMethod, UserRole};
use copperleaf_storefront::cart::{CartAction, CartProduct, CartState};
use copperleaf_storefront::checkout::{CheckoutError, CheckoutForm, submit};

fn client() -> CommerceClient {
    let mut config = ApiConfig::new(Url::parse("https://copperleaf-api.invalid").expect("url"));
    config.request_timeout = Duration::from_secs(2);
    CommerceClient::new(config).expect("client")
}

fn sign_in(client: &CommerceClient) {
    client.session().set_session(Session {
        user_id: CustomerId::new("u_1"),
        display_name: "Test Customer".into(),
        email: Email::parse("customer@example.com").expect("email"),
        role: UserRole::Customer,
        token: SecretString::from("tok_test"),
        address: None,
    });
}

fn loaded_cart() -> CartState {
    let mut cart = CartState::new();
    cart.apply(CartAction::Add(CartProduct {
        product_id: ProductId::new("p_1"),
        name: "Desk Lamp".into(),
        unit_price: Decimal::from(1200),
        list_price: Decimal::from(1500),
        image: None,
        category: None,
    }));
    cart
}

fn form(payment: PaymentMethod) -> CheckoutForm {
    CheckoutForm {
        shipping_address: Address::default(),
        payment_method: payment,
        shipping_method: ShippingMethod::Standard,
        coupon_code: None,
    }
}

#[tokio::test]
async fn unauthenticated_checkout_resolves_to_login_redirect() {
    let client = client();
    let mut cart = loaded_cart();

    let result = submit(
        client.orders(),
        client.session(),
        &mut cart,
        &form(PaymentMethod::CashOnDelivery),
    )
    .await;

    assert!(matches!(result, Err(CheckoutError::NotAuthenticated)));
    assert_eq!(cart.len(), 1);
}

#[tokio::test]
async fn empty_cart_resolves_to_cart_redirect() {
    let client = client();
    sign_in(&client);
    let mut cart = CartState::new();

    let result = submit(
        client.orders(),
        client.session(),
        &mut cart,
        &form(PaymentMethod::CashOnDelivery),
    )
    .await;

    assert!(matches!(result, Err(CheckoutError::EmptyCart)));
}

#[tokio::test]
async fn online_gateway_is_rejected_client_side() {
    let client = client();
    sign_in(&client);
    let mut cart = loaded_cart();

    let result = submit(
        client.orders(),
        client.session(),
        &mut cart,
        &form(PaymentMethod::OnlineGateway),
    )
    .await;

    assert!(matches!(
        result,
        Err(CheckoutError::PaymentMethodUnavailable(PaymentMethod::OnlineGateway))
    ));
    assert_eq!(cart.len(), 1);
}

#[tokio::test]
async fn failed_submission_leaves_cart_intact() {
    let client = client();
    sign_in(&client);
    let mut cart = loaded_cart();

    // Unreachable host: the request itself fails, and the cart must survive
    // for retry.
    let result = submit(
        client.orders(),
        client.session(),
        &mut cart,
        &form(PaymentMethod::CashOnDelivery),
    )
    .await;

    assert!(matches!(result, Err(CheckoutError::Api(_))));
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.total_quantity(), 1);
}
