//! Order shapes: the server-owned entity, the submission draft, and the
//! admin listing queries.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use copperleaf_core::{OrderId, OrderStatus, PaymentMethod, PaymentStatus, ProductId, ShippingMethod};

use super::common::Address;

/// One line of an order, as priced at submission time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

/// One entry in an order's status history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub status: OrderStatus,
    #[serde(default)]
    pub note: Option<String>,
    pub at: DateTime<Utc>,
}

/// A placed order. Status transitions are requested, never computed locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    /// Human-facing order number (e.g. "CL-20260142").
    pub order_number: String,
    pub items: Vec<OrderItem>,
    pub shipping_address: Address,
    pub payment_method: PaymentMethod,
    pub shipping_method: ShippingMethod,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub timeline: Vec<TimelineEntry>,
    /// Internal note visible only in the admin panel.
    #[serde(default)]
    pub admin_note: Option<String>,
    pub subtotal: Decimal,
    pub shipping_cost: Decimal,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
}

/// One line of a draft being submitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftItem {
    pub product_id: ProductId,
    pub quantity: u32,
    /// Price the customer saw; the server re-prices and may reject on drift.
    pub unit_price: Decimal,
}

/// Order submission payload.
///
/// Carries a client-generated idempotency key so a double submission of the
/// same checkout attempt can be deduplicated server-side.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub idempotency_key: Uuid,
    pub items: Vec<DraftItem>,
    pub shipping_address: Address,
    pub payment_method: PaymentMethod,
    pub shipping_method: ShippingMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
    pub subtotal: Decimal,
    pub shipping_cost: Decimal,
}

/// What the server returns for a successful submission.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub id: OrderId,
    pub order_number: String,
    pub total: Decimal,
}

/// Aggregate counts for the admin orders screen.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStats {
    pub total_orders: u64,
    pub pending: u64,
    pub processing: u64,
    pub shipped: u64,
    pub delivered: u64,
    pub cancelled: u64,
    pub revenue: Decimal,
}

/// Filters for the admin order listing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderListQuery {
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    /// Matches order number or recipient.
    pub search: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl OrderListQuery {
    /// Render as query parameters (also the cache-key material).
    #[must_use]
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(status) = self.status {
            params.push(("status", status.as_str().to_owned()));
        }
        if let Some(payment_status) = self.payment_status {
            params.push(("paymentStatus", payment_status.as_str().to_owned()));
        }
        if let Some(search) = &self.search {
            params.push(("search", search.clone()));
        }
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            params.push(("perPage", per_page.to_string()));
        }
        params
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_serializes_idempotency_key() {
        let draft = OrderDraft {
            idempotency_key: Uuid::nil(),
            items: vec![],
            shipping_address: Address::default(),
            payment_method: PaymentMethod::CashOnDelivery,
            shipping_method: ShippingMethod::Standard,
            coupon_code: None,
            subtotal: Decimal::ZERO,
            shipping_cost: Decimal::ZERO,
        };
        let json = serde_json::to_string(&draft).unwrap();
        assert!(json.contains("\"idempotencyKey\""));
        assert!(json.contains("\"cash_on_delivery\""));
        assert!(!json.contains("\"couponCode\""));
    }

    #[test]
    fn test_order_list_query_params() {
        let query = OrderListQuery {
            status: Some(OrderStatus::Shipped),
            payment_status: Some(PaymentStatus::Paid),
            page: Some(3),
            ..Default::default()
        };
        assert_eq!(
            query.to_params(),
            vec![
                ("status", "shipped".to_owned()),
                ("paymentStatus", "paid".to_owned()),
                ("page", "3".to_owned()),
            ]
        );
    }
}
