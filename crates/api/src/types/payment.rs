//! Payment shapes for the admin panel.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use copperleaf_core::{OrderId, PaymentId, PaymentMethod, PaymentStatus};

/// A payment record attached to an order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: PaymentId,
    pub order_id: OrderId,
    pub order_number: String,
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    /// Gateway reference, when the payment went through one.
    #[serde(default)]
    pub transaction_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Aggregates for the admin payments screen.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStats {
    pub total_received: Decimal,
    pub pending_amount: Decimal,
    pub refunded_amount: Decimal,
    pub count: u64,
}

/// Filters for the admin payment listing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PaymentListQuery {
    pub status: Option<PaymentStatus>,
    /// Matches order number or transaction id.
    pub search: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl PaymentListQuery {
    /// Render as query parameters (also the cache-key material).
    #[must_use]
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(status) = self.status {
            params.push(("status", status.as_str().to_owned()));
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
