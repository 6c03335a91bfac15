//! Logistics shapes: shipments, geographic zones, and rate tiers.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use copperleaf_core::{OrderId, RateId, ShipmentId, ShipmentStatus, ShippingMethod, ZoneId};

/// A shipment attached to an order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    pub id: ShipmentId,
    pub order_id: OrderId,
    pub order_number: String,
    #[serde(default)]
    pub carrier: Option<String>,
    #[serde(default)]
    pub tracking_number: Option<String>,
    pub status: ShipmentStatus,
    #[serde(default)]
    pub zone: Option<ZoneId>,
    pub updated_at: DateTime<Utc>,
}

/// A delivery zone grouping districts under one rate table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
    #[serde(default)]
    pub districts: Vec<String>,
}

/// Payload for creating or updating a zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneInput {
    pub name: String,
    pub districts: Vec<String>,
}

/// A price tier for one shipping method within a zone.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingRate {
    pub id: RateId,
    pub zone: ZoneId,
    pub method: ShippingMethod,
    pub price: Decimal,
    /// Order subtotal above which this rate becomes free, when set.
    #[serde(default)]
    pub free_above: Option<Decimal>,
}

/// Payload for creating or updating a rate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateInput {
    pub zone: ZoneId,
    pub method: ShippingMethod,
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_above: Option<Decimal>,
}

/// Filters for the admin shipment listing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShipmentListQuery {
    pub status: Option<ShipmentStatus>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ShipmentListQuery {
    /// Render as query parameters (also the cache-key material).
    #[must_use]
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(status) = self.status {
            params.push(("status", status.as_str().to_owned()));
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
