//! Coupon shapes.
//!
//! The client enforces no coupon business rule; it renders what the server
//! returns and submits codes back verbatim.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use copperleaf_core::{CategoryId, CouponId, CouponScope, DiscountType, ProductId};

/// A discount coupon.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub id: CouponId,
    pub code: String,
    pub discount_type: DiscountType,
    /// Percentage (0-100) or fixed amount, per `discount_type`.
    pub discount_value: Decimal,
    pub scope: CouponScope,
    #[serde(default)]
    pub products: Vec<ProductId>,
    #[serde(default)]
    pub categories: Vec<CategoryId>,
    pub valid_from: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    #[serde(default)]
    pub usage_limit: Option<u32>,
    #[serde(default)]
    pub used_count: u32,
    pub active: bool,
}

/// Payload for creating or updating a coupon.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponInput {
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub scope: CouponScope,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub products: Vec<ProductId>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<CategoryId>,
    pub valid_from: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_limit: Option<u32>,
    pub active: bool,
}

/// Server verdict on a coupon code at checkout.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponValidation {
    pub valid: bool,
    /// Amount the server would deduct, when valid.
    #[serde(default)]
    pub discount_amount: Option<Decimal>,
    #[serde(default)]
    pub message: Option<String>,
}
