//! Aggregated dashboard metrics.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use copperleaf_core::ProductId;

/// Headline numbers for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub revenue: Decimal,
    pub orders: u64,
    pub customers: u64,
    pub pending_orders: u64,
    pub low_stock_products: u64,
    pub pending_reviews: u64,
}

/// One point in the sales-over-time series.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesPoint {
    pub date: NaiveDate,
    pub revenue: Decimal,
    pub orders: u64,
}

/// Time window for the sales series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalesRange {
    Week,
    Month,
    Quarter,
    Year,
}

impl SalesRange {
    /// Wire name, as sent in query parameters.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
        }
    }
}

/// One row of the best-sellers table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    pub product_id: ProductId,
    pub name: String,
    pub units_sold: u64,
    pub revenue: Decimal,
}
