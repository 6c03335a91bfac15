//! Product review shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use copperleaf_core::{ProductId, ReviewId, ReviewStatus};

/// A product review, pending moderation until approved.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub customer_name: String,
    /// 1-5 stars.
    pub rating: f32,
    pub body: String,
    pub status: ReviewStatus,
    /// Store reply shown under the review, when one exists.
    #[serde(default)]
    pub reply: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Payload for submitting a review.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewInput {
    pub product_id: ProductId,
    pub rating: f32,
    pub body: String,
}

/// Filters for the admin review listing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReviewListQuery {
    pub status: Option<ReviewStatus>,
    pub product: Option<ProductId>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ReviewListQuery {
    /// Render as query parameters (also the cache-key material).
    #[must_use]
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(status) = self.status {
            params.push(("status", status.as_str().to_owned()));
        }
        if let Some(product) = &self.product {
            params.push(("product", product.to_string()));
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
