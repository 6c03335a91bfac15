//! Category and product shapes.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use copperleaf_core::{CategoryId, ProductId};

/// A product category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    /// How many products the server counts under this category.
    #[serde(default)]
    pub product_count: Option<u64>,
}

/// Payload for creating or updating a category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One name/value row in a product's specification table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSpec {
    pub name: String,
    pub value: String,
}

/// Search-engine metadata for a product page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SeoMeta {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    pub description: String,
    /// Selling price.
    pub price: Decimal,
    /// Pre-discount price shown struck through.
    pub list_price: Decimal,
    /// Units in stock; the server decrements it, never the client.
    pub stock: u32,
    pub category: CategoryId,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub specifications: Vec<ProductSpec>,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub seo: Option<SeoMeta>,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating or updating a product.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub list_price: Decimal,
    pub stock: u32,
    pub category: CategoryId,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub specifications: Vec<ProductSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo: Option<SeoMeta>,
}

/// Catalog sort orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSort {
    Newest,
    PriceAsc,
    PriceDesc,
    TopRated,
}

impl ProductSort {
    /// Wire name, as sent in query parameters.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::TopRated => "top_rated",
        }
    }
}

/// Filters for the product listing endpoint.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductQuery {
    pub search: Option<String>,
    pub category: Option<CategoryId>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub sort: Option<ProductSort>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ProductQuery {
    /// Render as query parameters (also the cache-key material).
    #[must_use]
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(search) = &self.search {
            params.push(("search", search.clone()));
        }
        if let Some(category) = &self.category {
            params.push(("category", category.to_string()));
        }
        if let Some(min_price) = self.min_price {
            params.push(("minPrice", min_price.to_string()));
        }
        if let Some(max_price) = self.max_price {
            params.push(("maxPrice", max_price.to_string()));
        }
        if let Some(sort) = self.sort {
            params.push(("sort", sort.as_str().to_owned()));
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
