//! Customer account shapes for the admin panel.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use copperleaf_core::{CustomerId, Email, UserRole};

use super::common::Address;

/// A customer account, as listed in the admin panel.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub display_name: String,
    pub email: Email,
    pub role: UserRole,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub order_count: u64,
    #[serde(default)]
    pub total_spent: Decimal,
    pub joined_at: DateTime<Utc>,
}

/// Filters for the admin customer listing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CustomerListQuery {
    /// Matches name or email.
    pub search: Option<String>,
    pub role: Option<UserRole>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl CustomerListQuery {
    /// Render as query parameters (also the cache-key material).
    #[must_use]
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(search) = &self.search {
            params.push(("search", search.clone()));
        }
        if let Some(role) = self.role {
            params.push(("role", role.as_str().to_owned()));
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
