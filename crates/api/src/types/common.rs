//! Shapes shared across resource families.

use serde::{Deserialize, Serialize};

/// A shipping address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Recipient name.
    pub recipient: String,
    /// Contact phone number.
    pub phone: String,
    /// Street address.
    pub line1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    pub city: String,
    pub district: String,
    pub postal_code: String,
}

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number.
    pub page: u32,
    pub per_page: u32,
    /// Total items across all pages.
    pub total: u64,
}

impl<T> Page<T> {
    /// Number of pages at the current page size.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        if self.per_page == 0 {
            return 0;
        }
        self.total.div_ceil(self.per_page as u64)
    }
}

/// Response envelope for operations with no meaningful body (deletes etc.).
#[derive(Debug, Clone, Deserialize)]
pub struct Acknowledgement {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_page_total_pages() {
        let page = Page::<u32> {
            items: vec![],
            page: 1,
            per_page: 20,
            total: 41,
        };
        assert_eq!(page.total_pages(), 3);
    }

    #[test]
    fn test_page_zero_per_page() {
        let page = Page::<u32> {
            items: vec![],
            page: 1,
            per_page: 0,
            total: 10,
        };
        assert_eq!(page.total_pages(), 0);
    }

    #[test]
    fn test_address_camel_case() {
        let address = Address {
            recipient: "A. Customer".into(),
            phone: "+8801000000000".into(),
            line1: "12 Lake Road".into(),
            line2: None,
            city: "Dhaka".into(),
            district: "Dhaka".into(),
            postal_code: "1207".into(),
        };
        let json = serde_json::to_string(&address).unwrap();
        assert!(json.contains("\"postalCode\""));
        assert!(!json.contains("\"line2\""));
    }
}
