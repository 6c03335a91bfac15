//! Product browse filter store.
//!
//! Holds the storefront's current search/filter/sort selection and renders it
//! into the catalog query the API layer understands. Changing any filter
//! resets pagination to the first page; only an explicit page change keeps it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use copperleaf_api::types::{ProductQuery, ProductSort};
use copperleaf_core::CategoryId;

const FIRST_PAGE: u32 = 1;
const DEFAULT_PER_PAGE: u32 = 24;

/// Actions the filter reducer understands.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterAction {
    SetSearch(Option<String>),
    SetCategory(Option<CategoryId>),
    SetPriceRange(Option<Decimal>, Option<Decimal>),
    SetSort(Option<ProductSort>),
    SetPage(u32),
    Reset,
}

/// Current browse selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseFilters {
    pub search: Option<String>,
    pub category: Option<CategoryId>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub sort: Option<ProductSort>,
    pub page: u32,
    pub per_page: u32,
}

impl Default for BrowseFilters {
    fn default() -> Self {
        Self {
            search: None,
            category: None,
            min_price: None,
            max_price: None,
            sort: None,
            page: FIRST_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl BrowseFilters {
    /// Default selection: everything, first page.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one action. Cannot fail.
    pub fn apply(&mut self, action: FilterAction) {
        match action {
            FilterAction::SetSearch(search) => {
                self.search = search;
                self.page = FIRST_PAGE;
            }
            FilterAction::SetCategory(category) => {
                self.category = category;
                self.page = FIRST_PAGE;
            }
            FilterAction::SetPriceRange(min, max) => {
                self.min_price = min;
                self.max_price = max;
                self.page = FIRST_PAGE;
            }
            FilterAction::SetSort(sort) => {
                self.sort = sort;
                self.page = FIRST_PAGE;
            }
            FilterAction::SetPage(page) => {
                self.page = page.max(FIRST_PAGE);
            }
            FilterAction::Reset => *self = Self::default(),
        }
    }

    /// Render the selection as a catalog query.
    #[must_use]
    pub fn to_query(&self) -> ProductQuery {
        ProductQuery {
            search: self.search.clone(),
            category: self.category.clone(),
            min_price: self.min_price,
            max_price: self.max_price,
            sort: self.sort,
            page: Some(self.page),
            per_page: Some(self.per_page),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_change_resets_page() {
        let mut filters = BrowseFilters::new();
        filters.apply(FilterAction::SetPage(4));
        assert_eq!(filters.page, 4);

        filters.apply(FilterAction::SetSearch(Some("ssd".into())));
        assert_eq!(filters.page, 1);

        filters.apply(FilterAction::SetPage(3));
        filters.apply(FilterAction::SetCategory(Some(CategoryId::new("c_2"))));
        assert_eq!(filters.page, 1);
    }

    #[test]
    fn test_page_floor_is_one() {
        let mut filters = BrowseFilters::new();
        filters.apply(FilterAction::SetPage(0));
        assert_eq!(filters.page, 1);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut filters = BrowseFilters::new();
        filters.apply(FilterAction::SetSearch(Some("monitor".into())));
        filters.apply(FilterAction::SetPriceRange(
            Some(Decimal::from(1000)),
            Some(Decimal::from(5000)),
        ));
        filters.apply(FilterAction::Reset);
        assert_eq!(filters, BrowseFilters::default());
    }

    #[test]
    fn test_to_query_carries_selection() {
        let mut filters = BrowseFilters::new();
        filters.apply(FilterAction::SetSort(Some(ProductSort::PriceAsc)));
        filters.apply(FilterAction::SetPage(2));

        let query = filters.to_query();
        assert_eq!(query.sort, Some(ProductSort::PriceAsc));
        assert_eq!(query.page, Some(2));
        assert_eq!(query.per_page, Some(24));
    }
}
