//! Dashboard analytics.
//!
//! All read-only; the Analytics family is invalidated by order and payment
//! mutations so the dashboard re-fetches after anything that moves revenue.

use std::sync::Arc;

use tracing::instrument;

use crate::cache::{QueryKey, QueryResult, Resource, Tag, TagCache};
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{DashboardStats, SalesPoint, SalesRange, TopProduct};

/// Client for the admin analytics endpoints.
#[derive(Clone)]
pub struct AdminAnalyticsApi {
    transport: Transport,
    cache: Arc<TagCache>,
}

impl AdminAnalyticsApi {
    pub(crate) const fn new(transport: Transport, cache: Arc<TagCache>) -> Self {
        Self { transport, cache }
    }

    /// Headline numbers for the dashboard.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails and nothing usable is cached.
    #[instrument(skip(self))]
    pub async fn dashboard(&self) -> Result<QueryResult<DashboardStats>, ApiError> {
        self.cache
            .query(
                QueryKey::new("analytics.dashboard", ""),
                vec![Tag::all(Resource::Analytics)],
                || async { self.transport.get("/analytics/dashboard").await },
            )
            .await
    }

    /// Sales series over the given window.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails and nothing usable is cached.
    #[instrument(skip(self), fields(range = range.as_str()))]
    pub async fn sales_over_time(
        &self,
        range: SalesRange,
    ) -> Result<QueryResult<Vec<SalesPoint>>, ApiError> {
        let params = [("range", range.as_str().to_owned())];
        self.cache
            .query(
                QueryKey::new("analytics.sales", range.as_str()),
                vec![Tag::all(Resource::Analytics)],
                || async { self.transport.get_with_query("/analytics/sales", &params).await },
            )
            .await
    }

    /// Best-selling products.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails and nothing usable is cached.
    #[instrument(skip(self))]
    pub async fn top_products(&self, limit: u32) -> Result<QueryResult<Vec<TopProduct>>, ApiError> {
        let params = [("limit", limit.to_string())];
        self.cache
            .query(
                QueryKey::new("analytics.top_products", limit.to_string()),
                vec![Tag::all(Resource::Analytics)],
                || async {
                    self.transport
                        .get_with_query("/analytics/top-products", &params)
                        .await
                },
            )
            .await
    }
}
