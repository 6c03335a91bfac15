//! Customer order endpoints: submission and history.

use std::sync::Arc;

use tracing::instrument;

use copperleaf_core::OrderId;

use crate::cache::{QueryKey, QueryResult, Resource, Tag, TagCache};
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{Order, OrderConfirmation, OrderDraft};

/// Client for the customer-facing order endpoints.
#[derive(Clone)]
pub struct OrdersApi {
    transport: Transport,
    cache: Arc<TagCache>,
}

impl OrdersApi {
    pub(crate) const fn new(transport: Transport, cache: Arc<TagCache>) -> Self {
        Self { transport, cache }
    }

    /// Submit an order draft.
    ///
    /// The draft carries a client-generated idempotency key; submitting the
    /// same draft twice lets the server deduplicate. Success invalidates the
    /// Orders and Analytics families so history and dashboards re-fetch.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection; nothing is invalidated in that case.
    #[instrument(skip(self, draft), fields(idempotency_key = %draft.idempotency_key))]
    pub async fn submit(&self, draft: &OrderDraft) -> Result<OrderConfirmation, ApiError> {
        self.cache
            .mutate(
                &[Tag::all(Resource::Orders), Tag::all(Resource::Analytics)],
                || async { self.transport.post("/orders", draft).await },
            )
            .await
    }

    /// The authenticated customer's order history.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails and nothing usable is cached.
    #[instrument(skip(self))]
    pub async fn my_orders(&self) -> Result<QueryResult<Vec<Order>>, ApiError> {
        self.cache
            .query(
                QueryKey::new("orders.mine", ""),
                vec![Tag::all(Resource::Orders)],
                || async { self.transport.get("/orders/my").await },
            )
            .await
    }

    /// A single order belonging to the authenticated customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is not found or the request fails.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn order(&self, id: &OrderId) -> Result<QueryResult<Order>, ApiError> {
        self.cache
            .query(
                QueryKey::new("orders.get", id.as_str()),
                vec![Tag::entity(Resource::Orders, id.as_str())],
                || async { self.transport.get(&format!("/orders/{id}")).await },
            )
            .await
    }
}
