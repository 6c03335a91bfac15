//! Order administration: listing, stats, and lifecycle transitions.

use std::sync::Arc;

use serde::Serialize;
use tracing::instrument;

use copperleaf_core::{OrderId, OrderStatus};

use crate::cache::{QueryKey, QueryResult, Resource, Tag, TagCache};
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{Order, OrderListQuery, OrderStats, Page};

#[derive(Debug, Serialize)]
struct StatusBody {
    status: OrderStatus,
}

#[derive(Debug, Serialize)]
struct NoteBody<'a> {
    note: &'a str,
}

/// Client for the admin order endpoints.
#[derive(Clone)]
pub struct AdminOrdersApi {
    transport: Transport,
    cache: Arc<TagCache>,
}

impl AdminOrdersApi {
    pub(crate) const fn new(transport: Transport, cache: Arc<TagCache>) -> Self {
        Self { transport, cache }
    }

    /// List orders matching the given filters.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails and nothing usable is cached.
    #[instrument(skip(self))]
    pub async fn list(&self, query: &OrderListQuery) -> Result<QueryResult<Page<Order>>, ApiError> {
        let params = query.to_params();
        self.cache
            .query(
                QueryKey::with_params("orders.admin.list", &params),
                vec![Tag::all(Resource::Orders)],
                || async {
                    self.transport
                        .get_with_query("/orders/admin", &params)
                        .await
                },
            )
            .await
    }

    /// Aggregate counts for the orders screen.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails and nothing usable is cached.
    #[instrument(skip(self))]
    pub async fn stats(&self) -> Result<QueryResult<OrderStats>, ApiError> {
        self.cache
            .query(
                QueryKey::new("orders.admin.stats", ""),
                vec![Tag::all(Resource::Orders)],
                || async { self.transport.get("/orders/admin/stats").await },
            )
            .await
    }

    /// A single order, with its full timeline.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is not found or the request fails.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn order(&self, id: &OrderId) -> Result<QueryResult<Order>, ApiError> {
        self.cache
            .query(
                QueryKey::new("orders.admin.get", id.as_str()),
                vec![Tag::entity(Resource::Orders, id.as_str())],
                || async { self.transport.get(&format!("/orders/admin/{id}")).await },
            )
            .await
    }

    /// Request a status transition. The server validates the transition and
    /// appends the timeline entry; the client never computes the next state.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection (e.g. an illegal transition); nothing is
    /// invalidated in that case.
    #[instrument(skip(self), fields(order_id = %id, status = status.as_str()))]
    pub async fn update_status(&self, id: &OrderId, status: OrderStatus) -> Result<Order, ApiError> {
        self.cache
            .mutate(
                &[Tag::all(Resource::Orders), Tag::all(Resource::Analytics)],
                || async {
                    self.transport
                        .patch(&format!("/orders/admin/{id}/status"), &StatusBody { status })
                        .await
                },
            )
            .await
    }

    /// Set the internal note on an order. Only the detail view shows it, so
    /// only the order's own entity tag is invalidated.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection; nothing is invalidated in that case.
    #[instrument(skip(self, note), fields(order_id = %id))]
    pub async fn set_admin_note(&self, id: &OrderId, note: &str) -> Result<Order, ApiError> {
        self.cache
            .mutate(&[Tag::entity(Resource::Orders, id.as_str())], || async {
                self.transport
                    .patch(&format!("/orders/admin/{id}/note"), &NoteBody { note })
                    .await
            })
            .await
    }
}
