//! Payment administration.
//!
//! Payment mutations ripple: marking an order paid changes the payment row,
//! the order's payment status, and the revenue numbers, so all three families
//! are invalidated together.

use std::sync::Arc;

use serde::Serialize;
use tracing::instrument;

use copperleaf_core::{PaymentId, PaymentStatus};

use crate::cache::{QueryKey, QueryResult, Resource, Tag, TagCache};
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{Page, Payment, PaymentListQuery, PaymentStats};

#[derive(Debug, Serialize)]
struct StatusBody {
    status: PaymentStatus,
}

/// Client for the admin payment endpoints.
#[derive(Clone)]
pub struct AdminPaymentsApi {
    transport: Transport,
    cache: Arc<TagCache>,
}

impl AdminPaymentsApi {
    pub(crate) const fn new(transport: Transport, cache: Arc<TagCache>) -> Self {
        Self { transport, cache }
    }

    /// List payments matching the given filters.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails and nothing usable is cached.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        query: &PaymentListQuery,
    ) -> Result<QueryResult<Page<Payment>>, ApiError> {
        let params = query.to_params();
        self.cache
            .query(
                QueryKey::with_params("payments.admin.list", &params),
                vec![Tag::all(Resource::Payments)],
                || async {
                    self.transport
                        .get_with_query("/payments/admin", &params)
                        .await
                },
            )
            .await
    }

    /// Aggregates for the payments screen.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails and nothing usable is cached.
    #[instrument(skip(self))]
    pub async fn stats(&self) -> Result<QueryResult<PaymentStats>, ApiError> {
        self.cache
            .query(
                QueryKey::new("payments.admin.stats", ""),
                vec![Tag::all(Resource::Payments)],
                || async { self.transport.get("/payments/admin/stats").await },
            )
            .await
    }

    /// Mark a payment as received.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection (e.g. already paid); nothing is
    /// invalidated in that case.
    #[instrument(skip(self), fields(payment_id = %id))]
    pub async fn mark_paid(&self, id: &PaymentId) -> Result<Payment, ApiError> {
        self.cache
            .mutate(
                &[
                    Tag::all(Resource::Payments),
                    Tag::all(Resource::Orders),
                    Tag::all(Resource::Analytics),
                ],
                || async {
                    self.transport
                        .patch(&format!("/payments/admin/{id}/mark-paid"), &())
                        .await
                },
            )
            .await
    }

    /// Request an arbitrary payment status transition (refund, failure).
    ///
    /// # Errors
    ///
    /// Returns the server's rejection; nothing is invalidated in that case.
    #[instrument(skip(self), fields(payment_id = %id, status = status.as_str()))]
    pub async fn update_status(
        &self,
        id: &PaymentId,
        status: PaymentStatus,
    ) -> Result<Payment, ApiError> {
        self.cache
            .mutate(
                &[
                    Tag::all(Resource::Payments),
                    Tag::all(Resource::Orders),
                    Tag::all(Resource::Analytics),
                ],
                || async {
                    self.transport
                        .patch(
                            &format!("/payments/admin/{id}/status"),
                            &StatusBody { status },
                        )
                        .await
                },
            )
            .await
    }
}
