//! Customer administration.

use std::sync::Arc;

use serde::Serialize;
use tracing::instrument;

use copperleaf_core::{CustomerId, UserRole};

use crate::cache::{QueryKey, QueryResult, Resource, Tag, TagCache};
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{Customer, CustomerListQuery, Page};

#[derive(Debug, Serialize)]
struct RoleBody {
    role: UserRole,
}

/// Client for the admin customer endpoints.
#[derive(Clone)]
pub struct AdminCustomersApi {
    transport: Transport,
    cache: Arc<TagCache>,
}

impl AdminCustomersApi {
    pub(crate) const fn new(transport: Transport, cache: Arc<TagCache>) -> Self {
        Self { transport, cache }
    }

    /// List customers matching the given filters.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails and nothing usable is cached.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        query: &CustomerListQuery,
    ) -> Result<QueryResult<Page<Customer>>, ApiError> {
        let params = query.to_params();
        self.cache
            .query(
                QueryKey::with_params("customers.list", &params),
                vec![Tag::all(Resource::Customers)],
                || async { self.transport.get_with_query("/customers", &params).await },
            )
            .await
    }

    /// A single customer, with order aggregates.
    ///
    /// # Errors
    ///
    /// Returns an error if the customer is not found or the request fails.
    #[instrument(skip(self), fields(customer_id = %id))]
    pub async fn customer(&self, id: &CustomerId) -> Result<QueryResult<Customer>, ApiError> {
        self.cache
            .query(
                QueryKey::new("customers.get", id.as_str()),
                vec![Tag::entity(Resource::Customers, id.as_str())],
                || async { self.transport.get(&format!("/customers/{id}")).await },
            )
            .await
    }

    /// Grant or revoke the admin role.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection; nothing is invalidated in that case.
    #[instrument(skip(self), fields(customer_id = %id, role = role.as_str()))]
    pub async fn set_role(&self, id: &CustomerId, role: UserRole) -> Result<Customer, ApiError> {
        self.cache
            .mutate(
                &[
                    Tag::entity(Resource::Customers, id.as_str()),
                    Tag::all(Resource::Customers),
                ],
                || async {
                    self.transport
                        .patch(&format!("/customers/{id}/role"), &RoleBody { role })
                        .await
                },
            )
            .await
    }
}
