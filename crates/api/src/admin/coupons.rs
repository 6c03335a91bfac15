//! Coupon management.

use std::sync::Arc;

use serde::Serialize;
use tracing::instrument;

use copperleaf_core::CouponId;

use crate::cache::{QueryKey, QueryResult, Resource, Tag, TagCache};
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{Acknowledgement, Coupon, CouponInput};

#[derive(Debug, Serialize)]
struct ActiveBody {
    active: bool,
}

/// Client for the admin coupon endpoints.
#[derive(Clone)]
pub struct AdminCouponsApi {
    transport: Transport,
    cache: Arc<TagCache>,
}

impl AdminCouponsApi {
    pub(crate) const fn new(transport: Transport, cache: Arc<TagCache>) -> Self {
        Self { transport, cache }
    }

    /// List all coupons.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails and nothing usable is cached.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<QueryResult<Vec<Coupon>>, ApiError> {
        self.cache
            .query(
                QueryKey::new("coupons.list", ""),
                vec![Tag::all(Resource::Coupons)],
                || async { self.transport.get("/coupons").await },
            )
            .await
    }

    /// Create a coupon.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection (e.g. duplicate code); nothing is
    /// invalidated in that case.
    #[instrument(skip(self, input), fields(code = %input.code))]
    pub async fn create(&self, input: &CouponInput) -> Result<Coupon, ApiError> {
        self.cache
            .mutate(&[Tag::all(Resource::Coupons)], || async {
                self.transport.post("/coupons", input).await
            })
            .await
    }

    /// Update a coupon.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection; nothing is invalidated in that case.
    #[instrument(skip(self, input), fields(coupon_id = %id))]
    pub async fn update(&self, id: &CouponId, input: &CouponInput) -> Result<Coupon, ApiError> {
        self.cache
            .mutate(
                &[
                    Tag::entity(Resource::Coupons, id.as_str()),
                    Tag::all(Resource::Coupons),
                ],
                || async { self.transport.patch(&format!("/coupons/{id}"), input).await },
            )
            .await
    }

    /// Enable or disable a coupon.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection; nothing is invalidated in that case.
    #[instrument(skip(self), fields(coupon_id = %id, active = active))]
    pub async fn set_active(&self, id: &CouponId, active: bool) -> Result<Coupon, ApiError> {
        self.cache
            .mutate(
                &[
                    Tag::entity(Resource::Coupons, id.as_str()),
                    Tag::all(Resource::Coupons),
                ],
                || async {
                    self.transport
                        .patch(&format!("/coupons/{id}/status"), &ActiveBody { active })
                        .await
                },
            )
            .await
    }

    /// Delete a coupon.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection; nothing is invalidated in that case.
    #[instrument(skip(self), fields(coupon_id = %id))]
    pub async fn delete(&self, id: &CouponId) -> Result<Acknowledgement, ApiError> {
        self.cache
            .mutate(&[Tag::all(Resource::Coupons)], || async {
                self.transport.delete(&format!("/coupons/{id}")).await
            })
            .await
    }
}
