//! Shipping administration: shipments, zones, and rate tiers.

use std::sync::Arc;

use serde::Serialize;
use tracing::instrument;

use copperleaf_core::{RateId, ShipmentId, ShipmentStatus, ZoneId};

use crate::cache::{QueryKey, QueryResult, Resource, Tag, TagCache};
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{
    Acknowledgement, Page, RateInput, Shipment, ShipmentListQuery, ShippingRate, Zone, ZoneInput,
};

#[derive(Debug, Serialize)]
struct StatusBody {
    status: ShipmentStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TrackingBody<'a> {
    carrier: &'a str,
    tracking_number: &'a str,
}

/// Client for the admin shipping endpoints.
#[derive(Clone)]
pub struct AdminShippingApi {
    transport: Transport,
    cache: Arc<TagCache>,
}

impl AdminShippingApi {
    pub(crate) const fn new(transport: Transport, cache: Arc<TagCache>) -> Self {
        Self { transport, cache }
    }

    // =========================================================================
    // Shipments
    // =========================================================================

    /// List shipments matching the given filters.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails and nothing usable is cached.
    #[instrument(skip(self))]
    pub async fn shipments(
        &self,
        query: &ShipmentListQuery,
    ) -> Result<QueryResult<Page<Shipment>>, ApiError> {
        let params = query.to_params();
        self.cache
            .query(
                QueryKey::with_params("shipping.shipments", &params),
                vec![Tag::all(Resource::Shipments)],
                || async {
                    self.transport
                        .get_with_query("/shipping/shipments", &params)
                        .await
                },
            )
            .await
    }

    /// Request a shipment status transition.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection; nothing is invalidated in that case.
    #[instrument(skip(self), fields(shipment_id = %id, status = status.as_str()))]
    pub async fn update_status(
        &self,
        id: &ShipmentId,
        status: ShipmentStatus,
    ) -> Result<Shipment, ApiError> {
        self.cache
            .mutate(
                &[Tag::all(Resource::Shipments), Tag::all(Resource::Orders)],
                || async {
                    self.transport
                        .patch(
                            &format!("/shipping/shipments/{id}/status"),
                            &StatusBody { status },
                        )
                        .await
                },
            )
            .await
    }

    /// Attach a carrier and tracking number to a shipment.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection; nothing is invalidated in that case.
    #[instrument(skip(self), fields(shipment_id = %id))]
    pub async fn assign_tracking(
        &self,
        id: &ShipmentId,
        carrier: &str,
        tracking_number: &str,
    ) -> Result<Shipment, ApiError> {
        self.cache
            .mutate(
                &[
                    Tag::entity(Resource::Shipments, id.as_str()),
                    Tag::all(Resource::Shipments),
                ],
                || async {
                    self.transport
                        .patch(
                            &format!("/shipping/shipments/{id}/tracking"),
                            &TrackingBody {
                                carrier,
                                tracking_number,
                            },
                        )
                        .await
                },
            )
            .await
    }

    // =========================================================================
    // Zones
    // =========================================================================

    /// List delivery zones.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails and nothing usable is cached.
    #[instrument(skip(self))]
    pub async fn zones(&self) -> Result<QueryResult<Vec<Zone>>, ApiError> {
        self.cache
            .query(
                QueryKey::new("shipping.zones", ""),
                vec![Tag::all(Resource::Zones)],
                || async { self.transport.get("/shipping/zones").await },
            )
            .await
    }

    /// Create a zone.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection; nothing is invalidated in that case.
    #[instrument(skip(self, input))]
    pub async fn create_zone(&self, input: &ZoneInput) -> Result<Zone, ApiError> {
        self.cache
            .mutate(&[Tag::all(Resource::Zones)], || async {
                self.transport.post("/shipping/zones", input).await
            })
            .await
    }

    /// Update a zone.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection; nothing is invalidated in that case.
    #[instrument(skip(self, input), fields(zone_id = %id))]
    pub async fn update_zone(&self, id: &ZoneId, input: &ZoneInput) -> Result<Zone, ApiError> {
        self.cache
            .mutate(&[Tag::all(Resource::Zones)], || async {
                self.transport
                    .patch(&format!("/shipping/zones/{id}"), input)
                    .await
            })
            .await
    }

    /// Delete a zone. Its rates go with it, so both families are invalidated.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection; nothing is invalidated in that case.
    #[instrument(skip(self), fields(zone_id = %id))]
    pub async fn delete_zone(&self, id: &ZoneId) -> Result<Acknowledgement, ApiError> {
        self.cache
            .mutate(
                &[Tag::all(Resource::Zones), Tag::all(Resource::Rates)],
                || async { self.transport.delete(&format!("/shipping/zones/{id}")).await },
            )
            .await
    }

    // =========================================================================
    // Rates
    // =========================================================================

    /// List rate tiers, optionally scoped to one zone.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails and nothing usable is cached.
    #[instrument(skip(self))]
    pub async fn rates(&self, zone: Option<&ZoneId>) -> Result<QueryResult<Vec<ShippingRate>>, ApiError> {
        let params: Vec<(&'static str, String)> = zone
            .map(|z| vec![("zone", z.to_string())])
            .unwrap_or_default();
        self.cache
            .query(
                QueryKey::with_params("shipping.rates", &params),
                vec![Tag::all(Resource::Rates)],
                || async {
                    self.transport
                        .get_with_query("/shipping/rates", &params)
                        .await
                },
            )
            .await
    }

    /// Create a rate tier.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection; nothing is invalidated in that case.
    #[instrument(skip(self, input))]
    pub async fn create_rate(&self, input: &RateInput) -> Result<ShippingRate, ApiError> {
        self.cache
            .mutate(&[Tag::all(Resource::Rates)], || async {
                self.transport.post("/shipping/rates", input).await
            })
            .await
    }

    /// Update a rate tier.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection; nothing is invalidated in that case.
    #[instrument(skip(self, input), fields(rate_id = %id))]
    pub async fn update_rate(&self, id: &RateId, input: &RateInput) -> Result<ShippingRate, ApiError> {
        self.cache
            .mutate(&[Tag::all(Resource::Rates)], || async {
                self.transport
                    .patch(&format!("/shipping/rates/{id}"), input)
                    .await
            })
            .await
    }

    /// Delete a rate tier.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection; nothing is invalidated in that case.
    #[instrument(skip(self), fields(rate_id = %id))]
    pub async fn delete_rate(&self, id: &RateId) -> Result<Acknowledgement, ApiError> {
        self.cache
            .mutate(&[Tag::all(Resource::Rates)], || async {
                self.transport.delete(&format!("/shipping/rates/{id}")).await
            })
            .await
    }
}
