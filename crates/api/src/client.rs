//! Aggregate client shared across the application.
//!
//! One constructor wires configuration, session, transport, cache, and every
//! endpoint group together. The struct is cheaply cloneable via `Arc`; all
//! clones share the same session and cache.

use std::sync::Arc;

use thiserror::Error;

use crate::admin::{
    AdminAnalyticsApi, AdminCatalogApi, AdminCouponsApi, AdminCustomersApi, AdminOrdersApi,
    AdminPaymentsApi, AdminReviewsApi, AdminSettingsApi, AdminShippingApi,
};
use crate::cache::TagCache;
use crate::config::{ApiConfig, ConfigError};
use crate::error::ApiError;
use crate::session::SessionProvider;
use crate::storefront::{AuthApi, CatalogApi, CouponsApi, OrdersApi};
use crate::transport::Transport;

/// Error creating a [`CommerceClient`].
#[derive(Debug, Error)]
pub enum ClientInitError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("transport error: {0}")]
    Api(#[from] ApiError),
}

/// The Copperleaf API client: every endpoint group behind one handle.
#[derive(Clone)]
pub struct CommerceClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    config: ApiConfig,
    session: SessionProvider,
    cache: Arc<TagCache>,
    auth: AuthApi,
    catalog: CatalogApi,
    orders: OrdersApi,
    coupons: CouponsApi,
    admin_catalog: AdminCatalogApi,
    admin_orders: AdminOrdersApi,
    admin_payments: AdminPaymentsApi,
    admin_shipping: AdminShippingApi,
    admin_coupons: AdminCouponsApi,
    admin_reviews: AdminReviewsApi,
    admin_customers: AdminCustomersApi,
    admin_analytics: AdminAnalyticsApi,
    admin_settings: AdminSettingsApi,
}

impl CommerceClient {
    /// Create a client from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let session = SessionProvider::new();
        let transport = Transport::new(&config, session.clone())?;
        let cache = Arc::new(TagCache::new(config.cache_capacity, config.cache_ttl));

        Ok(Self {
            inner: Arc::new(ClientInner {
                auth: AuthApi::new(transport.clone(), session.clone()),
                catalog: CatalogApi::new(transport.clone(), Arc::clone(&cache)),
                orders: OrdersApi::new(transport.clone(), Arc::clone(&cache)),
                coupons: CouponsApi::new(transport.clone()),
                admin_catalog: AdminCatalogApi::new(transport.clone(), Arc::clone(&cache)),
                admin_orders: AdminOrdersApi::new(transport.clone(), Arc::clone(&cache)),
                admin_payments: AdminPaymentsApi::new(transport.clone(), Arc::clone(&cache)),
                admin_shipping: AdminShippingApi::new(transport.clone(), Arc::clone(&cache)),
                admin_coupons: AdminCouponsApi::new(transport.clone(), Arc::clone(&cache)),
                admin_reviews: AdminReviewsApi::new(transport.clone(), Arc::clone(&cache)),
                admin_customers: AdminCustomersApi::new(transport.clone(), Arc::clone(&cache)),
                admin_analytics: AdminAnalyticsApi::new(transport.clone(), Arc::clone(&cache)),
                admin_settings: AdminSettingsApi::new(transport, Arc::clone(&cache)),
                config,
                session,
                cache,
            }),
        })
    }

    /// Create a client from environment configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is missing/invalid or the HTTP
    /// client fails to build.
    pub fn from_env() -> Result<Self, ClientInitError> {
        Ok(Self::new(ApiConfig::from_env()?)?)
    }

    /// The configuration this client was built from.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// The shared session provider.
    #[must_use]
    pub fn session(&self) -> &SessionProvider {
        &self.inner.session
    }

    /// The shared tag cache.
    #[must_use]
    pub fn cache(&self) -> &TagCache {
        &self.inner.cache
    }

    /// Authentication endpoints.
    #[must_use]
    pub fn auth(&self) -> &AuthApi {
        &self.inner.auth
    }

    /// Public catalog endpoints.
    #[must_use]
    pub fn catalog(&self) -> &CatalogApi {
        &self.inner.catalog
    }

    /// Customer order endpoints.
    #[must_use]
    pub fn orders(&self) -> &OrdersApi {
        &self.inner.orders
    }

    /// Public coupon endpoints.
    #[must_use]
    pub fn coupons(&self) -> &CouponsApi {
        &self.inner.coupons
    }

    /// Admin catalog management.
    #[must_use]
    pub fn admin_catalog(&self) -> &AdminCatalogApi {
        &self.inner.admin_catalog
    }

    /// Admin order management.
    #[must_use]
    pub fn admin_orders(&self) -> &AdminOrdersApi {
        &self.inner.admin_orders
    }

    /// Admin payment management.
    #[must_use]
    pub fn admin_payments(&self) -> &AdminPaymentsApi {
        &self.inner.admin_payments
    }

    /// Admin shipping management.
    #[must_use]
    pub fn admin_shipping(&self) -> &AdminShippingApi {
        &self.inner.admin_shipping
    }

    /// Admin coupon management.
    #[must_use]
    pub fn admin_coupons(&self) -> &AdminCouponsApi {
        &self.inner.admin_coupons
    }

    /// Admin review moderation.
    #[must_use]
    pub fn admin_reviews(&self) -> &AdminReviewsApi {
        &self.inner.admin_reviews
    }

    /// Admin customer management.
    #[must_use]
    pub fn admin_customers(&self) -> &AdminCustomersApi {
        &self.inner.admin_customers
    }

    /// Admin dashboard analytics.
    #[must_use]
    pub fn admin_analytics(&self) -> &AdminAnalyticsApi {
        &self.inner.admin_analytics
    }

    /// Store settings.
    #[must_use]
    pub fn admin_settings(&self) -> &AdminSettingsApi {
        &self.inner.admin_settings
    }
}
