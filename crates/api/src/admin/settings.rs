//! Store settings.

use std::sync::Arc;

use tracing::instrument;

use crate::cache::{QueryKey, QueryResult, Resource, Tag, TagCache};
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::StoreSettings;

/// Client for the store settings endpoints.
#[derive(Clone)]
pub struct AdminSettingsApi {
    transport: Transport,
    cache: Arc<TagCache>,
}

impl AdminSettingsApi {
    pub(crate) const fn new(transport: Transport, cache: Arc<TagCache>) -> Self {
        Self { transport, cache }
    }

    /// Current store settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails and nothing usable is cached.
    #[instrument(skip(self))]
    pub async fn settings(&self) -> Result<QueryResult<StoreSettings>, ApiError> {
        self.cache
            .query(
                QueryKey::new("settings.get", ""),
                vec![Tag::all(Resource::Settings)],
                || async { self.transport.get("/settings").await },
            )
            .await
    }

    /// Replace the store settings.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection; nothing is invalidated in that case.
    #[instrument(skip(self, settings))]
    pub async fn update(&self, settings: &StoreSettings) -> Result<StoreSettings, ApiError> {
        self.cache
            .mutate(&[Tag::all(Resource::Settings)], || async {
                self.transport.patch("/settings", settings).await
            })
            .await
    }
}
