//! Category and product management.

use std::sync::Arc;

use tracing::instrument;

use copperleaf_core::{CategoryId, ProductId};

use crate::cache::{Resource, Tag, TagCache};
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{Acknowledgement, Category, CategoryInput, Product, ProductInput};

/// Client for the admin catalog endpoints.
#[derive(Clone)]
pub struct AdminCatalogApi {
    transport: Transport,
    cache: Arc<TagCache>,
}

impl AdminCatalogApi {
    pub(crate) const fn new(transport: Transport, cache: Arc<TagCache>) -> Self {
        Self { transport, cache }
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection; nothing is invalidated in that case.
    #[instrument(skip(self, input))]
    pub async fn create_category(&self, input: &CategoryInput) -> Result<Category, ApiError> {
        self.cache
            .mutate(&[Tag::all(Resource::Categories)], || async {
                self.transport.post("/categories", input).await
            })
            .await
    }

    /// Update a category.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection; nothing is invalidated in that case.
    #[instrument(skip(self, input), fields(category_id = %id))]
    pub async fn update_category(
        &self,
        id: &CategoryId,
        input: &CategoryInput,
    ) -> Result<Category, ApiError> {
        self.cache
            .mutate(
                &[
                    Tag::entity(Resource::Categories, id.as_str()),
                    Tag::all(Resource::Categories),
                ],
                || async {
                    self.transport
                        .patch(&format!("/categories/{id}"), input)
                        .await
                },
            )
            .await
    }

    /// Delete a category. Products under it fall back to uncategorized, so
    /// the product family is invalidated too.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection; nothing is invalidated in that case.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn delete_category(&self, id: &CategoryId) -> Result<Acknowledgement, ApiError> {
        self.cache
            .mutate(
                &[Tag::all(Resource::Categories), Tag::all(Resource::Products)],
                || async { self.transport.delete(&format!("/categories/{id}")).await },
            )
            .await
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection; nothing is invalidated in that case.
    #[instrument(skip(self, input))]
    pub async fn create_product(&self, input: &ProductInput) -> Result<Product, ApiError> {
        self.cache
            .mutate(&[Tag::all(Resource::Products)], || async {
                self.transport.post("/products", input).await
            })
            .await
    }

    /// Update a product.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection; nothing is invalidated in that case.
    #[instrument(skip(self, input), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        id: &ProductId,
        input: &ProductInput,
    ) -> Result<Product, ApiError> {
        self.cache
            .mutate(
                &[
                    Tag::entity(Resource::Products, id.as_str()),
                    Tag::all(Resource::Products),
                ],
                || async { self.transport.patch(&format!("/products/{id}"), input).await },
            )
            .await
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection; nothing is invalidated in that case.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: &ProductId) -> Result<Acknowledgement, ApiError> {
        self.cache
            .mutate(&[Tag::all(Resource::Products)], || async {
                self.transport.delete(&format!("/products/{id}")).await
            })
            .await
    }
}
