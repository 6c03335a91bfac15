//! Catalog browsing: categories, products, and product reviews.

use std::sync::Arc;

use tracing::instrument;

use copperleaf_core::{CategoryId, ProductId};

use crate::cache::{QueryKey, QueryResult, Resource, Tag, TagCache};
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{Category, Page, Product, ProductQuery, Review, ReviewInput};

/// Client for the public catalog endpoints.
#[derive(Clone)]
pub struct CatalogApi {
    transport: Transport,
    cache: Arc<TagCache>,
}

impl CatalogApi {
    pub(crate) const fn new(transport: Transport, cache: Arc<TagCache>) -> Self {
        Self { transport, cache }
    }

    /// List all categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails and nothing usable is cached.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<QueryResult<Vec<Category>>, ApiError> {
        self.cache
            .query(
                QueryKey::new("categories.list", ""),
                vec![Tag::all(Resource::Categories)],
                || async { self.transport.get("/categories").await },
            )
            .await
    }

    /// List products matching the given filters.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails and nothing usable is cached.
    #[instrument(skip(self))]
    pub async fn products(&self, query: &ProductQuery) -> Result<QueryResult<Page<Product>>, ApiError> {
        let params = query.to_params();
        self.cache
            .query(
                QueryKey::with_params("products.list", &params),
                vec![Tag::all(Resource::Products)],
                || async { self.transport.get_with_query("/products", &params).await },
            )
            .await
    }

    /// Get a single product.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn product(&self, id: &ProductId) -> Result<QueryResult<Product>, ApiError> {
        self.cache
            .query(
                QueryKey::new("products.get", id.as_str()),
                vec![Tag::entity(Resource::Products, id.as_str())],
                || async { self.transport.get(&format!("/products/{id}")).await },
            )
            .await
    }

    /// Products related to the given one (same category, server-ranked).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails and nothing usable is cached.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn related_products(&self, id: &ProductId) -> Result<QueryResult<Vec<Product>>, ApiError> {
        self.cache
            .query(
                QueryKey::new("products.related", id.as_str()),
                vec![Tag::all(Resource::Products)],
                || async { self.transport.get(&format!("/products/{id}/related")).await },
            )
            .await
    }

    /// Approved reviews for a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails and nothing usable is cached.
    #[instrument(skip(self), fields(product_id = %product))]
    pub async fn product_reviews(&self, product: &ProductId) -> Result<QueryResult<Vec<Review>>, ApiError> {
        self.cache
            .query(
                QueryKey::new("reviews.for_product", product.as_str()),
                vec![Tag::all(Resource::Reviews)],
                || async {
                    self.transport
                        .get(&format!("/products/{product}/reviews"))
                        .await
                },
            )
            .await
    }

    /// Submit a review. It enters moderation as pending.
    ///
    /// # Errors
    ///
    /// Returns an error if the server rejects the submission; nothing is
    /// invalidated in that case.
    #[instrument(skip(self, input), fields(product_id = %input.product_id))]
    pub async fn submit_review(&self, input: &ReviewInput) -> Result<Review, ApiError> {
        self.cache
            .mutate(&[Tag::all(Resource::Reviews)], || async {
                self.transport.post("/reviews", input).await
            })
            .await
    }

    /// Get a single category.
    ///
    /// # Errors
    ///
    /// Returns an error if the category is not found or the request fails.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn category(&self, id: &CategoryId) -> Result<QueryResult<Category>, ApiError> {
        self.cache
            .query(
                QueryKey::new("categories.get", id.as_str()),
                vec![Tag::entity(Resource::Categories, id.as_str())],
                || async { self.transport.get(&format!("/categories/{id}")).await },
            )
            .await
    }
}
