//! Review moderation.

use std::sync::Arc;

use serde::Serialize;
use tracing::instrument;

use copperleaf_core::{ReviewId, ReviewStatus};

use crate::cache::{QueryKey, QueryResult, Resource, Tag, TagCache};
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{Acknowledgement, Page, Review, ReviewListQuery};

#[derive(Debug, Serialize)]
struct StatusBody {
    status: ReviewStatus,
}

#[derive(Debug, Serialize)]
struct ReplyBody<'a> {
    reply: &'a str,
}

/// Client for the admin review endpoints.
#[derive(Clone)]
pub struct AdminReviewsApi {
    transport: Transport,
    cache: Arc<TagCache>,
}

impl AdminReviewsApi {
    pub(crate) const fn new(transport: Transport, cache: Arc<TagCache>) -> Self {
        Self { transport, cache }
    }

    /// List reviews matching the given filters.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails and nothing usable is cached.
    #[instrument(skip(self))]
    pub async fn list(&self, query: &ReviewListQuery) -> Result<QueryResult<Page<Review>>, ApiError> {
        let params = query.to_params();
        self.cache
            .query(
                QueryKey::with_params("reviews.admin.list", &params),
                vec![Tag::all(Resource::Reviews)],
                || async { self.transport.get_with_query("/reviews", &params).await },
            )
            .await
    }

    /// Approve or reject a review.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection; nothing is invalidated in that case.
    #[instrument(skip(self), fields(review_id = %id, status = status.as_str()))]
    pub async fn moderate(&self, id: &ReviewId, status: ReviewStatus) -> Result<Review, ApiError> {
        self.cache
            .mutate(
                &[Tag::all(Resource::Reviews), Tag::all(Resource::Products)],
                || async {
                    self.transport
                        .patch(&format!("/reviews/{id}/status"), &StatusBody { status })
                        .await
                },
            )
            .await
    }

    /// Attach a store reply to a review.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection; nothing is invalidated in that case.
    #[instrument(skip(self, reply), fields(review_id = %id))]
    pub async fn reply(&self, id: &ReviewId, reply: &str) -> Result<Review, ApiError> {
        self.cache
            .mutate(
                &[
                    Tag::entity(Resource::Reviews, id.as_str()),
                    Tag::all(Resource::Reviews),
                ],
                || async {
                    self.transport
                        .patch(&format!("/reviews/{id}/reply"), &ReplyBody { reply })
                        .await
                },
            )
            .await
    }

    /// Delete a review. Product ratings shift, so that family goes stale too.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection; nothing is invalidated in that case.
    #[instrument(skip(self), fields(review_id = %id))]
    pub async fn delete(&self, id: &ReviewId) -> Result<Acknowledgement, ApiError> {
        self.cache
            .mutate(
                &[Tag::all(Resource::Reviews), Tag::all(Resource::Products)],
                || async { self.transport.delete(&format!("/reviews/{id}")).await },
            )
            .await
    }
}
