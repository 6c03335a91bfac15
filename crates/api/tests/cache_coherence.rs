//! Contract tests for the tag-coherent cache.
//!
//! The network is a closure with an atomic call counter; what matters here is
//! *when* the cache lets it run.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use copperleaf_api::{ApiError, Origin, QueryKey, Resource, Tag, TagCache};

fn cache() -> TagCache {
    TagCache::new(500, Duration::from_secs(300))
}

fn server_error() -> ApiError {
    ApiError::Status {
        status: 500,
        message: "server on fire".into(),
    }
}

#[tokio::test]
async fn invalidated_tag_forces_refetch() {
    let cache = cache();
    let calls = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&calls);
    let first = cache
        .query(
            QueryKey::new("orders.admin.list", ""),
            vec![Tag::all(Resource::Orders)],
            move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<Vec<u32>, ApiError>(vec![1, 2])
            },
        )
        .await
        .unwrap();
    assert_eq!(first.origin, Origin::Network);

    // An update-status style mutation that invalidates the Orders family.
    cache
        .mutate(&[Tag::all(Resource::Orders)], || async {
            Ok::<_, ApiError>(())
        })
        .await
        .unwrap();

    // The next read must hit the network, not return the pre-mutation array.
    let counter = Arc::clone(&calls);
    let second = cache
        .query(
            QueryKey::new("orders.admin.list", ""),
            vec![Tag::all(Resource::Orders)],
            move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<Vec<u32>, ApiError>(vec![1, 2, 3])
            },
        )
        .await
        .unwrap();
    assert_eq!(second.origin, Origin::Network);
    assert_eq!(second.value, vec![1, 2, 3]);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn failed_mutation_leaves_cache_untouched() {
    let cache = cache();
    let calls = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&calls);
    cache
        .query(
            QueryKey::new("payments.admin.list", ""),
            vec![Tag::all(Resource::Payments)],
            move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<Vec<u32>, ApiError>(vec![10])
            },
        )
        .await
        .unwrap();

    let result = cache
        .mutate(&[Tag::all(Resource::Payments)], || async {
            Err::<(), ApiError>(server_error())
        })
        .await;
    assert!(result.is_err());

    // The previously cached result stays servable without a re-fetch.
    let counter = Arc::clone(&calls);
    let read = cache
        .query(
            QueryKey::new("payments.admin.list", ""),
            vec![Tag::all(Resource::Payments)],
            move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<Vec<u32>, ApiError>(vec![99])
            },
        )
        .await
        .unwrap();
    assert_eq!(read.origin, Origin::Cache);
    assert_eq!(read.value, vec![10]);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn coarse_tag_invalidates_entity_keyed_entries() {
    let cache = cache();
    let calls = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&calls);
    cache
        .query(
            QueryKey::new("orders.get", "o_42"),
            vec![Tag::entity(Resource::Orders, "o_42")],
            move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<String, ApiError>("pending".into())
            },
        )
        .await
        .unwrap();

    cache.invalidate(&[Tag::all(Resource::Orders)]).await;

    let counter = Arc::clone(&calls);
    let read = cache
        .query(
            QueryKey::new("orders.get", "o_42"),
            vec![Tag::entity(Resource::Orders, "o_42")],
            move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<String, ApiError>("confirmed".into())
            },
        )
        .await
        .unwrap();
    assert_eq!(read.origin, Origin::Network);
    assert_eq!(read.value, "confirmed");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn entity_tag_leaves_siblings_fresh() {
    let cache = cache();
    let calls = Arc::new(AtomicUsize::new(0));

    for id in ["o_1", "o_2"] {
        let counter = Arc::clone(&calls);
        cache
            .query(
                QueryKey::new("orders.get", id),
                vec![Tag::entity(Resource::Orders, id)],
                move || async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok::<String, ApiError>(id.to_owned())
                },
            )
            .await
            .unwrap();
    }

    cache.invalidate(&[Tag::entity(Resource::Orders, "o_1")]).await;

    let counter = Arc::clone(&calls);
    let untouched = cache
        .query(
            QueryKey::new("orders.get", "o_2"),
            vec![Tag::entity(Resource::Orders, "o_2")],
            move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<String, ApiError>("refetched".into())
            },
        )
        .await
        .unwrap();
    assert_eq!(untouched.origin, Origin::Cache);
    assert_eq!(untouched.value, "o_2");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn failed_refetch_serves_stale_value_with_error() {
    let cache = cache();

    cache
        .query(
            QueryKey::new("products.list", ""),
            vec![Tag::all(Resource::Products)],
            || async { Ok::<Vec<u32>, ApiError>(vec![1, 2, 3]) },
        )
        .await
        .unwrap();

    cache.invalidate(&[Tag::all(Resource::Products)]).await;

    let read = cache
        .query(
            QueryKey::new("products.list", ""),
            vec![Tag::all(Resource::Products)],
            || async { Err::<Vec<u32>, ApiError>(server_error()) },
        )
        .await
        .unwrap();

    assert_eq!(read.origin, Origin::StaleCache);
    assert!(read.is_stale());
    assert_eq!(read.value, vec![1, 2, 3]);
    assert!(read.error.is_some());
}

#[tokio::test]
async fn failed_query_with_nothing_cached_propagates() {
    let cache = cache();

    let result = cache
        .query(
            QueryKey::new("products.list", ""),
            vec![Tag::all(Resource::Products)],
            || async { Err::<Vec<u32>, ApiError>(server_error()) },
        )
        .await;

    assert!(matches!(result, Err(ApiError::Status { status: 500, .. })));
}

#[tokio::test]
async fn duplicate_invalidation_is_idempotent() {
    let cache = cache();
    let calls = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&calls);
    cache
        .query(
            QueryKey::new("coupons.list", ""),
            vec![Tag::all(Resource::Coupons)],
            move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, ApiError>(1)
            },
        )
        .await
        .unwrap();

    // Rapid repeated mutations invalidating the same tag.
    cache.invalidate(&[Tag::all(Resource::Coupons)]).await;
    cache.invalidate(&[Tag::all(Resource::Coupons)]).await;

    let counter = Arc::clone(&calls);
    cache
        .query(
            QueryKey::new("coupons.list", ""),
            vec![Tag::all(Resource::Coupons)],
            move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, ApiError>(2)
            },
        )
        .await
        .unwrap();

    // One re-fetch total, not one per invalidation.
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn cross_family_invalidation_is_scoped() {
    let cache = cache();
    let calls = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&calls);
    cache
        .query(
            QueryKey::new("orders.admin.list", ""),
            vec![Tag::all(Resource::Orders)],
            move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, ApiError>(1)
            },
        )
        .await
        .unwrap();

    let counter = Arc::clone(&calls);
    cache
        .query(
            QueryKey::new("analytics.dashboard", ""),
            vec![Tag::all(Resource::Analytics)],
            move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, ApiError>(2)
            },
        )
        .await
        .unwrap();

    // A mark-paid style mutation touches Payments, Orders, and Analytics but
    // not, say, Coupons. Here only Orders is invalidated; analytics stays.
    cache.invalidate(&[Tag::all(Resource::Orders)]).await;

    let counter = Arc::clone(&calls);
    let analytics = cache
        .query(
            QueryKey::new("analytics.dashboard", ""),
            vec![Tag::all(Resource::Analytics)],
            move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, ApiError>(3)
            },
        )
        .await
        .unwrap();
    assert_eq!(analytics.origin, Origin::Cache);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn clear_drops_everything() {
    let cache = cache();
    let calls = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&calls);
    cache
        .query(
            QueryKey::new("settings.get", ""),
            vec![Tag::all(Resource::Settings)],
            move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, ApiError>(1)
            },
        )
        .await
        .unwrap();

    cache.clear().await;

    let counter = Arc::clone(&calls);
    let read = cache
        .query(
            QueryKey::new("settings.get", ""),
            vec![Tag::all(Resource::Settings)],
            move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, ApiError>(2)
            },
        )
        .await
        .unwrap();
    assert_eq!(read.origin, Origin::Network);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}
