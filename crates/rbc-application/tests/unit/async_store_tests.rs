//! Async facade tests

use crate::test_utils::memory_store;
use rbc_application::AsyncRobotsStore;
use rbc_domain::CachedEntry;
use std::time::Duration;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_async_roundtrip() {
    let (store, _pool, _perf) = memory_store();
    let store = AsyncRobotsStore::new(store);

    store
        .update_value("robots:example.com", CachedEntry::new("Disallow: /tmp", 120))
        .await
        .unwrap();
    let entry = store.get_value("robots:example.com").await.unwrap().unwrap();
    assert_eq!(entry.value(), Some("Disallow: /tmp"));

    store.push_key("crawl:queue", "example.com").await.unwrap();
    store
        .push_key_bounded("crawl:queue", "example.org", 1)
        .await
        .unwrap();
    assert_eq!(
        store.pop_key("crawl:queue").await.unwrap().as_deref(),
        Some("example.com")
    );
    assert_eq!(store.pool_stats().outstanding(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_pop_waits_for_concurrent_push() {
    let (store, _pool, _perf) = memory_store();
    let store = AsyncRobotsStore::new(store);

    let consumer = {
        let store = store.clone();
        tokio::spawn(async move { store.pop_key("crawl:queue").await })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;
    store.push_key("crawl:queue", "example.net").await.unwrap();

    let popped = consumer.await.unwrap().unwrap();
    assert_eq!(popped.as_deref(), Some("example.net"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_pop_can_be_timed_out_by_caller() {
    let (store, _pool, _perf) = memory_store();
    let store = AsyncRobotsStore::new(store);

    let waited =
        tokio::time::timeout(Duration::from_millis(100), store.pop_key("crawl:queue")).await;
    assert!(waited.is_err());

    // Wake the abandoned blocking pop so the runtime can shut down.
    store.close();
}
