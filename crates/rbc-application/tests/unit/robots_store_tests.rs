//! robots.txt cache and crawl queue tests

use crate::test_utils::memory_store;
use rbc_domain::constants::GET_TTL_OPERATION;
use rbc_domain::ports::ConnectionPool;
use rbc_domain::{CachedEntry, Error};
use rbc_providers::Fault;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

#[test]
fn test_get_unwritten_key_is_miss() {
    let (store, pool, perf) = memory_store();

    assert_eq!(store.get_value("robots:never-written").unwrap(), None);

    assert_eq!(perf.operations(), vec![GET_TTL_OPERATION.to_string()]);
    assert_eq!(perf.annotations(), vec!["REDIS MISS: robots:never-written"]);
    assert_eq!(pool.stats().released, 1);
}

#[test]
fn test_write_then_read_returns_value_and_ttl() {
    let (store, _pool, perf) = memory_store();
    let body = "User-agent: *\nDisallow: /private";

    store
        .update_value("robots:example.com", &CachedEntry::new(body, 3600))
        .unwrap();
    let entry = store.get_value("robots:example.com").unwrap().unwrap();

    assert_eq!(entry.value(), Some(body));
    assert!(entry.ttl_secs > 0 && entry.ttl_secs <= 3600);
    assert_eq!(perf.annotations(), vec!["REDIS HIT: robots:example.com"]);
}

#[test]
fn test_write_overwrites_previous_value() {
    let (store, _pool, _perf) = memory_store();

    store.update_value("k", &CachedEntry::new("old", 100)).unwrap();
    store.update_value("k", &CachedEntry::new("new", 50)).unwrap();

    let entry = store.get_value("k").unwrap().unwrap();
    assert_eq!(entry.value(), Some("new"));
    assert!(entry.ttl_secs <= 50);
}

#[test]
fn test_expiry_only_update_does_not_create_key() {
    let (store, pool, _perf) = memory_store();

    store
        .update_value("robots:missing", &CachedEntry::expiry_only(600))
        .unwrap();

    assert!(!pool.store().contains_key("robots:missing"));
    assert_eq!(store.get_value("robots:missing").unwrap(), None);
}

#[test]
fn test_expiry_only_update_keeps_value() {
    let (store, _pool, _perf) = memory_store();
    store
        .update_value("robots:example.com", &CachedEntry::new("Disallow: /", 1000))
        .unwrap();

    store
        .update_value("robots:example.com", &CachedEntry::expiry_only(10))
        .unwrap();

    let entry = store.get_value("robots:example.com").unwrap().unwrap();
    assert_eq!(entry.value(), Some("Disallow: /"));
    assert!(entry.ttl_secs <= 10);
}

#[test]
fn test_write_with_non_positive_ttl_is_rejected() {
    let (store, pool, _perf) = memory_store();

    let err = store
        .update_value("k", &CachedEntry::new("v", 0))
        .unwrap_err();

    assert!(matches!(err, Error::Command { .. }));
    assert_eq!(pool.stats().released, 1);
    assert_eq!(pool.stats().discarded, 0);
}

#[test]
fn test_read_of_list_key_propagates_command_error() {
    let (store, pool, perf) = memory_store();
    store.push_key("crawl:queue", "example.com").unwrap();

    let err = store.get_value("crawl:queue").unwrap_err();

    assert!(matches!(err, Error::Command { .. }));
    assert!(perf.annotations().is_empty());
    assert_eq!(pool.stats().discarded, 0);
}

#[test]
fn test_push_then_pop_returns_key() {
    let (store, _pool, _perf) = memory_store();

    store.push_key("crawl:queue", "example.com").unwrap();

    assert_eq!(
        store.pop_key("crawl:queue").unwrap().as_deref(),
        Some("example.com")
    );
}

#[test]
fn test_queue_is_fifo() {
    let (store, _pool, _perf) = memory_store();

    for host in ["a.example", "b.example", "c.example"] {
        store.push_key("crawl:queue", host).unwrap();
    }

    let popped: Vec<_> = (0..3)
        .map(|_| store.pop_key("crawl:queue").unwrap().unwrap())
        .collect();
    assert_eq!(popped, vec!["a.example", "b.example", "c.example"]);
}

#[test]
fn test_bounded_push_stops_at_max() {
    let (store, pool, _perf) = memory_store();

    for i in 0..5 {
        store
            .push_key_bounded("crawl:queue", &format!("host-{i}"), 3)
            .unwrap();
    }

    assert_eq!(pool.store().llen("crawl:queue").unwrap(), 3);
}

#[test]
fn test_bounded_push_at_max_leaves_length_unchanged() {
    let (store, pool, _perf) = memory_store();
    store.push_key("crawl:queue", "a").unwrap();
    store.push_key("crawl:queue", "b").unwrap();

    store.push_key_bounded("crawl:queue", "c", 2).unwrap();
    assert_eq!(pool.store().llen("crawl:queue").unwrap(), 2);

    store.push_key_bounded("crawl:queue", "c", 3).unwrap();
    assert_eq!(pool.store().llen("crawl:queue").unwrap(), 3);
}

#[test]
fn test_connection_failure_on_every_operation() {
    let (store, pool, perf) = memory_store();

    pool.inject_fault(Fault::Connection);
    assert_eq!(store.get_value("k").unwrap(), None);

    pool.inject_fault(Fault::Connection);
    store.update_value("k", &CachedEntry::new("v", 60)).unwrap();

    pool.inject_fault(Fault::Connection);
    store.push_key("q", "a").unwrap();

    pool.inject_fault(Fault::Connection);
    store.push_key_bounded("q", "a", 10).unwrap();

    pool.inject_fault(Fault::Connection);
    assert_eq!(store.pop_key("q").unwrap(), None);

    let stats = pool.stats();
    assert_eq!(stats.discarded, 5);
    assert_eq!(stats.released, 0);
    assert!(!pool.store().contains_key("k"));
    assert!(!pool.store().contains_key("q"));
    assert_eq!(perf.annotations(), vec!["REDIS MISS: k"]);
}

#[test]
fn test_unreachable_store_reads_as_miss() {
    let (store, pool, perf) = memory_store();

    pool.fail_next_connect();
    assert_eq!(store.get_value("robots:example.com").unwrap(), None);

    pool.fail_next_connect();
    assert_eq!(store.pop_key("q").unwrap(), None);

    let stats = pool.stats();
    assert_eq!(stats.acquired, 0);
    assert_eq!(stats.discarded, 0);
    assert_eq!(perf.annotations(), vec!["REDIS MISS: robots:example.com"]);
}

#[test]
fn test_pop_blocks_until_producer_pushes() {
    let (store, _pool, _perf) = memory_store();
    let producer_store = store.clone();

    let producer = thread::spawn(move || {
        thread::sleep(Duration::from_millis(200));
        producer_store.push_key("crawl:queue", "late.example").unwrap();
    });

    let started = Instant::now();
    let popped = store.pop_key("crawl:queue").unwrap();

    assert_eq!(popped.as_deref(), Some("late.example"));
    assert!(started.elapsed() >= Duration::from_millis(150));
    producer.join().unwrap();
}

#[test]
fn test_close_interrupts_blocked_pop() {
    let (store, pool, _perf) = memory_store();
    let consumer_store = store.clone();

    let consumer = thread::spawn(move || consumer_store.pop_key("crawl:queue"));
    thread::sleep(Duration::from_millis(200));
    store.close();

    assert_eq!(consumer.join().unwrap().unwrap(), None);
    assert_eq!(pool.stats().discarded, 1);
}

#[test]
fn test_calls_after_close_fail_acquisition() {
    let (store, _pool, _perf) = memory_store();
    store.close();

    assert!(matches!(store.get_value("k"), Err(Error::PoolClosed)));
    assert!(matches!(store.push_key("q", "a"), Err(Error::PoolClosed)));
}

#[test]
fn test_store_is_shareable_across_threads() {
    let (store, pool, _perf) = memory_store();
    let store = Arc::new(store);

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let key = format!("robots:host-{i}");
                store.update_value(&key, &CachedEntry::new("Allow: /", 60)).unwrap();
                store.get_value(&key).unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap().is_some());
    }
    assert_eq!(pool.stats().outstanding(), 0);
}
