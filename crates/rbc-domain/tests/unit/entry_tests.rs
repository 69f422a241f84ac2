//! Tests for the cached entry value object

use rbc_domain::CachedEntry;
use rbc_domain::constants::{TTL_MISSING_KEY, TTL_NO_EXPIRY};

#[test]
fn test_entry_with_value() {
    let entry = CachedEntry::new("User-agent: *", 3600);

    assert!(entry.has_value());
    assert_eq!(entry.value(), Some("User-agent: *"));
    assert_eq!(entry.ttl_secs, 3600);
    assert!(!entry.is_persistent());
}

#[test]
fn test_expiry_only_entry() {
    let entry = CachedEntry::expiry_only(60);

    assert!(!entry.has_value());
    assert_eq!(entry.value(), None);
    assert_eq!(entry.ttl_secs, 60);
}

#[test]
fn test_store_sentinels() {
    assert!(CachedEntry::new("x", TTL_NO_EXPIRY).is_persistent());
    assert!(!CachedEntry::new("x", TTL_MISSING_KEY).is_persistent());
}

#[test]
fn test_entry_serialization() {
    let entry = CachedEntry::new("Disallow: /private", 120);
    let json = serde_json::to_string(&entry).unwrap();

    assert!(json.contains("\"ttl_secs\":120"));
    let back: CachedEntry = serde_json::from_str(&json).unwrap();
    assert_eq!(back, entry);
}
