//! Domain layer constants
//!
//! Names and sentinels shared by the application layer and the store
//! providers. Infrastructure-specific constants live in
//! `rbc_infrastructure::constants`.

// ============================================================================
// PERFORMANCE LOGGING
// ============================================================================

/// Operation name reported for a cache read (value plus TTL)
pub const GET_TTL_OPERATION: &str = "RedisGetTTL";

/// Annotation prefix for a cache read that found a value
pub const CACHE_HIT_PREFIX: &str = "REDIS HIT: ";

/// Annotation prefix for a cache read that found nothing
pub const CACHE_MISS_PREFIX: &str = "REDIS MISS: ";

// ============================================================================
// STORE SENTINELS
// ============================================================================

/// TTL reported for a key that exists but has no expiry
pub const TTL_NO_EXPIRY: i64 = -1;

/// TTL reported for a key that does not exist
pub const TTL_MISSING_KEY: i64 = -2;

/// Blocking pop timeout meaning "wait forever"
pub const BLOCK_FOREVER: u64 = 0;
