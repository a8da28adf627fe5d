//! Sliding TTL cache for resolved link sets.
//!
//! One entry per list identifier. Reads refresh the entry's timestamp, so a
//! list in active use never expires; only an access gap longer than the
//! freshness window does.

mod cache;

pub use cache::{CacheConfig, CacheEntry, CacheStats, LinkCache};
