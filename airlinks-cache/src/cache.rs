//! In-memory TTL cache for link sets.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::debug;

use airlinks_core::constants::FRESHNESS_WINDOW_MS;
use airlinks_core::types::Link;

/// A cached link set and the time it was last served or stored.
#[derive(Clone, Debug)]
pub struct CacheEntry {
    /// Resolved links
    pub links: Vec<Link>,
    /// Last store or fresh hit
    pub cached_at: Instant,
}

impl CacheEntry {
    fn new(links: Vec<Link>) -> Self {
        Self {
            links,
            cached_at: Instant::now(),
        }
    }

    fn is_fresh(&self, now: Instant, window: Duration) -> bool {
        now.saturating_duration_since(self.cached_at) < window
    }

    /// Time since the entry was stored or last hit.
    pub fn age(&self) -> Duration {
        self.cached_at.elapsed()
    }
}

/// Cache configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Sliding freshness window in milliseconds
    pub freshness_window_ms: u64,
    /// Whether a stale entry is removed when a read finds it
    pub evict_stale: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            freshness_window_ms: FRESHNESS_WINDOW_MS,
            evict_stale: true,
        }
    }
}

impl CacheConfig {
    /// Freshness window as a `Duration`.
    pub fn freshness_window(&self) -> Duration {
        Duration::from_millis(self.freshness_window_ms)
    }
}

/// In-memory cache of link sets keyed by list record identifier.
///
/// Thread-safe. Keys are used verbatim since record identifiers are
/// case-sensitive.
///
/// Every [`clear`](Self::clear) starts a new generation. A resolution that
/// began before a clear can use [`put_if_current`](Self::put_if_current) so its
/// result is dropped instead of outliving the clear.
pub struct LinkCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    generation: AtomicU64,
    config: CacheConfig,
}

impl LinkCache {
    /// Creates a new cache with default configuration.
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    /// Creates a cache with custom configuration.
    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            generation: AtomicU64::new(0),
            config,
        }
    }

    /// Returns the cached entry for `key` if it is still fresh.
    ///
    /// A fresh hit moves `cached_at` to now. A stale entry reads as absent
    /// and is dropped when `evict_stale` is set.
    pub fn get(&self, key: &str) -> Option<CacheEntry> {
        let now = Instant::now();
        let window = self.config.freshness_window();
        let mut entries = self.entries.write();

        let fresh = entries.get(key)?.is_fresh(now, window);
        if fresh {
            let entry = entries.get_mut(key)?;
            debug!(key, age_ms = entry.age().as_millis() as u64, "Fresh hit");
            entry.cached_at = now;
            return Some(entry.clone());
        }

        if self.config.evict_stale {
            entries.remove(key);
            debug!(key, "Evicted stale entry");
        }
        None
    }

    /// Stores `links` for `key`, replacing any previous entry.
    pub fn put(&self, key: &str, links: Vec<Link>) {
        self.entries
            .write()
            .insert(key.to_string(), CacheEntry::new(links));
    }

    /// Stores `links` for `key` unless the cache was cleared since
    /// `generation` was read.
    ///
    /// Returns false when the links were dropped.
    pub fn put_if_current(&self, key: &str, links: Vec<Link>, generation: u64) -> bool {
        let mut entries = self.entries.write();
        if self.generation.load(Ordering::Acquire) != generation {
            debug!(key, "Cache cleared during resolution, dropping result");
            return false;
        }
        entries.insert(key.to_string(), CacheEntry::new(links));
        true
    }

    /// Returns the current generation.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Removes a cached entry.
    pub fn remove(&self, key: &str) -> bool {
        self.entries.write().remove(key).is_some()
    }

    /// Clears all cached entries.
    pub fn clear(&self) {
        let mut entries = self.entries.write();
        entries.clear();
        self.generation.fetch_add(1, Ordering::AcqRel);
    }

    /// Removes all stale entries.
    pub fn cleanup_expired(&self) -> usize {
        let now = Instant::now();
        let window = self.config.freshness_window();
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, e| e.is_fresh(now, window));
        before - entries.len()
    }

    /// Returns the number of cached entries, stale ones included.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        let now = Instant::now();
        let window = self.config.freshness_window();
        let entries = self.entries.read();
        let expired = entries.values().filter(|e| !e.is_fresh(now, window)).count();
        CacheStats {
            total_entries: entries.len(),
            expired_entries: expired,
            valid_entries: entries.len().saturating_sub(expired),
            cached_links: entries.values().map(|e| e.links.len()).sum(),
        }
    }
}

impl Default for LinkCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheStats {
    pub total_entries: usize,
    pub expired_entries: usize,
    pub valid_entries: usize,
    pub cached_links: usize,
}
