// piiscan-core/src/cache.rs
//! In-memory, TTL-bound storage for scan results.
//!
//! Detected PII is kept only in memory and only for a short, configurable
//! duration; expired entries are pruned on every read and write and nothing
//! is ever written to disk. Time comes from an injected [`Clock`] so tests
//! can drive expiry deterministically.
//!
//! License: MIT OR Apache-2.0

use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde_json::Value;
use uuid::Uuid;

/// Default retention: 10 minutes. Configurable per entry.
pub const DEFAULT_TTL: Duration = Duration::from_secs(600);

/// Source of "now" for expiry checks.
pub trait Clock: Send + Sync {
    /// Time elapsed since the Unix epoch.
    fn now(&self) -> Duration;
}

/// Wall-clock implementation used in production.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    scan_id: String,
    stored_at: Duration,
    ttl: Duration,
    payload: Value,
}

/// Transient result store keyed by opaque scan ids.
pub struct ResultCache {
    entries: Mutex<Vec<CacheEntry>>,
    default_ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl ResultCache {
    /// Cache with the default TTL and the system clock.
    pub fn new() -> Self {
        Self::with_clock(DEFAULT_TTL, Arc::new(SystemClock))
    }

    pub fn with_clock(default_ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            default_ttl,
            clock,
        }
    }

    fn prune_expired(entries: &mut Vec<CacheEntry>, now: Duration) {
        entries.retain(|e| now.saturating_sub(e.stored_at) < e.ttl);
    }

    /// Stores a payload with a timestamp and TTL, returning the scan id for
    /// later retrieval. Expired entries are pruned first.
    pub fn put(&self, payload: Value, ttl: Option<Duration>) -> String {
        let now = self.clock.now();
        let mut entries = self.entries.lock().unwrap();
        Self::prune_expired(&mut entries, now);

        let scan_id = Uuid::new_v4().to_string();
        entries.push(CacheEntry {
            scan_id: scan_id.clone(),
            stored_at: now,
            ttl: ttl.unwrap_or(self.default_ttl),
            payload,
        });
        scan_id
    }

    /// Retrieves the payload for a scan id if it exists and has not
    /// expired. Expired entries (including others) are pruned as a side
    /// effect.
    pub fn get(&self, scan_id: &str) -> Option<Value> {
        let now = self.clock.now();
        let mut entries = self.entries.lock().unwrap();
        Self::prune_expired(&mut entries, now);
        entries
            .iter()
            .find(|e| e.scan_id == scan_id)
            .map(|e| e.payload.clone())
    }

    /// Number of entries still within their TTL.
    pub fn unexpired_len(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.entries.lock().unwrap();
        Self::prune_expired(&mut entries, now);
        entries.len()
    }

    /// Removes all entries. Use for tests or an explicit flush.
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Test clock advanced manually, in seconds.
    struct ManualClock(AtomicU64);

    impl ManualClock {
        fn new() -> Arc<Self> {
            Arc::new(Self(AtomicU64::new(0)))
        }
        fn advance_secs(&self, secs: u64) {
            self.0.fetch_add(secs, Ordering::SeqCst);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Duration {
            Duration::from_secs(self.0.load(Ordering::SeqCst))
        }
    }

    #[test]
    fn put_then_get_within_ttl() {
        let clock = ManualClock::new();
        let cache = ResultCache::with_clock(Duration::from_secs(600), clock.clone());
        let id = cache.put(serde_json::json!({"score": 85.0}), None);

        clock.advance_secs(599);
        let payload = cache.get(&id).expect("entry should still be live");
        assert_eq!(payload["score"], 85.0);
    }

    #[test]
    fn entries_expire_after_ttl() {
        let clock = ManualClock::new();
        let cache = ResultCache::with_clock(Duration::from_secs(600), clock.clone());
        let id = cache.put(serde_json::json!({"score": 10.0}), None);

        clock.advance_secs(600);
        assert!(cache.get(&id).is_none());
        assert_eq!(cache.unexpired_len(), 0);
    }

    #[test]
    fn per_entry_ttl_overrides_default() {
        let clock = ManualClock::new();
        let cache = ResultCache::with_clock(Duration::from_secs(600), clock.clone());
        let short = cache.put(serde_json::json!(1), Some(Duration::from_secs(5)));
        let long = cache.put(serde_json::json!(2), None);

        clock.advance_secs(10);
        assert!(cache.get(&short).is_none());
        assert!(cache.get(&long).is_some());
    }

    #[test]
    fn unknown_id_returns_none() {
        let cache = ResultCache::new();
        assert!(cache.get("no-such-scan").is_none());
    }

    #[test]
    fn clear_removes_everything() {
        let cache = ResultCache::new();
        cache.put(serde_json::json!(1), None);
        cache.put(serde_json::json!(2), None);
        cache.clear();
        assert_eq!(cache.unexpired_len(), 0);
    }
}
