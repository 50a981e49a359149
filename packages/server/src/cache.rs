//! Short-lived cache of resolved attachment URLs.
//!
//! Signed upstream attachment URLs expire faster than the consumer's
//! cache lifetime, so the redirect endpoints resolve them on demand and
//! remember the result here briefly. Entries expire by wall-clock
//! comparison at read time; there is no background sweep and no size
//! bound (cardinality is bounded by upstream attachment count).

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use network_map_features::AttachmentKind;

/// Identifies one resolvable attachment slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Which attachment field the URL came from.
    pub kind: AttachmentKind,
    /// Upstream record id.
    pub record_id: String,
    /// Index into the record's attachment array.
    pub index: usize,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    url: String,
    expires_at: Instant,
}

/// Time-bound map from attachment slot to last-known-good URL.
///
/// Concurrent refreshes of the same key are benign: both writers compute
/// an equally-valid fresh URL and the last one wins.
#[derive(Debug)]
pub struct UrlCache {
    ttl: Duration,
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
}

impl UrlCache {
    /// Creates an empty cache whose entries live for `ttl`.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached URL for `key` if present and unexpired.
    ///
    /// Expired entries are evicted on the spot.
    #[must_use]
    pub fn get(&self, key: &CacheKey) -> Option<String> {
        self.get_at(key, Instant::now())
    }

    /// Stores `url` under `key` with a fresh TTL.
    pub fn put(&self, key: CacheKey, url: String) {
        self.put_at(key, url, Instant::now());
    }

    fn get_at(&self, key: &CacheKey, now: Instant) -> Option<String> {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        match entries.get(key) {
            Some(entry) if entry.expires_at > now => Some(entry.url.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    fn put_at(&self, key: CacheKey, url: String, now: Instant) {
        let entry = CacheEntry {
            url,
            expires_at: now + self.ttl,
        };
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, entry);
    }
}
