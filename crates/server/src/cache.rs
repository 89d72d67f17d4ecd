//! Expiring in-memory cache for response envelopes.
//!
//! Entries are keyed by the exact request tuple and expire after a fixed
//! TTL; a capacity bound evicts in insertion order. Expiry is time-driven,
//! checked lazily on access. Timestamps use `tokio::time::Instant` so a
//! paused test clock drives expiry deterministically.
//!
//! Only successful envelopes are ever stored — the store decision lives in
//! the handler, which skips `put` for failures so a transient upstream
//! error cannot poison subsequent identical requests.

use reelay_core::config::CacheConfig;
use reelay_core::envelope::ResponseEnvelope;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

/// Identity of one logical query. A different `count` is a different
/// query even for the same user.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct CacheKey {
    pub user_id: String,
    pub max_cursor: i64,
    pub count: u32,
}

struct CacheSlot {
    envelope: ResponseEnvelope,
    inserted_at: Instant,
}

struct CacheInner {
    entries: HashMap<CacheKey, CacheSlot>,
    /// Insertion order for eviction. Holds exactly the keys in `entries`.
    order: VecDeque<CacheKey>,
}

/// Shared response cache. Created at process start, never torn down.
pub struct VideoCache {
    /// None when caching is disabled in config; every lookup then misses.
    inner: Option<Mutex<CacheInner>>,
    ttl: Duration,
    max_entries: usize,
}

impl VideoCache {
    /// Build a cache from configuration.
    pub fn from_config(config: &CacheConfig) -> Self {
        let inner = config.enabled.then(|| {
            Mutex::new(CacheInner {
                entries: HashMap::new(),
                order: VecDeque::new(),
            })
        });
        Self {
            inner,
            ttl: Duration::from_secs(config.ttl_secs),
            max_entries: config.max_entries,
        }
    }

    /// Look up an envelope. An expired entry behaves as absent and is
    /// dropped on the spot.
    pub fn get(&self, key: &CacheKey) -> Option<ResponseEnvelope> {
        let mut inner = self.inner.as_ref()?.lock().expect("cache lock poisoned");

        let expired = match inner.entries.get(key) {
            Some(slot) if slot.inserted_at.elapsed() < self.ttl => {
                return Some(slot.envelope.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            inner.entries.remove(key);
            inner.order.retain(|k| k != key);
        }
        None
    }

    /// Insert an envelope, replacing any entry for the same key and
    /// evicting the oldest entries once the capacity bound is exceeded.
    pub fn put(&self, key: CacheKey, envelope: ResponseEnvelope) {
        let Some(inner) = self.inner.as_ref() else {
            return;
        };
        let mut inner = inner.lock().expect("cache lock poisoned");

        if inner.entries.contains_key(&key) {
            inner.order.retain(|k| k != &key);
        }
        inner.order.push_back(key.clone());
        inner.entries.insert(
            key,
            CacheSlot {
                envelope,
                inserted_at: Instant::now(),
            },
        );

        while inner.entries.len() > self.max_entries {
            let Some(oldest) = inner.order.pop_front() else {
                break;
            };
            inner.entries.remove(&oldest);
        }
    }

    /// Number of live entries, including any not yet expired-on-access.
    pub fn len(&self) -> usize {
        self.inner
            .as_ref()
            .map(|inner| inner.lock().expect("cache lock poisoned").entries.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
