//! Resolution cache — bounded LRU memo of identifier lookups.
//!
//! Holds both found items and "not found" markers. Negative markers
//! expire quickly because providers may still be registering their
//! items when traffic starts; positive entries live until their
//! (optional) TTL passes or they fall off the LRU end.
//!
//! The map and its recency order sit behind a single mutex so readers
//! never observe an entry whose bookkeeping is half updated. Eviction
//! happens only on insertion; there is no background sweeper.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use lru::LruCache;
use parking_lot::Mutex;

use crate::identifier::Identifier;
use crate::provider::ResolvedItem;

/// Source of "now" for TTL checks.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock for deterministic expiry.
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    offset: Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.offset.lock() += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + *self.offset.lock()
    }
}

/// Size and lifetime limits for a [`ResolutionCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    pub capacity: NonZeroUsize,
    /// `None` keeps positive entries until evicted.
    pub positive_ttl: Option<Duration>,
    pub negative_ttl: Duration,
}

/// Outcome of a cache read.
#[derive(Debug, Clone)]
pub enum CacheLookup {
    Hit(Arc<ResolvedItem>),
    /// A recent lookup found nothing.
    NegativeHit,
    Miss,
}

#[derive(Debug)]
enum Cached {
    Found(Arc<ResolvedItem>),
    Missing,
}

#[derive(Debug)]
struct CacheEntry {
    value: Cached,
    inserted_at: Instant,
    last_accessed_at: Instant,
}

impl CacheEntry {
    fn new(value: Cached, now: Instant) -> Self {
        Self {
            value,
            inserted_at: now,
            last_accessed_at: now,
        }
    }

    fn is_expired(&self, now: Instant, policy: &CachePolicy) -> bool {
        let ttl = match self.value {
            Cached::Found(_) => policy.positive_ttl,
            Cached::Missing => Some(policy.negative_ttl),
        };
        ttl.is_some_and(|ttl| now.saturating_duration_since(self.inserted_at) >= ttl)
    }

    fn lookup(&self) -> CacheLookup {
        match &self.value {
            Cached::Found(item) => CacheLookup::Hit(Arc::clone(item)),
            Cached::Missing => CacheLookup::NegativeHit,
        }
    }
}

/// Concurrent, bounded memo of identifier lookups.
pub struct ResolutionCache {
    entries: Mutex<LruCache<Identifier, CacheEntry>>,
    policy: CachePolicy,
    clock: Arc<dyn Clock>,
}

impl ResolutionCache {
    pub fn new(policy: CachePolicy) -> Self {
        Self::with_clock(policy, Arc::new(SystemClock))
    }

    pub fn with_clock(policy: CachePolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(policy.capacity)),
            policy,
            clock,
        }
    }

    /// Read an entry, refreshing its recency on a hit.
    ///
    /// Expired entries are dropped on the spot and reported as a miss.
    pub fn get(&self, id: &Identifier) -> CacheLookup {
        let now = self.clock.now();
        let mut entries = self.entries.lock();

        let Some(entry) = entries.get_mut(id) else {
            return CacheLookup::Miss;
        };
        if !entry.is_expired(now, &self.policy) {
            entry.last_accessed_at = now;
            return entry.lookup();
        }

        entries.pop(id);
        tracing::trace!(identifier = %id, "dropped expired cache entry");
        CacheLookup::Miss
    }

    /// Insert or replace a found item.
    pub fn put(&self, id: Identifier, item: Arc<ResolvedItem>) {
        self.insert(id, Cached::Found(item));
    }

    /// Insert or replace a "not found" marker.
    pub fn put_negative(&self, id: Identifier) {
        self.insert(id, Cached::Missing);
    }

    fn insert(&self, id: Identifier, value: Cached) {
        let now = self.clock.now();
        let entry = CacheEntry::new(value, now);
        let mut entries = self.entries.lock();
        if let Some((evicted, old)) = entries.push(id.clone(), entry)
            && evicted != id
        {
            tracing::debug!(
                identifier = %evicted,
                idle = ?now.saturating_duration_since(old.last_accessed_at),
                "evicted least recently used cache entry"
            );
        }
    }

    /// Remove one entry. Returns whether it was present.
    pub fn invalidate(&self, id: &Identifier) -> bool {
        self.entries.lock().pop(id).is_some()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn capacity(&self) -> NonZeroUsize {
        self.policy.capacity
    }

    pub fn policy(&self) -> &CachePolicy {
        &self.policy
    }
}
