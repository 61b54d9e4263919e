//! Cache Store Module
//!
//! Main cache engine combining a key table with the recency list, capacity
//! enforcement, lazy TTL expiry and eviction notification.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, warn};

use crate::cache::eviction::{callback_listener, channel_listener};
use crate::cache::{CacheStats, Entry, Eviction, EvictionListener, EvictionReason, LruList};
use crate::config::CacheOptions;
use crate::error::Result;

// == LRU Cache ==
/// Bounded key-value cache with LRU eviction and optional TTL.
///
/// Keys are normalized to their `ToString` form, so `cache.set(7, v)` and
/// `cache.get("7")` address the same entry. The cache does no locking of its
/// own; wrap it in a mutex to share it.
pub struct LruCache<V> {
    /// Canonical key to list slot
    table: HashMap<String, usize>,
    /// Entries in recency order
    list: LruList<V>,
    capacity: usize,
    ttl: Option<Duration>,
    listeners: Vec<EvictionListener<V>>,
    stats: CacheStats,
}

impl<V> LruCache<V> {
    // == Constructor ==
    /// Creates a cache from a bare capacity or a full `CacheOptions`.
    ///
    /// A zero capacity is raised to 1; use [`LruCache::try_new`] to reject it
    /// instead.
    pub fn new(options: impl Into<CacheOptions>) -> Self {
        let options = options.into();
        let capacity = if options.max == 0 {
            warn!("Cache capacity of 0 requested, using 1");
            1
        } else {
            options.max
        };

        Self {
            table: HashMap::new(),
            list: LruList::new(),
            capacity,
            ttl: options.ttl_duration(),
            listeners: Vec::new(),
            stats: CacheStats::new(),
        }
    }

    /// Creates a cache, failing on invalid options.
    pub fn try_new(options: impl Into<CacheOptions>) -> Result<Self> {
        let options = options.into();
        options.validate()?;
        Ok(Self::new(options))
    }

    // == Set ==
    /// Stores `value` under `key` as the most recently used entry.
    ///
    /// Updating a present key replaces its value and restarts its TTL without
    /// evicting anything. Inserting a new key into a full cache first evicts
    /// the least recently used entry.
    pub fn set<K: ToString>(&mut self, key: K, value: V) -> &V {
        let key = key.to_string();

        let existing = self.table.get(&key).copied();
        let slot = match existing {
            Some(slot) => {
                if let Some(entry) = self.list.get_mut(slot) {
                    entry.value = value;
                    entry.touch();
                }
                self.list.move_to_head(slot);
                slot
            }
            None => {
                if self.list.len() >= self.capacity {
                    self.evict();
                }
                let entry = Entry::new(key.clone(), value, self.ttl.is_some());
                let slot = self.list.push_head(entry);
                self.table.insert(key, slot);
                slot
            }
        };

        &self.list[slot].value
    }

    // == Get ==
    /// Returns the value for `key` and marks it most recently used.
    ///
    /// An expired entry is removed, reported to eviction listeners, and
    /// treated as absent.
    pub fn get<K: ToString>(&mut self, key: K) -> Option<&V> {
        let slot = self.lookup(&key.to_string())?;
        self.list.move_to_head(slot);
        self.list.get(slot).map(|entry| &entry.value)
    }

    // == Peek ==
    /// Like [`LruCache::get`] but leaves the recency order untouched.
    pub fn peek<K: ToString>(&mut self, key: K) -> Option<&V> {
        let slot = self.lookup(&key.to_string())?;
        self.list.get(slot).map(|entry| &entry.value)
    }

    // == Remove ==
    /// Deletes `key` and returns its value. Never notifies listeners and
    /// ignores the TTL.
    pub fn remove<K: ToString>(&mut self, key: K) -> Option<V> {
        self.take(&key.to_string()).map(|entry| entry.value)
    }

    // == Evict ==
    /// Drops the least recently used entry and notifies listeners.
    ///
    /// Does nothing on an empty cache.
    pub fn evict(&mut self) {
        let Some(entry) = self.list.pop_tail() else {
            return;
        };
        self.table.remove(&entry.key);
        self.stats.record_eviction();
        debug!(key = %entry.key, "Evicted least recently used entry");

        self.notify(Eviction {
            key: entry.key,
            value: entry.value,
            reason: EvictionReason::Capacity,
        });
    }

    // == Clear ==
    /// Drops every entry without notifying listeners. Capacity, TTL,
    /// listeners and counters are kept.
    pub fn clear(&mut self) {
        self.table.clear();
        self.list.clear();
    }

    // == Keys ==
    /// Resident keys in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }

    /// Resident keys from most to least recently used.
    pub fn keys_by_recency(&self) -> impl Iterator<Item = &str> {
        self.list.iter().map(|entry| entry.key.as_str())
    }

    /// Checks residency without touching recency, stats or expiry.
    pub fn contains_key<K: ToString>(&self, key: K) -> bool {
        self.table.contains_key(&key.to_string())
    }

    // == Listeners ==
    /// Registers a callback run synchronously for every eviction.
    pub fn on_evict<F>(&mut self, listener: F)
    where
        F: FnMut(&Eviction<V>) + 'static,
    {
        self.listeners.push(callback_listener(listener));
    }

    /// Returns a channel receiving a copy of every eviction event.
    ///
    /// Dropping the receiver unsubscribes it at the next eviction.
    pub fn subscribe(&mut self) -> UnboundedReceiver<Eviction<V>>
    where
        V: Clone + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        self.listeners.push(channel_listener(tx));
        rx
    }

    // == Accessors ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The entry lifetime, `None` when expiry is disabled.
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.len());
        stats
    }

    // Resolves a key for get/peek, expiring it if it is too old.
    fn lookup(&mut self, key: &str) -> Option<usize> {
        let Some(&slot) = self.table.get(key) else {
            self.stats.record_miss();
            return None;
        };

        let expired = self
            .list
            .get(slot)
            .is_some_and(|entry| entry.is_expired(self.ttl));
        if expired {
            self.expire(key);
            self.stats.record_miss();
            return None;
        }

        self.stats.record_hit();
        Some(slot)
    }

    fn expire(&mut self, key: &str) {
        let Some(entry) = self.take(key) else {
            return;
        };
        self.stats.record_expiration();
        debug!(key = %entry.key, "Expired entry removed on lookup");

        self.notify(Eviction {
            key: entry.key,
            value: entry.value,
            reason: EvictionReason::Expired,
        });
    }

    fn take(&mut self, key: &str) -> Option<Entry<V>> {
        let slot = self.table.remove(key)?;
        self.list.remove(slot)
    }

    fn notify(&mut self, event: Eviction<V>) {
        self.listeners.retain_mut(|listener| listener(&event));
    }

    /// Panics if the key table and the recency list disagree.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        assert_eq!(self.table.len(), self.list.len(), "size != |table|");
        assert!(self.len() <= self.capacity, "size exceeds capacity");

        match self.len() {
            0 => assert!(self.list.head().is_none() && self.list.tail().is_none()),
            1 => assert_eq!(self.list.head(), self.list.tail()),
            _ => {}
        }
        if let Some(head) = self.list.head() {
            assert!(self.list[head].next.is_none(), "head has a next link");
        }
        if let Some(tail) = self.list.tail() {
            assert!(self.list[tail].prev.is_none(), "tail has a prev link");
        }

        let forward: Vec<&str> = self.keys_by_recency().collect();
        let mut backward: Vec<&str> = self
            .list
            .iter_from_tail()
            .map(|entry| entry.key.as_str())
            .collect();
        backward.reverse();
        assert_eq!(forward, backward, "prev and next walks disagree");
        assert_eq!(forward.len(), self.table.len(), "walk missed entries");

        for (key, &slot) in &self.table {
            assert_eq!(&self.list[slot].key, key, "table points at wrong slot");
        }
    }
}

impl<V> Default for LruCache<V> {
    fn default() -> Self {
        Self::new(CacheOptions::default())
    }
}

impl<V: fmt::Debug> fmt::Debug for LruCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.capacity)
            .field("ttl", &self.ttl)
            .field("len", &self.len())
            .field("listeners", &self.listeners.len())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
