//! Eviction Events Module
//!
//! The notification emitted when an entry leaves the cache involuntarily.

use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;

// == Eviction Reason ==
/// Why an entry left the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EvictionReason {
    /// Dropped as least recently used, either to make room or via `evict()`
    Capacity,
    /// Found older than the TTL during a lookup
    Expired,
}

// == Eviction ==
/// The `evict` event: the removed key and value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Eviction<V> {
    pub key: String,
    pub value: V,
    pub reason: EvictionReason,
}

/// A registered eviction callback. Returning `false` unregisters it.
pub(crate) type EvictionListener<V> = Box<dyn FnMut(&Eviction<V>) -> bool>;

/// Wraps a caller callback so it stays registered for the cache's lifetime.
pub(crate) fn callback_listener<V, F>(mut callback: F) -> EvictionListener<V>
where
    F: FnMut(&Eviction<V>) + 'static,
{
    Box::new(move |event: &Eviction<V>| {
        callback(event);
        true
    })
}

// == Channel Listener ==
/// Builds a listener that forwards clones of every event into `tx`.
///
/// Sending never blocks. Once the receiver is dropped the listener asks to be
/// unregistered without cloning the event.
pub(crate) fn channel_listener<V>(tx: UnboundedSender<Eviction<V>>) -> EvictionListener<V>
where
    V: Clone + 'static,
{
    Box::new(move |event: &Eviction<V>| {
        if tx.is_closed() {
            return false;
        }
        tx.send(event.clone()).is_ok()
    })
}
