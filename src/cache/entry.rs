//! Cache Entry Module
//!
//! Defines a single resident entry: its payload, age stamp and recency links.

use std::time::{Duration, Instant};

// == Entry ==
/// One cached mapping, stored in a slot of the recency list.
///
/// `prev` points towards the least recently used end, `next` towards the most
/// recently used end. Both are slot indices, `None` at the ends.
#[derive(Debug, Clone)]
pub(crate) struct Entry<V> {
    /// Canonical key, kept so an evicted slot can report what it held
    pub key: String,
    /// The stored value
    pub value: V,
    /// Time of the last insert/update, only stamped when TTL is enabled
    pub last_modified: Option<Instant>,
    pub(crate) prev: Option<usize>,
    pub(crate) next: Option<usize>,
}

impl<V> Entry<V> {
    // == Constructor ==
    /// Creates an unlinked entry, stamping it when `stamp` is true.
    pub fn new(key: String, value: V, stamp: bool) -> Self {
        Self {
            key,
            value,
            last_modified: stamp.then(Instant::now),
            prev: None,
            next: None,
        }
    }

    // == Is Expired ==
    /// Checks the entry's age against `ttl`.
    ///
    /// Boundary condition: an entry expires only once strictly more than `ttl`
    /// has elapsed since it was last written. An unstamped entry or a missing
    /// TTL never expires.
    pub fn is_expired(&self, ttl: Option<Duration>) -> bool {
        match (ttl, self.last_modified) {
            (Some(ttl), Some(stamp)) => stamp.elapsed() > ttl,
            _ => false,
        }
    }

    // == Touch ==
    /// Refreshes the age stamp after an update.
    pub fn touch(&mut self) {
        if self.last_modified.is_some() {
            self.last_modified = Some(Instant::now());
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_entry_creation_unstamped() {
        let entry = Entry::new("k".to_string(), 1, false);

        assert_eq!(entry.key, "k");
        assert_eq!(entry.value, 1);
        assert!(entry.last_modified.is_none());
        assert!(entry.prev.is_none() && entry.next.is_none());
    }

    #[test]
    fn test_unstamped_entry_never_expires() {
        let entry = Entry::new("k".to_string(), 1, false);
        assert!(!entry.is_expired(Some(Duration::ZERO)));
    }

    #[test]
    fn test_no_ttl_never_expires() {
        let entry = Entry::new("k".to_string(), 1, true);
        sleep(Duration::from_millis(5));
        assert!(!entry.is_expired(None));
    }

    #[test]
    fn test_entry_expiration() {
        let entry = Entry::new("k".to_string(), 1, true);

        assert!(!entry.is_expired(Some(Duration::from_secs(60))));

        sleep(Duration::from_millis(30));

        assert!(entry.is_expired(Some(Duration::from_millis(10))));
    }

    #[test]
    fn test_touch_resets_age() {
        let mut entry = Entry::new("k".to_string(), 1, true);
        sleep(Duration::from_millis(40));
        assert!(entry.is_expired(Some(Duration::from_millis(20))));

        entry.touch();

        assert!(!entry.is_expired(Some(Duration::from_millis(20))));
    }

    #[test]
    fn test_touch_keeps_unstamped_entry_unstamped() {
        let mut entry = Entry::new("k".to_string(), 1, false);
        entry.touch();
        assert!(entry.last_modified.is_none());
    }
}
