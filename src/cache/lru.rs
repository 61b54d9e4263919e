//! LRU List Module
//!
//! Intrusive doubly linked recency list stored in an index-based arena.

use std::ops::Index;

use crate::cache::Entry;

// == LRU List ==
/// Recency ordering over slot-resident entries.
///
/// - `head` = most recently used, its `next` is always `None`
/// - `tail` = least recently used, its `prev` is always `None`
///
/// Freed slots are recycled through `free`, so slot indices stay stable for
/// as long as the entry they hold is resident.
#[derive(Debug)]
pub(crate) struct LruList<V> {
    slots: Vec<Option<Entry<V>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<V> Default for LruList<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> LruList<V> {
    // == Constructor ==
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    // == Accessors ==
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Slot of the most recently used entry.
    #[allow(dead_code)]
    pub fn head(&self) -> Option<usize> {
        self.head
    }

    /// Slot of the least recently used entry.
    #[allow(dead_code)]
    pub fn tail(&self) -> Option<usize> {
        self.tail
    }

    pub fn get(&self, slot: usize) -> Option<&Entry<V>> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut Entry<V>> {
        self.slots.get_mut(slot).and_then(Option::as_mut)
    }

    // == Push Head ==
    /// Stores a new entry as the most recently used one and returns its slot.
    pub fn push_head(&mut self, entry: Entry<V>) -> usize {
        let slot = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(entry);
                slot
            }
            None => {
                self.slots.push(Some(entry));
                self.slots.len() - 1
            }
        };
        self.link_head(slot);
        self.len += 1;
        slot
    }

    // == Move To Head ==
    /// Promotes a resident entry to most recently used.
    pub fn move_to_head(&mut self, slot: usize) {
        if self.head == Some(slot) || self.get(slot).is_none() {
            return;
        }
        self.unlink(slot);
        self.link_head(slot);
    }

    // == Remove ==
    /// Detaches and frees a slot, returning the entry it held.
    pub fn remove(&mut self, slot: usize) -> Option<Entry<V>> {
        self.get(slot)?;
        self.unlink(slot);
        let entry = self.slots[slot].take();
        self.free.push(slot);
        self.len -= 1;
        entry
    }

    // == Pop Tail ==
    /// Removes the least recently used entry.
    pub fn pop_tail(&mut self) -> Option<Entry<V>> {
        let tail = self.tail?;
        self.remove(tail)
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    // == Iteration ==
    /// Walks from head to tail through `prev` links.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len,
            towards: Towards::Tail,
        }
    }

    /// Walks from tail to head through `next` links.
    #[allow(dead_code)]
    pub fn iter_from_tail(&self) -> Iter<'_, V> {
        Iter {
            list: self,
            cursor: self.tail,
            remaining: self.len,
            towards: Towards::Head,
        }
    }

    fn link_head(&mut self, slot: usize) {
        let old_head = self.head;
        if let Some(entry) = self.get_mut(slot) {
            entry.next = None;
            entry.prev = old_head;
        }
        if let Some(old) = old_head {
            if let Some(entry) = self.get_mut(old) {
                entry.next = Some(slot);
            }
        }
        self.head = Some(slot);
        if self.tail.is_none() {
            self.tail = Some(slot);
        }
    }

    // Covers the sole, head, tail and interior cases: an end pointer moves to
    // the neighbour on the inner side, otherwise the neighbour is spliced.
    // Neighbours are only written when their slot is still occupied.
    fn unlink(&mut self, slot: usize) {
        let Some((prev, next)) = self.get(slot).map(|e| (e.prev, e.next)) else {
            return;
        };

        if self.head == Some(slot) {
            self.head = prev;
        }
        if let Some(entry) = prev.and_then(|p| self.get_mut(p)) {
            entry.next = next;
        }

        if self.tail == Some(slot) {
            self.tail = next;
        }
        if let Some(entry) = next.and_then(|n| self.get_mut(n)) {
            entry.prev = prev;
        }

        if let Some(entry) = self.get_mut(slot) {
            entry.prev = None;
            entry.next = None;
        }
    }
}

impl<V> Index<usize> for LruList<V> {
    type Output = Entry<V>;

    fn index(&self, slot: usize) -> &Entry<V> {
        match self.get(slot) {
            Some(entry) => entry,
            None => unreachable!("Attempted to access vacant slot {slot}"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Towards {
    Head,
    Tail,
}

// == Iterator ==
/// Iterator over resident entries in recency order.
pub(crate) struct Iter<'a, V> {
    list: &'a LruList<V>,
    cursor: Option<usize>,
    remaining: usize,
    towards: Towards,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a Entry<V>;

    fn next(&mut self) -> Option<Self::Item> {
        // `remaining` bounds the walk even if the links were ever corrupted
        if self.remaining == 0 {
            return None;
        }
        let list = self.list;
        let entry = list.get(self.cursor?)?;
        self.cursor = match self.towards {
            Towards::Tail => entry.prev,
            Towards::Head => entry.next,
        };
        self.remaining -= 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}
