//! Slab-backed doubly linked list.
//!
//! [`List`] keeps values in recency order: the front is the most recently
//! used end and the back is the least recently used end. Nodes live in a
//! `Vec` of slots and link to each other by slot index, so there are no raw
//! pointers and no per-node boxes. A removed node's slot goes onto a free
//! list and is reused by the next insert.
//!
//! Inserting returns a [`Handle`], a small `Copy` value that names the node
//! for later [`remove`](List::remove) and [`move_to_front`](List::move_to_front)
//! calls. Handles carry the slot's 64-bit generation; once a node is removed
//! its slot's generation is bumped, so a stale handle does not reach whatever
//! node later reuses the slot unless that one slot is recycled 2^64 times.
//! Operations given a stale handle do nothing.
//!
//! ```
//! use sync_lru_cache::list::List;
//!
//! let mut list = List::new();
//! let a = list.push_front("a");
//! let b = list.push_front("b");
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), ["b", "a"]);
//!
//! list.move_to_front(a);
//! assert_eq!(list.front(), Some(a));
//! assert_eq!(list.back(), Some(b));
//!
//! assert_eq!(list.remove(b), Some("b"));
//! assert_eq!(list.remove(b), None);
//! assert_eq!(list.len(), 1);
//! ```

use crate::error::InvariantError;
use core::fmt;

/// Opaque reference to a node in a [`List`].
///
/// A handle only names a node; the node itself stays owned by the list.
/// It becomes stale as soon as the node is removed or the list is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    index: usize,
    generation: u64,
}

/// A linked node: the payload and the indices of its neighbours.
struct Entry<T> {
    val: T,
    /// Slot of the next node towards the front, `None` at the head.
    prev: Option<usize>,
    /// Slot of the next node towards the back, `None` at the tail.
    next: Option<usize>,
}

struct Slot<T> {
    generation: u64,
    entry: Option<Entry<T>>,
}

/// A doubly linked list whose nodes are stored in a slab.
///
/// All operations except [`clear`](List::clear) and iteration are O(1).
/// An insert allocates at most one slot, and none when a freed slot is
/// available.
pub struct List<T> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<T> List<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` nodes before the slab
    /// has to grow.
    pub fn with_capacity(capacity: usize) -> Self {
        List {
            slots: Vec::with_capacity(capacity),
            free: Vec::with_capacity(capacity),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Returns the current number of nodes in the list.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list contains no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the handle of the most recently used node.
    pub fn front(&self) -> Option<Handle> {
        self.head.map(|index| self.handle_at(index))
    }

    /// Returns the handle of the least recently used node.
    pub fn back(&self) -> Option<Handle> {
        self.tail.map(|index| self.handle_at(index))
    }

    /// Returns true if `handle` names a live node of this list.
    pub fn contains(&self, handle: Handle) -> bool {
        self.entry(handle).is_some()
    }

    /// Inserts `val` as the new front node and returns its handle.
    ///
    /// If the list was empty the node is both front and back.
    pub fn push_front(&mut self, val: T) -> Handle {
        let handle = self.allocate(val);
        self.attach_front(handle.index);
        self.len += 1;
        handle
    }

    /// Inserts `val` as the new back node and returns its handle.
    pub fn push_back(&mut self, val: T) -> Handle {
        let handle = self.allocate(val);
        self.attach_back(handle.index);
        self.len += 1;
        handle
    }

    /// Detaches the node named by `handle` and returns its payload.
    ///
    /// Neighbours are relinked, or the front/back updated when the node was
    /// an endpoint. The handle is stale afterwards. Returns `None`, leaving
    /// the list untouched, if the handle was already stale.
    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        if !self.contains(handle) {
            return None;
        }
        self.detach(handle.index);

        let slot = &mut self.slots[handle.index];
        let entry = slot.entry.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.len -= 1;
        Some(entry.val)
    }

    /// Relinks the node named by `handle` as the front node.
    ///
    /// The payload is not touched. Does nothing if the node is already the
    /// front or the handle is stale.
    pub fn move_to_front(&mut self, handle: Handle) {
        if !self.contains(handle) || self.head == Some(handle.index) {
            return;
        }
        self.detach(handle.index);
        self.attach_front(handle.index);
    }

    /// Returns the payload of the node named by `handle`.
    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.entry(handle).map(|entry| &entry.val)
    }

    /// Returns the payload of the node named by `handle` for in-place update.
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.slots
            .get_mut(handle.index)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.entry.as_mut())
            .map(|entry| &mut entry.val)
    }

    /// Removes every node. All outstanding handles become stale.
    ///
    /// Slots are kept for reuse, so refilling the list does not allocate.
    pub fn clear(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.entry.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index);
            }
        }
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Iterates payloads from the front (most recent) to the back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            next: self.head,
            remaining: self.len,
        }
    }

    /// Walks the links and checks them against the bookkeeping.
    ///
    /// Verifies that the front has no previous node, the back has no next
    /// node, every `next` link is mirrored by a `prev` link, the walk visits
    /// exactly `len` nodes and the slab has no leaked slots.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let mut visited = 0usize;
        let mut prev: Option<usize> = None;
        let mut cursor = self.head;

        while let Some(index) = cursor {
            let entry = self
                .entry_at(index)
                .ok_or_else(|| InvariantError::new(format!("link to vacant slot {}", index)))?;
            if entry.prev != prev {
                return Err(InvariantError::new(format!(
                    "slot {} has prev {:?}, expected {:?}",
                    index, entry.prev, prev
                )));
            }
            visited += 1;
            if visited > self.len {
                return Err(InvariantError::new(format!(
                    "walk visited more than {} nodes",
                    self.len
                )));
            }
            prev = cursor;
            cursor = entry.next;
        }

        if prev != self.tail {
            return Err(InvariantError::new(format!(
                "walk ended at {:?} but tail is {:?}",
                prev, self.tail
            )));
        }
        if visited != self.len {
            return Err(InvariantError::new(format!(
                "walk visited {} nodes but len is {}",
                visited, self.len
            )));
        }
        if self.free.len() + self.len != self.slots.len() {
            return Err(InvariantError::new(format!(
                "{} free slots and {} live nodes do not cover {} slots",
                self.free.len(),
                self.len,
                self.slots.len()
            )));
        }
        Ok(())
    }

    fn handle_at(&self, index: usize) -> Handle {
        Handle {
            index,
            generation: self.slots[index].generation,
        }
    }

    fn entry(&self, handle: Handle) -> Option<&Entry<T>> {
        self.slots
            .get(handle.index)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.entry.as_ref())
    }

    fn entry_at(&self, index: usize) -> Option<&Entry<T>> {
        self.slots.get(index).and_then(|slot| slot.entry.as_ref())
    }

    fn entry_at_mut(&mut self, index: usize) -> Option<&mut Entry<T>> {
        self.slots.get_mut(index).and_then(|slot| slot.entry.as_mut())
    }

    /// Places `val` in a free slot, or a new one, without linking it.
    fn allocate(&mut self, val: T) -> Handle {
        let entry = Entry {
            val,
            prev: None,
            next: None,
        };
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.entry = Some(entry);
                Handle {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    entry: Some(entry),
                });
                Handle {
                    index: self.slots.len() - 1,
                    generation: 0,
                }
            }
        }
    }

    /// Unlinks the node in slot `index`, leaving it allocated.
    fn detach(&mut self, index: usize) {
        let (prev, next) = match self.entry_at(index) {
            Some(entry) => (entry.prev, entry.next),
            None => return,
        };

        match prev {
            Some(p) => {
                if let Some(entry) = self.entry_at_mut(p) {
                    entry.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(n) => {
                if let Some(entry) = self.entry_at_mut(n) {
                    entry.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        if let Some(entry) = self.entry_at_mut(index) {
            entry.prev = None;
            entry.next = None;
        }
    }

    /// Links the detached node in slot `index` in front of the current head.
    fn attach_front(&mut self, index: usize) {
        let old_head = self.head;
        if let Some(entry) = self.entry_at_mut(index) {
            entry.prev = None;
            entry.next = old_head;
        }
        match old_head {
            Some(h) => {
                if let Some(entry) = self.entry_at_mut(h) {
                    entry.prev = Some(index);
                }
            }
            None => self.tail = Some(index),
        }
        self.head = Some(index);
    }

    /// Links the detached node in slot `index` behind the current tail.
    fn attach_back(&mut self, index: usize) {
        let old_tail = self.tail;
        if let Some(entry) = self.entry_at_mut(index) {
            entry.prev = old_tail;
            entry.next = None;
        }
        match old_tail {
            Some(t) => {
                if let Some(entry) = self.entry_at_mut(t) {
                    entry.next = Some(index);
                }
            }
            None => self.head = Some(index),
        }
        self.tail = Some(index);
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List")
            .field("length", &self.len)
            .field("slots", &self.slots.len())
            .finish()
    }
}

/// Front-to-back iterator over a [`List`], created by [`List::iter`].
pub struct Iter<'a, T> {
    list: &'a List<T>,
    next: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let entry = self.list.entry_at(self.next?)?;
        self.next = entry.next;
        self.remaining -= 1;
        Some(&entry.val)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.remaining)
            .finish()
    }
}
