//! Array-backed binary min-heap used as the event queue.
//!
//! Extraction always yields the smallest element currently stored. There is no
//! decrease-key or arbitrary removal: superseded events stay in the heap and are
//! discarded by the driver when they surface.
//!
//! Storage starts at [`INITIAL_CAPACITY`] slots and grows by doubling once full.

use crate::error::{Error, Result};

/// Number of slots reserved by [`EventQueue::new`].
pub const INITIAL_CAPACITY: usize = 128;

/// A binary min-heap over any totally ordered item.
#[derive(Debug, Clone)]
pub struct EventQueue<T> {
    storage: Vec<T>,
}

impl<T: Ord> EventQueue<T> {
    /// Creates an empty queue with the default initial capacity.
    ///
    /// # Examples
    /// ```
    /// # use partsim::core::EventQueue;
    /// let mut queue = EventQueue::new();
    /// queue.insert(3);
    /// queue.insert(1);
    /// queue.insert(2);
    ///
    /// assert_eq!(queue.extract_min().ok(), Some(1));
    /// assert_eq!(queue.extract_min().ok(), Some(2));
    /// assert_eq!(queue.extract_min().ok(), Some(3));
    /// assert!(queue.extract_min().is_err());
    /// ```
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    /// Creates an empty queue with room for `capacity` items before growing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: Vec::with_capacity(capacity.max(1)),
        }
    }

    /// Number of items in the queue.
    #[inline]
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Slots currently reserved.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// Smallest item, if any.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.storage.first()
    }

    /// Inserts an item, sifting it toward the root while it is smaller than its parent.
    pub fn insert(&mut self, item: T) {
        if self.storage.len() == self.storage.capacity() {
            let extra = self.storage.capacity().max(1);
            self.storage.reserve_exact(extra);
        }
        self.storage.push(item);
        self.sift_up(self.storage.len() - 1);
    }

    /// Removes and returns the smallest item.
    ///
    /// # Errors
    /// [`Error::EmptyQueue`] when called on an empty queue. For the simulation driver
    /// this means the termination event was never scheduled.
    pub fn extract_min(&mut self) -> Result<T> {
        let last = self.storage.len().checked_sub(1).ok_or(Error::EmptyQueue)?;
        self.storage.swap(0, last);
        let min = self.storage.pop().ok_or(Error::EmptyQueue)?;
        if !self.storage.is_empty() {
            self.sift_down(0);
        }
        Ok(min)
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.storage[index] < self.storage[parent] {
                self.storage.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.storage.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut smallest = index;
            if left < len && self.storage[left] < self.storage[smallest] {
                smallest = left;
            }
            if right < len && self.storage[right] < self.storage[smallest] {
                smallest = right;
            }
            if smallest == index {
                break;
            }
            self.storage.swap(index, smallest);
            index = smallest;
        }
    }
}

impl<T: Ord> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
