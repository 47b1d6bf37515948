//! Stable max-priority queue.
//!
//! A plain `BinaryHeap` does not preserve insertion order among equal
//! priorities. Each entry therefore carries a serial number that strictly
//! decreases with every insert, and entries compare on `(priority, serial)`:
//! higher priority wins, and on ties the older (larger serial) entry wins.

use std::{cmp::Ordering, collections::BinaryHeap};

#[derive(Debug, Clone)]
struct Entry<T> {
    priority: i32,
    serial: u64,
    value: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.serial == other.serial
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then(self.serial.cmp(&other.serial))
    }
}

/// Values ordered by descending priority, FIFO among equal priorities.
///
/// # Example
///
/// ```rust,ignore
/// let mut queue = ListenerQueue::new();
/// queue.insert("low", 0);
/// queue.insert("high", 10);
/// queue.insert("low-2", 0);
///
/// assert_eq!(queue.to_vec(), vec!["high", "low", "low-2"]);
/// ```
#[derive(Debug, Clone)]
pub struct ListenerQueue<T> {
    heap: BinaryHeap<Entry<T>>,
    serial: u64,
}

impl<T> ListenerQueue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            serial: u64::MAX,
        }
    }

    /// Insert a value with the given priority.
    pub fn insert(&mut self, value: T, priority: i32) {
        let serial = self.serial;
        self.serial -= 1;
        self.heap.push(Entry {
            priority,
            serial,
            value,
        });
    }

    /// Iterate values from highest to lowest priority without mutating the queue.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        let mut entries: Vec<&Entry<T>> = self.heap.iter().collect();
        entries.sort_unstable_by(|a, b| b.cmp(a));
        entries.into_iter().map(|entry| &entry.value)
    }

    /// Keep only the values matching `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        self.heap.retain(|entry| keep(&entry.value));
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the queue holds no values.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<T: Clone> ListenerQueue<T> {
    /// Drain a copy of the queue into a vector, highest priority first.
    pub fn to_vec(&self) -> Vec<T> {
        let mut heap = self.heap.clone();
        let mut values = Vec::with_capacity(heap.len());
        while let Some(entry) = heap.pop() {
            values.push(entry.value);
        }
        values
    }
}

impl<T> Default for ListenerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
