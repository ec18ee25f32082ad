//! A FIFO queue with random access by rank and queue-to-queue
//! concatenation. Feeds the edge quicksort in [`crate::kruskal`].

use std::collections::VecDeque;
use std::error::Error;
use std::fmt;

/// Error returned by [`LinkedQueue::dequeue`] on an empty queue.
///
/// Queue bookkeeping is caller-enforced (`dequeue` is only valid while
/// `is_empty` is false), so seeing this error indicates a programming
/// mistake rather than a runtime condition to recover from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueEmptyError;

impl fmt::Display for QueueEmptyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("dequeue from an empty queue")
    }
}

impl Error for QueueEmptyError {}

/// A first-in, first-out queue.
///
/// # Examples
///
/// ```rust
/// use wugraph::LinkedQueue;
///
/// let mut queue = LinkedQueue::new();
/// queue.enqueue(1);
/// queue.enqueue(2);
/// assert_eq!(queue.nth(1), Some(&2));
/// assert_eq!(queue.dequeue(), Ok(1));
/// assert_eq!(queue.dequeue(), Ok(2));
/// assert!(queue.dequeue().is_err());
/// ```
pub struct LinkedQueue<T> {
    items: VecDeque<T>,
}

impl<T> Default for LinkedQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LinkedQueue<T> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        LinkedQueue {
            items: VecDeque::new(),
        }
    }

    /// Returns the number of queued items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the queue holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds an item at the back. O(1).
    pub fn enqueue(&mut self, item: T) {
        self.items.push_back(item);
    }

    /// Removes and returns the front item, or [`QueueEmptyError`] if the
    /// queue is empty. O(1).
    pub fn dequeue(&mut self) -> Result<T, QueueEmptyError> {
        self.items.pop_front().ok_or(QueueEmptyError)
    }

    /// Borrows the front item without removing it.
    pub fn front(&self) -> Option<&T> {
        self.items.front()
    }

    /// Borrows the item at rank `k` counted from the front, or `None` if
    /// `k >= len()`. Used for pivot selection.
    pub fn nth(&self, k: usize) -> Option<&T> {
        self.items.get(k)
    }

    /// Moves every item of `other` onto the back of `self`, leaving `other`
    /// empty.
    pub fn append(&mut self, other: &mut LinkedQueue<T>) {
        self.items.append(&mut other.items);
    }
}
