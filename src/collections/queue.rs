//! FIFO queue backed by [`DoublyLinkedList`].
//!
//! Elements are appended at the tail and consumed from the head. The
//! inventory keeps its purchase history in one.

use crate::collections::{linked_list, CollectionError, DoublyLinkedList};

/// First-in, first-out queue.
///
/// ## Example
///
/// ```
/// use amis::collections::Queue;
///
/// let mut queue = Queue::new();
/// queue.enqueue(1);
/// queue.enqueue(2);
///
/// assert_eq!(queue.peek(), Ok(&1));
/// assert_eq!(queue.dequeue(), Ok(1));
/// assert_eq!(queue.dequeue(), Ok(2));
/// assert!(queue.dequeue().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Queue<T> {
    list: DoublyLinkedList<T>,
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Queue<T> {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            list: DoublyLinkedList::new(),
        }
    }

    /// Append an element at the back
    #[inline]
    pub fn enqueue(&mut self, value: T) {
        self.list.push_back(value);
    }

    /// Remove and return the front element
    ///
    /// # Errors
    ///
    /// [`CollectionError::EmptyCollection`] if the queue is empty
    #[inline]
    pub fn dequeue(&mut self) -> Result<T, CollectionError> {
        self.list.pop_front()
    }

    /// Borrow the front element
    #[inline]
    pub fn peek(&self) -> Result<&T, CollectionError> {
        self.list.front()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn clear(&mut self) {
        self.list.clear();
    }

    /// Check if any queued element equals `value`
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.list.contains(value)
    }

    /// Iterate from front to back without consuming
    pub fn iter(&self) -> linked_list::Iter<'_, T> {
        self.list.iter()
    }
}

impl<T> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            list: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a Queue<T> {
    type Item = &'a T;
    type IntoIter = linked_list::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_fifo_order() {
        let mut queue = Queue::new();
        for i in 0..5 {
            queue.enqueue(i);
        }

        let mut drained = Vec::new();
        while let Ok(value) = queue.dequeue() {
            drained.push(value);
        }
        assert_eq!(drained, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_queue_empty_errors() {
        let mut queue: Queue<u8> = Queue::new();

        assert_eq!(queue.dequeue(), Err(CollectionError::EmptyCollection));
        assert_eq!(queue.peek(), Err(CollectionError::EmptyCollection));
    }

    #[test]
    fn test_queue_interleaved() {
        let mut queue = Queue::new();
        queue.enqueue("a");
        queue.enqueue("b");
        assert_eq!(queue.dequeue(), Ok("a"));
        queue.enqueue("c");

        assert_eq!(queue.iter().copied().collect::<Vec<_>>(), vec!["b", "c"]);
        assert!(queue.contains(&"c"));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_queue_peek_does_not_remove() {
        let queue: Queue<i32> = vec![3, 4].into_iter().collect();

        assert_eq!(queue.peek(), Ok(&3));
        assert_eq!(queue.len(), 2);
    }
}
