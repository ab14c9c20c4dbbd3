//! LIFO stack backed by [`DoublyLinkedList`].
//!
//! The top of the stack is the tail of the list, so `push`, `pop` and
//! `peek` are all O(1).

use crate::collections::{linked_list, CollectionError, DoublyLinkedList};

/// Last-in, first-out stack.
///
/// ## Example
///
/// ```
/// use amis::collections::Stack;
///
/// let mut stack = Stack::new();
/// stack.push("first");
/// stack.push("second");
///
/// assert_eq!(stack.peek(), Ok(&"second"));
/// assert_eq!(stack.pop(), Ok("second"));
/// assert_eq!(stack.pop(), Ok("first"));
/// assert!(stack.pop().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stack<T> {
    list: DoublyLinkedList<T>,
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Stack<T> {
    /// Create an empty stack
    pub fn new() -> Self {
        Self {
            list: DoublyLinkedList::new(),
        }
    }

    /// Put an element on top
    #[inline]
    pub fn push(&mut self, value: T) {
        self.list.push_back(value);
    }

    /// Remove and return the top element
    ///
    /// # Errors
    ///
    /// [`CollectionError::EmptyCollection`] if the stack is empty
    #[inline]
    pub fn pop(&mut self) -> Result<T, CollectionError> {
        self.list.pop_back()
    }

    /// Borrow the top element
    #[inline]
    pub fn peek(&self) -> Result<&T, CollectionError> {
        self.list.back()
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

    /// Iterate from the bottom (oldest) to the top (newest)
    ///
    /// Call `.rev()` for most-recent-first order.
    pub fn iter(&self) -> linked_list::Iter<'_, T> {
        self.list.iter()
    }
}

impl<T> FromIterator<T> for Stack<T> {
    /// Push every element in order; the last one ends up on top
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            list: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a Stack<T> {
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
    fn test_stack_lifo_order() {
        let mut stack = Stack::new();
        for i in 0..5 {
            stack.push(i);
        }

        let mut popped = Vec::new();
        while let Ok(value) = stack.pop() {
            popped.push(value);
        }
        assert_eq!(popped, vec![4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_stack_empty_errors() {
        let mut stack: Stack<u8> = Stack::new();

        assert_eq!(stack.pop(), Err(CollectionError::EmptyCollection));
        assert_eq!(stack.peek(), Err(CollectionError::EmptyCollection));
    }

    #[test]
    fn test_stack_peek_does_not_remove() {
        let mut stack = Stack::new();
        stack.push('a');

        assert_eq!(stack.peek(), Ok(&'a'));
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_stack_iter_bottom_to_top() {
        let stack: Stack<i32> = (1..=3).collect();

        assert_eq!(stack.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(stack.iter().rev().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
        assert_eq!(stack.peek(), Ok(&3));
    }

    #[test]
    fn test_stack_clear() {
        let mut stack: Stack<i32> = (1..=3).collect();
        stack.clear();

        assert!(stack.is_empty());
        assert!(stack.peek().is_err());
    }
}
