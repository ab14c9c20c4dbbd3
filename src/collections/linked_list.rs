//! Doubly linked list with slab-based node storage.
//!
//! ## Design
//!
//! Nodes live in a [`Slab`] owned by the list and point at each other by
//! slab key. The list keeps the head and tail keys, which gives O(1)
//! insertion and removal at both ends:
//!
//! ```text
//! head <-> node <-> node <-> tail
//! ```
//!
//! Indexed operations walk from the head and are O(n).
//!
//! ## Invariants
//!
//! - `head.prev` and `tail.next` are always `None`
//! - Every node in the slab is reachable from `head`, so `len()` is the
//!   slab length
//! - The list is acyclic

use std::fmt;
use std::iter::FusedIterator;
use std::mem;

use slab::Slab;

use crate::collections::{CollectionError, ListNode};

/// A doubly linked list whose nodes are stored in a slab arena.
///
/// ## Example
///
/// ```
/// use amis::collections::DoublyLinkedList;
///
/// let mut list = DoublyLinkedList::new();
/// list.push_back(2);
/// list.push_back(3);
/// list.push_front(1);
///
/// assert_eq!(list.len(), 3);
/// assert_eq!(list.get(1), Ok(&2));
/// assert_eq!(list.pop_back(), Ok(3));
/// ```
#[derive(Clone)]
pub struct DoublyLinkedList<T> {
    /// Node storage
    nodes: Slab<ListNode<T>>,

    /// First node (slab key)
    head: Option<usize>,

    /// Last node (slab key)
    tail: Option<usize>,
}

impl<T> Default for DoublyLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DoublyLinkedList<T> {
    /// Create a new empty list
    pub fn new() -> Self {
        Self {
            nodes: Slab::new(),
            head: None,
            tail: None,
        }
    }

    /// Create an empty list with room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Slab::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    // ========================================================================
    // Size
    // ========================================================================

    /// Number of elements in the list
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the list is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Remove every element
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    // ========================================================================
    // Endpoint Operations
    // ========================================================================

    /// Insert an element at the head
    pub fn push_front(&mut self, value: T) {
        let key = self.nodes.insert(ListNode::new(value));

        if let Some(old_head) = self.head {
            self.nodes[old_head].prev = Some(key);
            self.nodes[key].next = Some(old_head);
        } else {
            // Empty list - this is also the tail
            self.tail = Some(key);
        }

        self.head = Some(key);
    }

    /// Insert an element at the tail
    pub fn push_back(&mut self, value: T) {
        let key = self.nodes.insert(ListNode::new(value));

        if let Some(old_tail) = self.tail {
            self.nodes[old_tail].next = Some(key);
            self.nodes[key].prev = Some(old_tail);
        } else {
            // Empty list - this is also the head
            self.head = Some(key);
        }

        self.tail = Some(key);
    }

    /// Remove and return the head element
    ///
    /// # Errors
    ///
    /// [`CollectionError::EmptyCollection`] if the list is empty
    pub fn pop_front(&mut self) -> Result<T, CollectionError> {
        let key = self.head.ok_or(CollectionError::EmptyCollection)?;
        Ok(self.unlink(key))
    }

    /// Remove and return the tail element
    ///
    /// # Errors
    ///
    /// [`CollectionError::EmptyCollection`] if the list is empty
    pub fn pop_back(&mut self) -> Result<T, CollectionError> {
        let key = self.tail.ok_or(CollectionError::EmptyCollection)?;
        Ok(self.unlink(key))
    }

    /// Borrow the head element
    pub fn front(&self) -> Result<&T, CollectionError> {
        self.head
            .map(|key| &self.nodes[key].value)
            .ok_or(CollectionError::EmptyCollection)
    }

    /// Borrow the tail element
    pub fn back(&self) -> Result<&T, CollectionError> {
        self.tail
            .map(|key| &self.nodes[key].value)
            .ok_or(CollectionError::EmptyCollection)
    }

    /// Mutably borrow the head element
    pub fn front_mut(&mut self) -> Result<&mut T, CollectionError> {
        let key = self.head.ok_or(CollectionError::EmptyCollection)?;
        Ok(&mut self.nodes[key].value)
    }

    /// Mutably borrow the tail element
    pub fn back_mut(&mut self) -> Result<&mut T, CollectionError> {
        let key = self.tail.ok_or(CollectionError::EmptyCollection)?;
        Ok(&mut self.nodes[key].value)
    }

    // ========================================================================
    // Indexed Operations
    // ========================================================================

    /// Borrow the element at `index`
    ///
    /// # Errors
    ///
    /// [`CollectionError::IndexOutOfRange`] unless `index < len()`
    pub fn get(&self, index: usize) -> Result<&T, CollectionError> {
        let key = self.key_at(index)?;
        Ok(&self.nodes[key].value)
    }

    /// Mutably borrow the element at `index`
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, CollectionError> {
        let key = self.key_at(index)?;
        Ok(&mut self.nodes[key].value)
    }

    /// Replace the element at `index`, returning the previous value
    pub fn set(&mut self, index: usize, value: T) -> Result<T, CollectionError> {
        let key = self.key_at(index)?;
        Ok(mem::replace(&mut self.nodes[key].value, value))
    }

    /// Insert an element so that it ends up at `index`
    ///
    /// `index == len()` appends.
    ///
    /// # Errors
    ///
    /// [`CollectionError::IndexOutOfRange`] if `index > len()`
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), CollectionError> {
        let len = self.len();
        if index > len {
            return Err(CollectionError::IndexOutOfRange { index, len });
        }

        if index == len {
            self.push_back(value);
        } else {
            let at = self.key_at(index)?;
            self.link_before(at, value);
        }
        Ok(())
    }

    /// Remove and return the element at `index`
    pub fn remove(&mut self, index: usize) -> Result<T, CollectionError> {
        let key = self.key_at(index)?;
        Ok(self.unlink(key))
    }

    /// Copy the elements in `[from, to)` into a new list
    ///
    /// # Errors
    ///
    /// [`CollectionError::IndexOutOfRange`] if `to > len()` or `from > to`
    pub fn sublist(&self, from: usize, to: usize) -> Result<Self, CollectionError>
    where
        T: Clone,
    {
        let len = self.len();
        if to > len {
            return Err(CollectionError::IndexOutOfRange { index: to, len });
        }
        if from > to {
            return Err(CollectionError::IndexOutOfRange { index: from, len: to });
        }

        let mut sub = Self::with_capacity(to - from);
        for value in self.iter().skip(from).take(to - from) {
            sub.push_back(value.clone());
        }
        Ok(sub)
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Check if any element equals `value`
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|v| v == value)
    }

    /// Position of the first element equal to `value`
    pub fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().position(|v| v == value)
    }

    /// Position of the last element equal to `value`
    pub fn last_index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter()
            .rev()
            .position(|v| v == value)
            .map(|from_back| self.len() - 1 - from_back)
    }

    /// Remove the first element equal to `value`
    pub fn remove_item(&mut self, value: &T) -> Option<T>
    where
        T: PartialEq,
    {
        let mut current = self.head;
        while let Some(key) = current {
            let node = &self.nodes[key];
            if node.value == *value {
                return Some(self.unlink(key));
            }
            current = node.next;
        }
        None
    }

    // ========================================================================
    // Traversal
    // ========================================================================

    /// Borrowing iterator from head to tail (reversible)
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            front: self.head,
            back: self.tail,
            remaining: self.len(),
        }
    }

    /// Cursor positioned before the head
    pub fn cursor_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut {
            next: self.head,
            next_index: 0,
            last_returned: None,
            list: self,
        }
    }

    /// Cursor positioned before the element at `index`
    ///
    /// `index == len()` places the cursor after the tail.
    pub fn cursor_mut_at(&mut self, index: usize) -> Result<CursorMut<'_, T>, CollectionError> {
        let len = self.len();
        let next = match index {
            i if i < len => Some(self.key_at(i)?),
            i if i == len => None,
            _ => return Err(CollectionError::IndexOutOfRange { index, len }),
        };

        Ok(CursorMut {
            next,
            next_index: index,
            last_returned: None,
            list: self,
        })
    }

    // ========================================================================
    // Internal Linking
    // ========================================================================

    /// Walk from the head to the node at `index`
    fn key_at(&self, index: usize) -> Result<usize, CollectionError> {
        let len = self.len();
        if index >= len {
            return Err(CollectionError::IndexOutOfRange { index, len });
        }

        let mut current = self.head;
        for _ in 0..index {
            current = current.and_then(|key| self.nodes[key].next);
        }
        current.ok_or(CollectionError::IndexOutOfRange { index, len })
    }

    /// Link a new node immediately before `at`, returning its key
    fn link_before(&mut self, at: usize, value: T) -> usize {
        let prev_key = self.nodes[at].prev;

        let mut node = ListNode::new(value);
        node.prev = prev_key;
        node.next = Some(at);
        let key = self.nodes.insert(node);

        self.nodes[at].prev = Some(key);
        if let Some(prev) = prev_key {
            self.nodes[prev].next = Some(key);
        } else {
            // Inserted before the head
            self.head = Some(key);
        }

        key
    }

    /// Detach the node at `key` from its neighbours and free it
    fn unlink(&mut self, key: usize) -> T {
        let node = self.nodes.remove(key);

        // Update the previous node's next pointer
        if let Some(prev) = node.prev {
            self.nodes[prev].next = node.next;
        } else {
            // This was the head
            self.head = node.next;
        }

        // Update the next node's prev pointer
        if let Some(next) = node.next {
            self.nodes[next].prev = node.prev;
        } else {
            // This was the tail
            self.tail = node.prev;
        }

        node.value
    }
}

impl<T: fmt::Debug> fmt::Debug for DoublyLinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for DoublyLinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for DoublyLinkedList<T> {}

impl<T> FromIterator<T> for DoublyLinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for DoublyLinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a DoublyLinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for DoublyLinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

// ============================================================================
// Iterators
// ============================================================================

/// Borrowing iterator over a [`DoublyLinkedList`]
#[derive(Debug)]
pub struct Iter<'a, T> {
    nodes: &'a Slab<ListNode<T>>,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let nodes: &'a Slab<ListNode<T>> = self.nodes;
        let node = &nodes[self.front?];
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let nodes: &'a Slab<ListNode<T>> = self.nodes;
        let node = &nodes[self.back?];
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Owning iterator over a [`DoublyLinkedList`]
#[derive(Debug)]
pub struct IntoIter<T> {
    list: DoublyLinkedList<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.list.pop_front().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back().ok()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

// ============================================================================
// Cursor
// ============================================================================

/// Bidirectional cursor that can edit the list in place.
///
/// The cursor sits *between* elements. [`move_next`](Self::move_next) and
/// [`move_prev`](Self::move_prev) step over one element and return it; that
/// element becomes the target of [`remove_current`](Self::remove_current)
/// and [`replace_current`](Self::replace_current) until the next structural
/// edit made through the cursor.
///
/// ```
/// use amis::collections::DoublyLinkedList;
///
/// let mut list: DoublyLinkedList<i32> = (1..=4).collect();
/// let mut cursor = list.cursor_mut();
/// while let Some(value) = cursor.move_next() {
///     if *value % 2 == 0 {
///         cursor.remove_current();
///     }
/// }
///
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 3]);
/// ```
#[derive(Debug)]
pub struct CursorMut<'a, T> {
    list: &'a mut DoublyLinkedList<T>,

    /// Node the next call to `move_next` returns
    next: Option<usize>,

    /// Index of `next` (equals `len()` past the tail)
    next_index: usize,

    /// Node returned by the last move, if still valid
    last_returned: Option<usize>,
}

impl<'a, T> CursorMut<'a, T> {
    /// Check if an element follows the cursor
    #[inline]
    pub fn has_next(&self) -> bool {
        self.next_index < self.list.len()
    }

    /// Check if an element precedes the cursor
    #[inline]
    pub fn has_previous(&self) -> bool {
        self.next_index > 0
    }

    /// Index of the element `move_next` would return
    #[inline]
    pub fn next_index(&self) -> usize {
        self.next_index
    }

    /// Index of the element `move_prev` would return
    #[inline]
    pub fn previous_index(&self) -> Option<usize> {
        self.next_index.checked_sub(1)
    }

    /// Step forward over one element and return it
    pub fn move_next(&mut self) -> Option<&mut T> {
        let key = self.next?;
        self.next = self.list.nodes[key].next;
        self.next_index += 1;
        self.last_returned = Some(key);
        Some(&mut self.list.nodes[key].value)
    }

    /// Step backward over one element and return it
    pub fn move_prev(&mut self) -> Option<&mut T> {
        if !self.has_previous() {
            return None;
        }
        let key = match self.next {
            Some(next) => self.list.nodes[next].prev,
            None => self.list.tail,
        }?;
        self.next = Some(key);
        self.next_index -= 1;
        self.last_returned = Some(key);
        Some(&mut self.list.nodes[key].value)
    }

    /// Remove the element returned by the last move
    ///
    /// Returns `None` if nothing has been returned since the last edit.
    pub fn remove_current(&mut self) -> Option<T> {
        let key = self.last_returned.take()?;
        let following = self.list.nodes[key].next;

        if self.next == Some(key) {
            // Returned by move_prev: the cursor now precedes its successor
            self.next = following;
        } else {
            self.next_index -= 1;
        }

        Some(self.list.unlink(key))
    }

    /// Replace the element returned by the last move
    pub fn replace_current(&mut self, value: T) -> Option<T> {
        let key = self.last_returned?;
        Some(mem::replace(&mut self.list.nodes[key].value, value))
    }

    /// Insert an element immediately before the cursor
    ///
    /// A following `move_next` is unaffected; `move_prev` returns the new
    /// element.
    pub fn insert_before(&mut self, value: T) {
        self.last_returned = None;
        match self.next {
            Some(at) => {
                self.list.link_before(at, value);
            }
            None => self.list.push_back(value),
        }
        self.next_index += 1;
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn collect<T: Clone>(list: &DoublyLinkedList<T>) -> Vec<T> {
        list.iter().cloned().collect()
    }

    /// Walk the links in both directions and check they agree with len()
    fn assert_links_consistent<T>(list: &DoublyLinkedList<T>) {
        let mut forward = Vec::new();
        let mut current = list.head;
        while let Some(key) = current {
            forward.push(key);
            current = list.nodes[key].next;
        }

        let mut backward = Vec::new();
        let mut current = list.tail;
        while let Some(key) = current {
            backward.push(key);
            current = list.nodes[key].prev;
        }
        backward.reverse();

        assert_eq!(forward, backward);
        assert_eq!(forward.len(), list.len());
        if let Some(head) = list.head {
            assert!(list.nodes[head].prev.is_none());
        }
        if let Some(tail) = list.tail {
            assert!(list.nodes[tail].next.is_none());
        }
    }

    #[test]
    fn test_list_new() {
        let list: DoublyLinkedList<u32> = DoublyLinkedList::new();

        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert!(list.head.is_none());
        assert!(list.tail.is_none());
    }

    #[test]
    fn test_list_push_single() {
        let mut list = DoublyLinkedList::new();
        list.push_back(7);

        assert_eq!(list.len(), 1);
        assert_eq!(list.head, list.tail);
        assert_eq!(list.front(), Ok(&7));
        assert_eq!(list.back(), Ok(&7));
        assert_links_consistent(&list);
    }

    #[test]
    fn test_list_push_both_ends() {
        let mut list = DoublyLinkedList::new();
        list.push_back(2);
        list.push_back(3);
        list.push_front(1);
        list.push_front(0);

        assert_eq!(collect(&list), vec![0, 1, 2, 3]);
        assert_links_consistent(&list);
    }

    #[test]
    fn test_list_pop_both_ends() {
        let mut list: DoublyLinkedList<i32> = (1..=3).collect();

        assert_eq!(list.pop_front(), Ok(1));
        assert_eq!(list.pop_back(), Ok(3));
        assert_links_consistent(&list);
        assert_eq!(list.pop_back(), Ok(2));

        assert!(list.is_empty());
        assert!(list.head.is_none());
        assert!(list.tail.is_none());
    }

    #[test]
    fn test_list_empty_errors() {
        let mut list: DoublyLinkedList<i32> = DoublyLinkedList::new();

        assert_eq!(list.pop_front(), Err(CollectionError::EmptyCollection));
        assert_eq!(list.pop_back(), Err(CollectionError::EmptyCollection));
        assert_eq!(list.front(), Err(CollectionError::EmptyCollection));
        assert_eq!(list.back(), Err(CollectionError::EmptyCollection));
    }

    #[test]
    fn test_list_get_set() {
        let mut list: DoublyLinkedList<char> = "abc".chars().collect();

        assert_eq!(list.get(0), Ok(&'a'));
        assert_eq!(list.get(2), Ok(&'c'));
        assert_eq!(list.set(1, 'x'), Ok('b'));
        assert_eq!(collect(&list), vec!['a', 'x', 'c']);

        *list.get_mut(0).unwrap() = 'z';
        assert_eq!(list.front(), Ok(&'z'));
    }

    #[test]
    fn test_list_index_out_of_range() {
        let mut list: DoublyLinkedList<i32> = (0..3).collect();

        assert_eq!(
            list.get(3),
            Err(CollectionError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(
            list.set(5, 0),
            Err(CollectionError::IndexOutOfRange { index: 5, len: 3 })
        );
        assert_eq!(
            list.remove(3),
            Err(CollectionError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(
            list.insert(4, 0),
            Err(CollectionError::IndexOutOfRange { index: 4, len: 3 })
        );
        assert_eq!(collect(&list), vec![0, 1, 2]);
    }

    #[test]
    fn test_list_insert_positions() {
        let mut list: DoublyLinkedList<i32> = vec![1, 3].into_iter().collect();

        list.insert(1, 2).unwrap();
        list.insert(0, 0).unwrap();
        list.insert(4, 4).unwrap();

        assert_eq!(collect(&list), vec![0, 1, 2, 3, 4]);
        assert_links_consistent(&list);
    }

    #[test]
    fn test_list_remove_positions() {
        let mut list: DoublyLinkedList<i32> = (0..5).collect();

        assert_eq!(list.remove(2), Ok(2));
        assert_eq!(list.remove(0), Ok(0));
        assert_eq!(list.remove(2), Ok(4));

        assert_eq!(collect(&list), vec![1, 3]);
        assert_links_consistent(&list);
    }

    #[test]
    fn test_list_search() {
        let mut list: DoublyLinkedList<&str> = vec!["a", "b", "a", "c"].into_iter().collect();

        assert!(list.contains(&"c"));
        assert!(!list.contains(&"z"));
        assert_eq!(list.index_of(&"a"), Some(0));
        assert_eq!(list.last_index_of(&"a"), Some(2));
        assert_eq!(list.index_of(&"z"), None);

        assert_eq!(list.remove_item(&"a"), Some("a"));
        assert_eq!(collect(&list), vec!["b", "a", "c"]);
        assert_eq!(list.remove_item(&"z"), None);
        assert_links_consistent(&list);
    }

    #[test]
    fn test_list_sublist() {
        let list: DoublyLinkedList<i32> = (0..6).collect();

        let sub = list.sublist(1, 4).unwrap();
        assert_eq!(collect(&sub), vec![1, 2, 3]);
        assert!(list.sublist(2, 2).unwrap().is_empty());
        assert_eq!(list.sublist(0, 6).unwrap(), list);

        assert!(list.sublist(0, 7).is_err());
        assert!(list.sublist(4, 3).is_err());
    }

    #[test]
    fn test_list_iter_double_ended() {
        let list: DoublyLinkedList<i32> = (1..=5).collect();

        let reversed: Vec<i32> = list.iter().rev().copied().collect();
        assert_eq!(reversed, vec![5, 4, 3, 2, 1]);

        let mut iter = list.iter();
        assert_eq!(iter.len(), 5);
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&5));
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next_back(), Some(&4));
        assert_eq!(iter.next(), Some(&3));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn test_list_into_iter() {
        let list: DoublyLinkedList<String> =
            vec!["x".to_string(), "y".to_string()].into_iter().collect();

        let owned: Vec<String> = list.into_iter().rev().collect();
        assert_eq!(owned, vec!["y".to_string(), "x".to_string()]);
    }

    #[test]
    fn test_list_clear_reuses_arena() {
        let mut list: DoublyLinkedList<i32> = (0..10).collect();
        list.clear();

        assert!(list.is_empty());
        assert!(list.front().is_err());

        list.push_back(42);
        assert_eq!(collect(&list), vec![42]);
        assert_links_consistent(&list);
    }

    #[test]
    fn test_cursor_forward_and_back() {
        let mut list: DoublyLinkedList<i32> = (1..=3).collect();
        let mut cursor = list.cursor_mut();

        assert!(!cursor.has_previous());
        assert_eq!(cursor.move_next().copied(), Some(1));
        assert_eq!(cursor.move_next().copied(), Some(2));
        assert_eq!(cursor.next_index(), 2);
        assert_eq!(cursor.move_prev().copied(), Some(2));
        assert_eq!(cursor.move_prev().copied(), Some(1));
        assert_eq!(cursor.move_prev(), None);
        assert_eq!(cursor.previous_index(), None);
    }

    #[test]
    fn test_cursor_prev_from_end() {
        let mut list: DoublyLinkedList<i32> = (1..=3).collect();
        let mut cursor = list.cursor_mut_at(3).unwrap();

        assert!(!cursor.has_next());
        assert_eq!(cursor.move_prev().copied(), Some(3));
        assert_eq!(cursor.move_prev().copied(), Some(2));
        assert_eq!(cursor.next_index(), 1);
    }

    #[test]
    fn test_cursor_remove_after_next() {
        let mut list: DoublyLinkedList<i32> = (1..=5).collect();
        {
            let mut cursor = list.cursor_mut();
            while let Some(value) = cursor.move_next() {
                if *value % 2 == 1 {
                    cursor.remove_current();
                }
            }
            assert_eq!(cursor.next_index(), 2);
        }

        assert_eq!(collect(&list), vec![2, 4]);
        assert_links_consistent(&list);
    }

    #[test]
    fn test_cursor_remove_after_prev() {
        let mut list: DoublyLinkedList<i32> = (1..=3).collect();
        {
            let mut cursor = list.cursor_mut_at(3).unwrap();
            assert_eq!(cursor.move_prev().copied(), Some(3));
            assert_eq!(cursor.remove_current(), Some(3));
            assert_eq!(cursor.next_index(), 2);
            assert!(!cursor.has_next());

            // Nothing returned since the removal
            assert_eq!(cursor.remove_current(), None);
            assert_eq!(cursor.move_prev().copied(), Some(2));
        }

        assert_eq!(collect(&list), vec![1, 2]);
        assert_links_consistent(&list);
    }

    #[test]
    fn test_cursor_replace_current() {
        let mut list: DoublyLinkedList<i32> = (1..=3).collect();
        {
            let mut cursor = list.cursor_mut();
            assert_eq!(cursor.replace_current(9), None);
            cursor.move_next();
            cursor.move_next();
            assert_eq!(cursor.replace_current(20), Some(2));
        }

        assert_eq!(collect(&list), vec![1, 20, 3]);
    }

    #[test]
    fn test_cursor_insert_before() {
        let mut list: DoublyLinkedList<i32> = vec![1, 3].into_iter().collect();
        {
            let mut cursor = list.cursor_mut();
            cursor.insert_before(0);
            assert_eq!(cursor.next_index(), 1);
            assert_eq!(cursor.move_next().copied(), Some(1));
            cursor.insert_before(2);
            assert_eq!(cursor.move_next().copied(), Some(3));
            cursor.insert_before(4);
            assert!(!cursor.has_next());
            assert_eq!(cursor.move_prev().copied(), Some(4));
        }

        assert_eq!(collect(&list), vec![0, 1, 2, 3, 4]);
        assert_links_consistent(&list);
    }

    #[test]
    fn test_cursor_at_out_of_range() {
        let mut list: DoublyLinkedList<i32> = (0..2).collect();

        assert!(list.cursor_mut_at(3).is_err());
        assert!(list.cursor_mut_at(2).is_ok());
    }

    #[test]
    fn test_cursor_on_empty_list() {
        let mut list: DoublyLinkedList<i32> = DoublyLinkedList::new();
        {
            let mut cursor = list.cursor_mut();
            assert!(cursor.move_next().is_none());
            assert!(cursor.move_prev().is_none());
            cursor.insert_before(5);
        }

        assert_eq!(collect(&list), vec![5]);
        assert_links_consistent(&list);
    }
}
