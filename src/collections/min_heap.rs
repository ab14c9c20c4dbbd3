//! Binary min-heap with an explicit comparator.
//!
//! ## Layout
//!
//! Elements live in a `Vec` in level order. For every index `i` with
//! children at `2i + 1` and `2i + 2`, the parent compares less than or
//! equal to both children.
//!
//! ## Ordering
//!
//! The ordering is a comparator closure rather than a trait on the element,
//! so the same record type can be heaped by different keys.
//! [`MinHeap::new`] uses `Ord::cmp`. Equal elements are never swapped; the
//! relative order in which equal elements are extracted is unspecified.

use std::cmp::Ordering;
use std::fmt;

use crate::collections::CollectionError;

/// Comparator used by [`MinHeap::new`]
pub type NaturalOrder<T> = fn(&T, &T) -> Ordering;

/// Binary min-heap.
///
/// ## Example
///
/// ```
/// use amis::collections::MinHeap;
///
/// let mut heap = MinHeap::new();
/// heap.insert(8);
/// heap.insert(5);
/// heap.insert(20);
///
/// assert_eq!(heap.peek_min(), Ok(&5));
/// assert_eq!(heap.extract_min(), Ok(5));
/// assert_eq!(heap.extract_min(), Ok(8));
/// ```
#[derive(Clone)]
pub struct MinHeap<T, F = NaturalOrder<T>> {
    items: Vec<T>,
    cmp: F,
}

impl<T: Ord> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> MinHeap<T> {
    /// Create an empty heap ordered by `Ord`
    pub fn new() -> Self {
        Self::with_comparator(T::cmp)
    }
}

#[inline]
fn parent(i: usize) -> usize {
    (i - 1) / 2
}

#[inline]
fn left_child(i: usize) -> usize {
    2 * i + 1
}

#[inline]
fn right_child(i: usize) -> usize {
    2 * i + 2
}

impl<T, F> MinHeap<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    /// Create an empty heap ordered by `cmp`
    ///
    /// ```
    /// use amis::collections::MinHeap;
    ///
    /// // Max-heap by flipping the comparator
    /// let mut heap = MinHeap::with_comparator(|a: &i32, b: &i32| b.cmp(a));
    /// heap.insert(1);
    /// heap.insert(3);
    /// assert_eq!(heap.extract_min(), Ok(3));
    /// ```
    pub fn with_comparator(cmp: F) -> Self {
        Self {
            items: Vec::new(),
            cmp,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// The backing array in heap order
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Add an element and sift it up. O(log n).
    pub fn insert(&mut self, value: T) {
        self.items.push(value);
        self.sift_up(self.items.len() - 1);
    }

    /// Borrow the smallest element
    ///
    /// # Errors
    ///
    /// [`CollectionError::EmptyCollection`] if the heap is empty
    pub fn peek_min(&self) -> Result<&T, CollectionError> {
        self.items.first().ok_or(CollectionError::EmptyCollection)
    }

    /// Remove and return the smallest element. O(log n).
    ///
    /// # Errors
    ///
    /// [`CollectionError::EmptyCollection`] if the heap is empty
    pub fn extract_min(&mut self) -> Result<T, CollectionError> {
        if self.items.is_empty() {
            return Err(CollectionError::EmptyCollection);
        }

        // swap_remove moves the last element into the root
        let root = self.items.swap_remove(0);
        if !self.items.is_empty() {
            self.sift_down(0);
        }
        Ok(root)
    }

    /// Drain the heap into a vector in ascending order
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.items.len());
        while let Ok(value) = self.extract_min() {
            sorted.push(value);
        }
        sorted
    }

    #[inline]
    fn less(&self, a: usize, b: usize) -> bool {
        (self.cmp)(&self.items[a], &self.items[b]) == Ordering::Less
    }

    fn sift_up(&mut self, mut i: usize) {
        while i != 0 && self.less(i, parent(i)) {
            self.items.swap(i, parent(i));
            i = parent(i);
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.items.len();
        loop {
            let left = left_child(i);
            let right = right_child(i);
            let mut smallest = i;

            if left < len && self.less(left, smallest) {
                smallest = left;
            }
            if right < len && self.less(right, smallest) {
                smallest = right;
            }
            if smallest == i {
                return;
            }

            self.items.swap(i, smallest);
            i = smallest;
        }
    }
}

impl<T: fmt::Debug, F> fmt::Debug for MinHeap<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MinHeap").field("items", &self.items).finish()
    }
}

impl<T: Ord> FromIterator<T> for MinHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut heap = Self::new();
        for value in iter {
            heap.insert(value);
        }
        heap
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
