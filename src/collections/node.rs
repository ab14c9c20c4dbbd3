//! List node for slab-based storage.
//!
//! ## Design
//!
//! `ListNode` wraps a value with doubly-linked list pointers. The pointers
//! are slab keys (`usize`), not references, so a node can be unlinked in
//! O(1) once its key is known and no node ever borrows another.
//!
//! ## Slab Integration
//!
//! Per official slab docs (https://docs.rs/slab/0.4.11):
//! - Keys are `usize` values returned by `slab.insert()`
//! - Keys may be reused after `slab.remove()`
//! - O(1) insert, remove, and lookup
//!
//! ## Linked List
//!
//! - `next`: Points towards the tail
//! - `prev`: Points towards the head

/// Node stored in a [`DoublyLinkedList`](super::DoublyLinkedList) arena.
///
/// ## Memory Layout
///
/// ```text
/// ListNode<T> {
///     value: T
///     next: Option<usize>
///     prev: Option<usize>
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ListNode<T> {
    /// The stored element
    pub value: T,

    /// Next node towards the tail (slab key)
    /// None if this is the tail
    pub next: Option<usize>,

    /// Previous node towards the head (slab key)
    /// None if this is the head
    pub prev: Option<usize>,
}

impl<T> ListNode<T> {
    /// Create a new node (not yet linked)
    ///
    /// # Example
    ///
    /// ```
    /// use amis::collections::ListNode;
    ///
    /// let node = ListNode::new("Paracetamol");
    ///
    /// assert!(node.next.is_none());
    /// assert!(node.prev.is_none());
    /// ```
    #[inline]
    pub fn new(value: T) -> Self {
        Self {
            value,
            next: None,
            prev: None,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_node_new() {
        let node = ListNode::new(42u32);

        assert_eq!(node.value, 42);
        assert!(node.next.is_none());
        assert!(node.prev.is_none());
    }
}
