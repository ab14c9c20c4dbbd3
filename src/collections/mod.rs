//! Hand-rolled containers backing the inventory.
//!
//! ## Architecture
//!
//! - **Slab-based nodes**: list and hash-chain nodes live in a
//!   [`slab::Slab`] owned by their container and link to each other by key
//! - **Views**: [`Stack`] and [`Queue`] wrap [`DoublyLinkedList`]
//! - **Explicit ordering**: [`MinHeap`] takes a comparator
//!
//! ## Components
//!
//! - [`DoublyLinkedList`]: O(1) at both ends, indexed access, cursor
//! - [`Stack`]: LIFO over the list tail
//! - [`Queue`]: FIFO, tail in / head out
//! - [`ChainedHashMap`]: separate chaining with load-factor resize
//! - [`MinHeap`]: binary heap with sift-up/sift-down
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | List push/pop at either end | O(1) |
//! | List indexed get/set/insert/remove | O(n) |
//! | Map put/get/remove | O(1) average |
//! | Map contains_value | O(n) |
//! | Heap insert/extract_min | O(log n) |
//! | Heap peek_min | O(1) |
//!
//! ## Errors
//!
//! Every container reports [`CollectionError`] instead of panicking. The
//! containers never print or log.

pub mod error;
pub mod node;
pub mod linked_list;
pub mod stack;
pub mod queue;
pub mod hash_map;
pub mod min_heap;

pub use error::CollectionError;
pub use node::ListNode;
pub use linked_list::{CursorMut, DoublyLinkedList};
pub use stack::Stack;
pub use queue::Queue;
pub use hash_map::ChainedHashMap;
pub use min_heap::MinHeap;
