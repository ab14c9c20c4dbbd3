//! # AMIS
//!
//! Pharmacy inventory management on hand-rolled containers.
//!
//! ## Architecture
//!
//! - **Collections**: slab-backed linked list, stack, queue, chained hash
//!   map and comparator-driven min-heap
//! - **Sort**: insertion sort and merge sort over slices
//! - **Types**: drugs, suppliers, customers, transactions, money helpers
//! - **Inventory**: the service tying records, logs and alerts together
//! - **Store**: `|`-delimited flat files, one record per line
//!
//! ## Design Principles
//!
//! 1. **Exact money**: prices and totals are `rust_decimal::Decimal`
//! 2. **Arena nodes**: list and chain nodes live in a `Slab` and link by key
//! 3. **Explicit ordering**: heaps and sorts take a comparator
//! 4. **Rebuild over patch**: the low-stock heap is recomputed on every change

// ============================================================================
// Module declarations
// ============================================================================

/// Containers: list, stack, queue, hash map, min-heap
pub mod collections;

/// Insertion sort and merge sort
pub mod sort;

/// Domain records and money helpers
pub mod types;

/// Inventory service and reports
pub mod inventory;

/// Flat-file persistence
pub mod store;

/// Runtime configuration
pub mod config;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use collections::{ChainedHashMap, CollectionError, DoublyLinkedList, MinHeap, Queue, Stack};
pub use config::Config;
pub use inventory::{Inventory, InventoryError};
pub use store::{FlatFileStore, StoreError};
pub use types::{Customer, Drug, LowStockAlert, Supplier, Transaction, TransactionKind};
