//! Domain records for the inventory.
//!
//! Records are plain data; the containers in [`crate::collections`] own
//! them and the [`crate::inventory::Inventory`] service mutates them.
//!
//! ## Types
//!
//! - [`Drug`]: a stocked drug, keyed by code
//! - [`Supplier`]: keyed by id
//! - [`Customer`]: keyed by id
//! - [`Transaction`]: a purchase or sale event
//! - [`LowStockAlert`]: heap entry for drugs at or below the threshold
//!
//! ## Money
//!
//! Prices and totals are `rust_decimal::Decimal`; see [`money`].

mod alert;
mod customer;
mod drug;
mod supplier;
mod transaction;
pub mod money;

pub use alert::LowStockAlert;
pub use customer::Customer;
pub use drug::Drug;
pub use supplier::Supplier;
pub use transaction::{Transaction, TransactionKind, TIMESTAMP_FORMAT};
