//! Inventory service: records, transaction logs, low-stock alerts and
//! reports.
//!
//! ## Layout
//!
//! - [`Inventory`]: owns the maps, the purchase queue, the sales stack and
//!   the low-stock heap
//! - [`InventoryError`]: failures of inventory operations
//! - Reports: [`SalesReport`], [`PurchaseReport`], [`InventoryReport`]
//!
//! ## Example
//!
//! ```
//! use amis::inventory::Inventory;
//! use amis::types::Drug;
//! use chrono::NaiveDate;
//! use rust_decimal::Decimal;
//!
//! let mut inventory = Inventory::new();
//! inventory.add_drug(Drug::new("PCM", "Paracetamol", Decimal::new(150, 2)).with_stock(30)).unwrap();
//!
//! let at = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap().and_hms_opt(8, 0, 0).unwrap();
//! inventory.log_sale("PCM", "C1", 4, at).unwrap();
//!
//! let report = inventory.sales_report().unwrap();
//! assert_eq!(report.total_units, 4);
//! assert_eq!(inventory.drug("PCM").unwrap().stock_level, 26);
//! ```

mod error;
mod report;
mod service;

pub use error::InventoryError;
pub use report::{
    InventoryLine, InventoryReport, PurchaseLine, PurchaseReport, SalesLine, SalesReport,
};
pub use service::{
    AlertOrder, CustomerUpdate, DrugUpdate, Inventory, SupplierUpdate, DEFAULT_STOCK_THRESHOLD,
};
