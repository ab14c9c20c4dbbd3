//! Flat-file persistence for the inventory.
//!
//! ## Files
//!
//! | File | Record |
//! |------|--------|
//! | `drugs.txt` | `code\|name\|supplier,ids\|expiration\|price\|stock` |
//! | `suppliers.txt` | `id\|name\|location\|delivery_days\|drug,codes` |
//! | `customers.txt` | `id\|name\|contact` |
//! | `purchase_history.txt` | `drug_code\|quantity\|supplier\|timestamp\|total_cost` |
//! | `sales_log.txt` | `drug_code\|quantity\|customer\|timestamp\|total_cost` |
//!
//! The purchase queue is written front to back and the sales stack bottom
//! to top, so a reload reproduces both in the same order. Missing files
//! load as empty and blank lines are skipped.
//!
//! ## Example
//!
//! ```
//! use amis::inventory::Inventory;
//! use amis::store::FlatFileStore;
//! use amis::types::Drug;
//! use rust_decimal::Decimal;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let store = FlatFileStore::new(dir.path());
//!
//! let mut inventory = Inventory::new();
//! inventory.add_drug(Drug::new("IBU", "Ibuprofen", Decimal::new(300, 2)).with_stock(7)).unwrap();
//! store.save(&inventory).unwrap();
//!
//! let loaded = store.load(10).unwrap();
//! assert_eq!(loaded.state_digest(), inventory.state_digest());
//! ```

mod codec;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::inventory::{Inventory, InventoryError};
use crate::types::TransactionKind;

pub use codec::{
    decode_customer, decode_drug, decode_supplier, decode_transaction, encode_customer,
    encode_drug, encode_supplier, encode_transaction, FIELD_SEPARATOR, LIST_SEPARATOR,
};

pub const DRUGS_FILE: &str = "drugs.txt";
pub const SUPPLIERS_FILE: &str = "suppliers.txt";
pub const CUSTOMERS_FILE: &str = "customers.txt";
pub const SALES_LOG_FILE: &str = "sales_log.txt";
pub const PURCHASE_HISTORY_FILE: &str = "purchase_history.txt";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{file}:{line}: {reason}")]
    Parse {
        file: String,
        line: usize,
        reason: String,
    },

    #[error("{field} cannot contain {value:?}")]
    InvalidField { field: &'static str, value: String },
}

/// Inventory files under one data directory
#[derive(Debug, Clone)]
pub struct FlatFileStore {
    dir: PathBuf,
}

impl FlatFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[inline]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the data directory and its parents if missing
    pub fn ensure_data_dir(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })
    }

    /// Read every file into a fresh inventory
    ///
    /// # Errors
    ///
    /// * [`StoreError::Io`] - a file exists but cannot be read
    /// * [`StoreError::Parse`] - a malformed line or a duplicate key
    pub fn load(&self, stock_threshold: u32) -> Result<Inventory, StoreError> {
        let mut inventory = Inventory::with_threshold(stock_threshold);

        self.read_records(DRUGS_FILE, |line| {
            let drug = codec::decode_drug(line)?;
            inventory.restore_drug(drug).map_err(duplicate_reason)
        })?;
        self.read_records(SUPPLIERS_FILE, |line| {
            let supplier = codec::decode_supplier(line)?;
            inventory.restore_supplier(supplier).map_err(duplicate_reason)
        })?;
        self.read_records(CUSTOMERS_FILE, |line| {
            let customer = codec::decode_customer(line)?;
            inventory.restore_customer(customer).map_err(duplicate_reason)
        })?;
        self.read_records(PURCHASE_HISTORY_FILE, |line| {
            let purchase = codec::decode_transaction(TransactionKind::Purchase, line)?;
            inventory.append_history(purchase);
            Ok(())
        })?;
        self.read_records(SALES_LOG_FILE, |line| {
            let sale = codec::decode_transaction(TransactionKind::Sale, line)?;
            inventory.append_history(sale);
            Ok(())
        })?;

        inventory.rebuild_low_stock();
        info!(
            dir = %self.dir.display(),
            drugs = inventory.drug_count(),
            purchases = inventory.purchase_history().len(),
            sales = inventory.sales_log().len(),
            "inventory loaded"
        );
        Ok(inventory)
    }

    /// Write every file, replacing previous contents
    ///
    /// All lines are encoded before any file is written, so an invalid
    /// field leaves the directory untouched.
    ///
    /// # Errors
    ///
    /// * [`StoreError::InvalidField`] - a value holds a separator or line break
    /// * [`StoreError::Io`] - the directory or a file cannot be written
    pub fn save(&self, inventory: &Inventory) -> Result<(), StoreError> {
        let drugs = encode_all(inventory.drugs(), codec::encode_drug)?;
        let suppliers = encode_all(inventory.suppliers(), codec::encode_supplier)?;
        let customers = encode_all(inventory.customers(), codec::encode_customer)?;
        let purchases = encode_all(inventory.purchase_history().iter(), codec::encode_transaction)?;
        // bottom to top, so pushing in file order rebuilds the stack
        let sales = encode_all(inventory.sales_log().iter(), codec::encode_transaction)?;

        self.ensure_data_dir()?;
        self.write_file(DRUGS_FILE, &drugs)?;
        self.write_file(SUPPLIERS_FILE, &suppliers)?;
        self.write_file(CUSTOMERS_FILE, &customers)?;
        self.write_file(PURCHASE_HISTORY_FILE, &purchases)?;
        self.write_file(SALES_LOG_FILE, &sales)?;

        info!(dir = %self.dir.display(), drugs = inventory.drug_count(), "inventory saved");
        Ok(())
    }

    fn read_records<F>(&self, file: &str, mut apply: F) -> Result<(), StoreError>
    where
        F: FnMut(&str) -> Result<(), String>,
    {
        let path = self.dir.join(file);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "file missing, loading as empty");
                return Ok(());
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        let mut records = 0usize;
        for (index, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            apply(line.trim_end_matches('\r')).map_err(|reason| StoreError::Parse {
                file: file.to_string(),
                line: index + 1,
                reason,
            })?;
            records += 1;
        }

        debug!(file, records, "file read");
        Ok(())
    }

    fn write_file(&self, file: &str, lines: &[String]) -> Result<(), StoreError> {
        let path = self.dir.join(file);
        let mut contents = String::new();
        for line in lines {
            contents.push_str(line);
            contents.push('\n');
        }

        fs::write(&path, contents).map_err(|source| StoreError::Io { path, source })?;
        debug!(file, records = lines.len(), "file written");
        Ok(())
    }
}

fn encode_all<'a, T: 'a, I, F>(records: I, encode: F) -> Result<Vec<String>, StoreError>
where
    I: IntoIterator<Item = &'a T>,
    F: Fn(&T) -> Result<String, StoreError>,
{
    records.into_iter().map(encode).collect()
}

fn duplicate_reason(error: InventoryError) -> String {
    error.to_string()
}

// ============================================================================
// Unit Tests
// ============================================================================
