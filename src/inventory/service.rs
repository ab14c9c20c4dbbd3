//! The inventory service.
//!
//! ## Storage
//!
//! - **Records**: drugs, suppliers and customers in [`ChainedHashMap`]s
//!   keyed by code or id
//! - **Purchases**: a [`Queue`], oldest first
//! - **Sales**: a [`Stack`], most recent on top
//! - **Low stock**: a [`MinHeap`] of [`LowStockAlert`]s, lowest stock first
//!
//! ## Low-Stock Recomputation
//!
//! The heap is never patched in place. Any change to a stock level, the
//! drug set or the threshold clears it and rescans every drug.

use std::cmp::Ordering;
use std::mem;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::collections::{ChainedHashMap, MinHeap, Queue, Stack};
use crate::inventory::InventoryError;
use crate::sort::{insertion_sort_by, merge_sort_by};
use crate::types::money;
use crate::types::{
    Customer, Drug, LowStockAlert, Supplier, Transaction, TransactionKind, TIMESTAMP_FORMAT,
};

/// Default stock level at or below which a drug raises an alert
pub const DEFAULT_STOCK_THRESHOLD: u32 = 10;

/// Comparator type of the low-stock heap
pub type AlertOrder = fn(&LowStockAlert, &LowStockAlert) -> Ordering;

/// Optional field changes for [`Inventory::update_drug`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrugUpdate {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub stock_level: Option<u32>,
    pub expiration_date: Option<chrono::NaiveDate>,
    /// Replaces the supplier list when set
    pub suppliers: Option<Vec<String>>,
}

/// Optional field changes for [`Inventory::update_supplier`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupplierUpdate {
    pub name: Option<String>,
    pub location: Option<String>,
    pub delivery_days: Option<u32>,
}

/// Optional field changes for [`Inventory::update_customer`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub contact: Option<String>,
}

/// Drugs, suppliers, customers and their transaction history.
///
/// ## Example
///
/// ```
/// use amis::inventory::Inventory;
/// use amis::types::Drug;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let mut inventory = Inventory::new();
/// inventory.add_drug(Drug::new("A", "Aspirin", Decimal::ONE).with_stock(5)).unwrap();
/// inventory.add_drug(Drug::new("B", "Bisoprolol", Decimal::ONE).with_stock(20)).unwrap();
///
/// let alerts: Vec<_> = inventory.low_stock_alerts().into_iter().map(|a| a.code).collect();
/// assert_eq!(alerts, ["A"]);
///
/// let at = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap().and_hms_opt(10, 0, 0).unwrap();
/// inventory.log_purchase("A", "SUP-1", 10, at).unwrap();
/// assert!(inventory.low_stock_alerts().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Inventory {
    pub(super) drugs: ChainedHashMap<String, Drug>,
    pub(super) suppliers: ChainedHashMap<String, Supplier>,
    pub(super) customers: ChainedHashMap<String, Customer>,
    pub(super) purchase_history: Queue<Transaction>,
    pub(super) sales_log: Stack<Transaction>,
    low_stock: MinHeap<LowStockAlert, AlertOrder>,
    pub(super) stock_threshold: u32,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

impl Inventory {
    /// Create an empty inventory with the default threshold
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_STOCK_THRESHOLD)
    }

    pub fn with_threshold(stock_threshold: u32) -> Self {
        Self {
            drugs: ChainedHashMap::new(),
            suppliers: ChainedHashMap::new(),
            customers: ChainedHashMap::new(),
            purchase_history: Queue::new(),
            sales_log: Stack::new(),
            low_stock: MinHeap::with_comparator(LowStockAlert::by_stock_level as AlertOrder),
            stock_threshold,
        }
    }

    // ========================================================================
    // Drugs
    // ========================================================================

    /// Add a new drug
    ///
    /// Supplier ids on the drug need not be registered. Registered suppliers
    /// get the drug code added to their catalogue.
    ///
    /// # Errors
    ///
    /// [`InventoryError::DuplicateDrug`] if the code is already in use
    pub fn add_drug(&mut self, drug: Drug) -> Result<(), InventoryError> {
        if self.drugs.contains_key(drug.code.as_str()) {
            return Err(InventoryError::DuplicateDrug(drug.code));
        }

        for supplier_id in &drug.suppliers {
            match self.suppliers.get_mut(supplier_id.as_str()) {
                Some(supplier) => {
                    supplier.add_drug(drug.code.as_str());
                }
                None => warn!(code = %drug.code, supplier = %supplier_id, "drug lists unknown supplier"),
            }
        }

        info!(code = %drug.code, name = %drug.name, stock = drug.stock_level, "drug added");
        self.drugs.put(drug.code.clone(), drug);
        self.rebuild_low_stock();
        Ok(())
    }

    /// Apply the set fields of `update` to a drug
    ///
    /// # Errors
    ///
    /// [`InventoryError::DrugNotFound`] if no drug has this code
    pub fn update_drug(&mut self, code: &str, update: DrugUpdate) -> Result<(), InventoryError> {
        let drug = self
            .drugs
            .get_mut(code)
            .ok_or_else(|| InventoryError::DrugNotFound(code.to_string()))?;

        if let Some(name) = update.name {
            drug.name = name;
        }
        if let Some(price) = update.price {
            drug.price = price;
        }
        if let Some(stock_level) = update.stock_level {
            drug.stock_level = stock_level;
        }
        if let Some(date) = update.expiration_date {
            drug.expiration_date = Some(date);
        }
        let replaced = update.suppliers.map(|suppliers| {
            let previous = mem::take(&mut drug.suppliers);
            for supplier_id in suppliers {
                drug.add_supplier(supplier_id);
            }
            (previous, drug.suppliers.clone())
        });

        if let Some((previous, current)) = replaced {
            self.relink_catalogues(code, &previous, &current);
        }

        info!(code, "drug updated");
        self.rebuild_low_stock();
        Ok(())
    }

    /// Move `code` from the catalogues of `previous` suppliers to `current` ones
    fn relink_catalogues(&mut self, code: &str, previous: &[String], current: &[String]) {
        for supplier_id in previous {
            if let Some(supplier) = self.suppliers.get_mut(supplier_id.as_str()) {
                supplier.remove_drug(code);
            }
        }
        for supplier_id in current {
            match self.suppliers.get_mut(supplier_id.as_str()) {
                Some(supplier) => {
                    supplier.add_drug(code);
                }
                None => warn!(code, supplier = %supplier_id, "drug lists unknown supplier"),
            }
        }
    }

    /// Remove a drug and unlink it from supplier catalogues
    ///
    /// Transactions that reference the code are kept.
    ///
    /// # Errors
    ///
    /// [`InventoryError::DrugNotFound`] if no drug has this code
    pub fn remove_drug(&mut self, code: &str) -> Result<Drug, InventoryError> {
        let drug = self
            .drugs
            .remove(code)
            .ok_or_else(|| InventoryError::DrugNotFound(code.to_string()))?;

        for supplier_id in &drug.suppliers {
            if let Some(supplier) = self.suppliers.get_mut(supplier_id.as_str()) {
                supplier.remove_drug(code);
            }
        }

        info!(code, "drug removed");
        self.rebuild_low_stock();
        Ok(drug)
    }

    #[inline]
    pub fn drug(&self, code: &str) -> Option<&Drug> {
        self.drugs.get(code)
    }

    /// All drugs ordered by code
    pub fn drugs(&self) -> Vec<&Drug> {
        let mut drugs = self.drugs.values();
        merge_sort_by(&mut drugs, |a, b| a.code.cmp(&b.code));
        drugs
    }

    #[inline]
    pub fn drug_count(&self) -> usize {
        self.drugs.len()
    }

    // ========================================================================
    // Suppliers
    // ========================================================================

    /// # Errors
    ///
    /// [`InventoryError::DuplicateSupplier`] if the id is already in use
    pub fn add_supplier(&mut self, supplier: Supplier) -> Result<(), InventoryError> {
        if self.suppliers.contains_key(supplier.id.as_str()) {
            return Err(InventoryError::DuplicateSupplier(supplier.id));
        }

        info!(id = %supplier.id, name = %supplier.name, "supplier added");
        self.suppliers.put(supplier.id.clone(), supplier);
        Ok(())
    }

    /// # Errors
    ///
    /// [`InventoryError::SupplierNotFound`] if no supplier has this id
    pub fn update_supplier(
        &mut self,
        id: &str,
        update: SupplierUpdate,
    ) -> Result<&Supplier, InventoryError> {
        let supplier = self
            .suppliers
            .get_mut(id)
            .ok_or_else(|| InventoryError::SupplierNotFound(id.to_string()))?;

        if let Some(name) = update.name {
            supplier.name = name;
        }
        if let Some(location) = update.location {
            supplier.location = location;
        }
        if let Some(days) = update.delivery_days {
            supplier.delivery_days = days;
        }

        info!(id, "supplier updated");
        Ok(supplier)
    }

    /// Remove a supplier
    ///
    /// Drugs keep the id in their supplier list.
    ///
    /// # Errors
    ///
    /// [`InventoryError::SupplierNotFound`] if no supplier has this id
    pub fn remove_supplier(&mut self, id: &str) -> Result<Supplier, InventoryError> {
        let supplier = self
            .suppliers
            .remove(id)
            .ok_or_else(|| InventoryError::SupplierNotFound(id.to_string()))?;
        info!(id, "supplier removed");
        Ok(supplier)
    }

    #[inline]
    pub fn supplier(&self, id: &str) -> Option<&Supplier> {
        self.suppliers.get(id)
    }

    /// All suppliers ordered by id
    pub fn suppliers(&self) -> Vec<&Supplier> {
        let mut suppliers = self.suppliers.values();
        merge_sort_by(&mut suppliers, |a, b| a.id.cmp(&b.id));
        suppliers
    }

    // ========================================================================
    // Customers
    // ========================================================================

    /// # Errors
    ///
    /// [`InventoryError::DuplicateCustomer`] if the id is already in use
    pub fn add_customer(&mut self, customer: Customer) -> Result<(), InventoryError> {
        if self.customers.contains_key(customer.id.as_str()) {
            return Err(InventoryError::DuplicateCustomer(customer.id));
        }

        info!(id = %customer.id, name = %customer.name, "customer added");
        self.customers.put(customer.id.clone(), customer);
        Ok(())
    }

    /// # Errors
    ///
    /// [`InventoryError::CustomerNotFound`] if no customer has this id
    pub fn update_customer(
        &mut self,
        id: &str,
        update: CustomerUpdate,
    ) -> Result<&Customer, InventoryError> {
        let customer = self
            .customers
            .get_mut(id)
            .ok_or_else(|| InventoryError::CustomerNotFound(id.to_string()))?;

        if let Some(name) = update.name {
            customer.name = name;
        }
        if let Some(contact) = update.contact {
            customer.contact = contact;
        }

        info!(id, "customer updated");
        Ok(customer)
    }

    /// # Errors
    ///
    /// [`InventoryError::CustomerNotFound`] if no customer has this id
    pub fn remove_customer(&mut self, id: &str) -> Result<Customer, InventoryError> {
        let customer = self
            .customers
            .remove(id)
            .ok_or_else(|| InventoryError::CustomerNotFound(id.to_string()))?;
        info!(id, "customer removed");
        Ok(customer)
    }

    #[inline]
    pub fn customer(&self, id: &str) -> Option<&Customer> {
        self.customers.get(id)
    }

    /// All customers ordered by id
    pub fn customers(&self) -> Vec<&Customer> {
        let mut customers = self.customers.values();
        merge_sort_by(&mut customers, |a, b| a.id.cmp(&b.id));
        customers
    }

    // ========================================================================
    // Transactions
    // ========================================================================

    /// Record stock bought from a supplier
    ///
    /// The cost is the drug's current price times `quantity`. The supplier
    /// id is not checked against the registry.
    ///
    /// # Errors
    ///
    /// * [`InventoryError::InvalidQuantity`] - `quantity` is zero
    /// * [`InventoryError::DrugNotFound`] - unknown drug code
    /// * [`InventoryError::StockOverflow`] - stock would exceed `u32::MAX`
    /// * [`InventoryError::CostOverflow`] - price times quantity overflowed
    pub fn log_purchase(
        &mut self,
        drug_code: &str,
        supplier_id: &str,
        quantity: u32,
        at: NaiveDateTime,
    ) -> Result<Transaction, InventoryError> {
        if quantity == 0 {
            return Err(InventoryError::InvalidQuantity);
        }
        if !self.suppliers.contains_key(supplier_id) {
            warn!(supplier = supplier_id, "purchase from unregistered supplier");
        }

        let drug = self
            .drugs
            .get_mut(drug_code)
            .ok_or_else(|| InventoryError::DrugNotFound(drug_code.to_string()))?;
        let new_level = drug
            .stock_level
            .checked_add(quantity)
            .ok_or_else(|| InventoryError::StockOverflow(drug_code.to_string()))?;
        let total_cost =
            money::line_total(drug.price, quantity).ok_or(InventoryError::CostOverflow)?;

        drug.stock_level = new_level;
        let purchase = Transaction::new(
            TransactionKind::Purchase,
            drug_code,
            quantity,
            supplier_id,
            total_cost,
            at,
        );
        self.purchase_history.enqueue(purchase.clone());

        info!(code = drug_code, supplier = supplier_id, quantity, stock = new_level, "purchase logged");
        self.rebuild_low_stock();
        Ok(purchase)
    }

    /// Record stock sold to a customer
    ///
    /// # Errors
    ///
    /// * [`InventoryError::InvalidQuantity`] - `quantity` is zero
    /// * [`InventoryError::DrugNotFound`] - unknown drug code
    /// * [`InventoryError::InsufficientStock`] - fewer units on hand than requested
    /// * [`InventoryError::CostOverflow`] - price times quantity overflowed
    pub fn log_sale(
        &mut self,
        drug_code: &str,
        customer_id: &str,
        quantity: u32,
        at: NaiveDateTime,
    ) -> Result<Transaction, InventoryError> {
        if quantity == 0 {
            return Err(InventoryError::InvalidQuantity);
        }
        if !self.customers.contains_key(customer_id) {
            warn!(customer = customer_id, "sale to unregistered customer");
        }

        let drug = self
            .drugs
            .get_mut(drug_code)
            .ok_or_else(|| InventoryError::DrugNotFound(drug_code.to_string()))?;
        if drug.stock_level < quantity {
            return Err(InventoryError::InsufficientStock {
                code: drug_code.to_string(),
                requested: quantity,
                available: drug.stock_level,
            });
        }
        let total_cost =
            money::line_total(drug.price, quantity).ok_or(InventoryError::CostOverflow)?;

        drug.stock_level -= quantity;
        let stock = drug.stock_level;
        let sale = Transaction::new(
            TransactionKind::Sale,
            drug_code,
            quantity,
            customer_id,
            total_cost,
            at,
        );
        self.sales_log.push(sale.clone());

        info!(code = drug_code, customer = customer_id, quantity, stock, "sale logged");
        self.rebuild_low_stock();
        Ok(sale)
    }

    /// Insert a stored drug as-is
    ///
    /// Supplier catalogues and the low-stock heap are left alone; the caller
    /// rebuilds the heap once everything is restored.
    pub(crate) fn restore_drug(&mut self, drug: Drug) -> Result<(), InventoryError> {
        if self.drugs.contains_key(drug.code.as_str()) {
            return Err(InventoryError::DuplicateDrug(drug.code));
        }
        self.drugs.put(drug.code.clone(), drug);
        Ok(())
    }

    pub(crate) fn restore_supplier(&mut self, supplier: Supplier) -> Result<(), InventoryError> {
        if self.suppliers.contains_key(supplier.id.as_str()) {
            return Err(InventoryError::DuplicateSupplier(supplier.id));
        }
        self.suppliers.put(supplier.id.clone(), supplier);
        Ok(())
    }

    pub(crate) fn restore_customer(&mut self, customer: Customer) -> Result<(), InventoryError> {
        if self.customers.contains_key(customer.id.as_str()) {
            return Err(InventoryError::DuplicateCustomer(customer.id));
        }
        self.customers.put(customer.id.clone(), customer);
        Ok(())
    }

    /// Append a recorded transaction to its log without touching stock
    ///
    /// Used when restoring history from storage.
    pub fn append_history(&mut self, transaction: Transaction) {
        match transaction.kind {
            TransactionKind::Purchase => self.purchase_history.enqueue(transaction),
            TransactionKind::Sale => self.sales_log.push(transaction),
        }
    }

    /// Purchases, oldest at the front
    #[inline]
    pub fn purchase_history(&self) -> &Queue<Transaction> {
        &self.purchase_history
    }

    /// Sales, most recent on top
    #[inline]
    pub fn sales_log(&self) -> &Stack<Transaction> {
        &self.sales_log
    }

    // ========================================================================
    // Stock Monitoring
    // ========================================================================

    #[inline]
    pub fn stock_threshold(&self) -> u32 {
        self.stock_threshold
    }

    /// Change the threshold and rebuild the alerts
    pub fn set_stock_threshold(&mut self, threshold: u32) {
        info!(old = self.stock_threshold, new = threshold, "stock threshold changed");
        self.stock_threshold = threshold;
        self.rebuild_low_stock();
    }

    /// Alerts ordered by ascending stock level
    ///
    /// Drains a copy of the heap, so the alerts stay in place.
    pub fn low_stock_alerts(&self) -> Vec<LowStockAlert> {
        self.low_stock.clone().into_sorted_vec()
    }

    /// Clear the heap and rescan every drug
    pub fn rebuild_low_stock(&mut self) {
        self.low_stock.clear();
        for drug in self.drugs.iter().map(|(_, drug)| drug) {
            if drug.is_low_stock(self.stock_threshold) {
                self.low_stock.insert(LowStockAlert::from(drug));
            }
        }
        debug!(
            threshold = self.stock_threshold,
            alerts = self.low_stock.len(),
            "low-stock heap rebuilt"
        );
    }

    // ========================================================================
    // Search and Sort
    // ========================================================================

    /// Exact lookup by code
    #[inline]
    pub fn search_by_code(&self, code: &str) -> Option<&Drug> {
        self.drugs.get(code)
    }

    /// Drugs whose name contains `query`, ignoring case, ordered by code
    pub fn search_by_name(&self, query: &str) -> Vec<&Drug> {
        let query = query.to_lowercase();
        let mut found: Vec<&Drug> = self
            .drugs
            .iter()
            .map(|(_, drug)| drug)
            .filter(|drug| drug.name.to_lowercase().contains(&query))
            .collect();
        merge_sort_by(&mut found, |a, b| a.code.cmp(&b.code));
        found
    }

    /// Drugs listing `supplier_id`, ordered by code
    ///
    /// # Errors
    ///
    /// [`InventoryError::SupplierNotFound`] if the supplier is not registered
    pub fn search_by_supplier(&self, supplier_id: &str) -> Result<Vec<&Drug>, InventoryError> {
        if !self.suppliers.contains_key(supplier_id) {
            return Err(InventoryError::SupplierNotFound(supplier_id.to_string()));
        }

        let mut found: Vec<&Drug> = self
            .drugs
            .iter()
            .map(|(_, drug)| drug)
            .filter(|drug| drug.is_supplied_by(supplier_id))
            .collect();
        merge_sort_by(&mut found, |a, b| a.code.cmp(&b.code));
        Ok(found)
    }

    /// Drugs by name, via insertion sort
    pub fn drugs_sorted_by_name(&self) -> Vec<&Drug> {
        let mut drugs = self.drugs();
        insertion_sort_by(&mut drugs, |a, b| a.name.cmp(&b.name));
        drugs
    }

    /// Drugs by ascending price, via merge sort
    pub fn drugs_sorted_by_price(&self) -> Vec<&Drug> {
        let mut drugs = self.drugs();
        merge_sort_by(&mut drugs, |a, b| a.price.cmp(&b.price));
        drugs
    }

    // ========================================================================
    // Digest
    // ========================================================================

    /// SHA-256 over the canonical text of every record and both logs
    ///
    /// Records are hashed in key order, so two inventories holding the same
    /// data digest equal however they were built. Log order is significant.
    /// The threshold is not part of the digest.
    pub fn state_digest(&self) -> String {
        let mut hasher = Sha256::new();

        for drug in self.drugs() {
            let expiration = drug
                .expiration_date
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            hasher.update(
                format!(
                    "drug|{}|{}|{}|{}|{}|{}\n",
                    drug.code,
                    drug.name,
                    drug.suppliers.join(","),
                    expiration,
                    drug.price,
                    drug.stock_level
                )
                .as_bytes(),
            );
        }
        for supplier in self.suppliers() {
            hasher.update(
                format!(
                    "supplier|{}|{}|{}|{}|{}\n",
                    supplier.id,
                    supplier.name,
                    supplier.location,
                    supplier.delivery_days,
                    supplier.drug_codes.join(",")
                )
                .as_bytes(),
            );
        }
        for customer in self.customers() {
            hasher.update(
                format!("customer|{}|{}|{}\n", customer.id, customer.name, customer.contact)
                    .as_bytes(),
            );
        }
        for transaction in self.purchase_history.iter().chain(self.sales_log.iter()) {
            hasher.update(
                format!(
                    "{}|{}|{}|{}|{}|{}\n",
                    transaction.kind.as_str(),
                    transaction.drug_code,
                    transaction.quantity,
                    transaction.counterparty_id,
                    transaction.timestamp.format(TIMESTAMP_FORMAT),
                    transaction.total_cost
                )
                .as_bytes(),
            );
        }

        hex::encode(hasher.finalize())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
