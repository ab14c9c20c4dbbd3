//! Sales, purchase and inventory reports.
//!
//! Reports read the logs through their iterators, so generating one never
//! drains the sales stack or the purchase queue. Per-drug and per-supplier
//! totals are aggregated in a [`ChainedHashMap`] and then ordered by key.

use std::fmt;

use rust_decimal::Decimal;

use crate::collections::ChainedHashMap;
use crate::inventory::{Inventory, InventoryError};
use crate::sort::merge_sort_by;
use crate::types::money::{self, format_money};
use crate::types::Transaction;

/// Units and amount accumulated for one key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Tally {
    units: u64,
    amount: Decimal,
}

impl Tally {
    fn record(&mut self, transaction: &Transaction) -> Result<(), InventoryError> {
        self.units += u64::from(transaction.quantity);
        self.amount = money::checked_add(self.amount, transaction.total_cost)
            .ok_or(InventoryError::CostOverflow)?;
        Ok(())
    }
}

/// Group transactions by `key` and total them
fn tally_by<'a, I, F>(
    transactions: I,
    key: F,
) -> Result<(Tally, ChainedHashMap<&'a str, Tally>), InventoryError>
where
    I: IntoIterator<Item = &'a Transaction>,
    F: Fn(&'a Transaction) -> &'a str,
{
    let mut total = Tally::default();
    let mut per_key: ChainedHashMap<&'a str, Tally> = ChainedHashMap::new();

    for transaction in transactions {
        total.record(transaction)?;
        match per_key.get_mut(key(transaction)) {
            Some(tally) => tally.record(transaction)?,
            None => {
                let mut tally = Tally::default();
                tally.record(transaction)?;
                per_key.put(key(transaction), tally);
            }
        }
    }

    Ok((total, per_key))
}

/// One drug's line in a [`SalesReport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesLine {
    pub code: String,
    pub name: String,
    pub units: u64,
    pub revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesReport {
    /// Number of sale transactions
    pub transactions: usize,
    /// Distinct drugs sold
    pub drugs_sold: usize,
    pub total_units: u64,
    pub total_revenue: Decimal,
    /// Per-drug breakdown by code; drugs no longer stocked are left out
    pub lines: Vec<SalesLine>,
}

/// One supplier's line in a [`PurchaseReport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseLine {
    pub supplier_id: String,
    pub name: String,
    pub units: u64,
    pub cost: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseReport {
    pub transactions: usize,
    pub total_units: u64,
    pub total_cost: Decimal,
    /// Per-supplier breakdown by id; unregistered suppliers are left out
    pub lines: Vec<PurchaseLine>,
}

/// One drug's line in an [`InventoryReport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryLine {
    pub code: String,
    pub name: String,
    pub stock_level: u32,
    pub price: Decimal,
    pub value: Decimal,
    pub low_stock: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryReport {
    pub total_drugs: usize,
    pub total_stock: u64,
    pub total_value: Decimal,
    pub stock_threshold: u32,
    pub low_stock_count: usize,
    /// Share of drugs at or below the threshold, zero when there are none
    pub low_stock_percentage: Decimal,
    pub lines: Vec<InventoryLine>,
}

impl Inventory {
    /// Revenue per drug over the whole sales log
    ///
    /// # Errors
    ///
    /// [`InventoryError::CostOverflow`] if a total overflows
    pub fn sales_report(&self) -> Result<SalesReport, InventoryError> {
        let (total, per_drug) = tally_by(self.sales_log.iter(), |sale| sale.drug_code.as_str())?;

        let mut lines: Vec<SalesLine> = per_drug
            .iter()
            .filter_map(|(code, tally)| {
                let drug = self.drugs.get(*code)?;
                Some(SalesLine {
                    code: code.to_string(),
                    name: drug.name.clone(),
                    units: tally.units,
                    revenue: tally.amount,
                })
            })
            .collect();
        merge_sort_by(&mut lines, |a, b| a.code.cmp(&b.code));

        Ok(SalesReport {
            transactions: self.sales_log.len(),
            drugs_sold: per_drug.len(),
            total_units: total.units,
            total_revenue: total.amount,
            lines,
        })
    }

    /// Cost per supplier over the whole purchase history
    ///
    /// # Errors
    ///
    /// [`InventoryError::CostOverflow`] if a total overflows
    pub fn purchase_report(&self) -> Result<PurchaseReport, InventoryError> {
        let (total, per_supplier) = tally_by(self.purchase_history.iter(), |purchase| {
            purchase.counterparty_id.as_str()
        })?;

        let mut lines: Vec<PurchaseLine> = per_supplier
            .iter()
            .filter_map(|(id, tally)| {
                let supplier = self.suppliers.get(*id)?;
                Some(PurchaseLine {
                    supplier_id: id.to_string(),
                    name: supplier.name.clone(),
                    units: tally.units,
                    cost: tally.amount,
                })
            })
            .collect();
        merge_sort_by(&mut lines, |a, b| a.supplier_id.cmp(&b.supplier_id));

        Ok(PurchaseReport {
            transactions: self.purchase_history.len(),
            total_units: total.units,
            total_cost: total.amount,
            lines,
        })
    }

    /// Stock, value and low-stock status of every drug
    ///
    /// # Errors
    ///
    /// [`InventoryError::CostOverflow`] if a stock value overflows
    pub fn inventory_report(&self) -> Result<InventoryReport, InventoryError> {
        let mut total_stock = 0u64;
        let mut total_value = Decimal::ZERO;
        let mut low_stock_count = 0usize;
        let mut lines = Vec::with_capacity(self.drugs.len());

        for drug in self.drugs() {
            let value = drug.stock_value().ok_or(InventoryError::CostOverflow)?;
            let low_stock = drug.is_low_stock(self.stock_threshold);

            total_stock += u64::from(drug.stock_level);
            total_value =
                money::checked_add(total_value, value).ok_or(InventoryError::CostOverflow)?;
            if low_stock {
                low_stock_count += 1;
            }

            lines.push(InventoryLine {
                code: drug.code.clone(),
                name: drug.name.clone(),
                stock_level: drug.stock_level,
                price: drug.price,
                value,
                low_stock,
            });
        }

        Ok(InventoryReport {
            total_drugs: self.drugs.len(),
            total_stock,
            total_value,
            stock_threshold: self.stock_threshold,
            low_stock_count,
            low_stock_percentage: money::percentage(low_stock_count, self.drugs.len()),
            lines,
        })
    }
}

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for SalesReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Sales Report ===")?;
        writeln!(f, "Transactions: {}", self.transactions)?;
        writeln!(f, "Drugs Sold: {}", self.drugs_sold)?;
        writeln!(f, "Units Sold: {}", self.total_units)?;
        writeln!(f, "Total Revenue: ${}", format_money(self.total_revenue))?;
        writeln!(f)?;
        writeln!(f, "Code | Name | Units Sold | Revenue")?;
        for line in &self.lines {
            writeln!(
                f,
                "{} | {} | {} | ${}",
                line.code,
                line.name,
                line.units,
                format_money(line.revenue)
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for PurchaseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Purchase Report ===")?;
        writeln!(f, "Transactions: {}", self.transactions)?;
        writeln!(f, "Units Purchased: {}", self.total_units)?;
        writeln!(f, "Total Cost: ${}", format_money(self.total_cost))?;
        writeln!(f)?;
        writeln!(f, "ID | Name | Units Purchased | Cost")?;
        for line in &self.lines {
            writeln!(
                f,
                "{} | {} | {} | ${}",
                line.supplier_id,
                line.name,
                line.units,
                format_money(line.cost)
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for InventoryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Inventory Report ===")?;
        writeln!(f, "Total Drugs: {}", self.total_drugs)?;
        writeln!(f, "Total Stock: {}", self.total_stock)?;
        writeln!(f, "Total Value: ${}", format_money(self.total_value))?;
        writeln!(
            f,
            "Low Stock Items: {} ({}%) at threshold {}",
            self.low_stock_count,
            format_money(self.low_stock_percentage),
            self.stock_threshold
        )?;
        writeln!(f)?;
        writeln!(f, "Code | Name | Stock | Price | Value | Status")?;
        for line in &self.lines {
            writeln!(
                f,
                "{} | {} | {} | ${} | ${} | {}",
                line.code,
                line.name,
                line.stock_level,
                format_money(line.price),
                format_money(line.value),
                if line.low_stock { "[LOW STOCK]" } else { "[OK]" }
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Drug, Supplier};
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, minute, 0)
            .unwrap()
    }

    fn stocked() -> Inventory {
        let mut inventory = Inventory::new();
        inventory
            .add_drug(Drug::new("A", "Amoxicillin", Decimal::new(250, 2)).with_stock(40))
            .unwrap();
        inventory
            .add_drug(Drug::new("B", "Ibuprofen", Decimal::new(100, 2)).with_stock(5))
            .unwrap();
        inventory
            .add_supplier(Supplier::new("S1", "Acme", "Lagos", 2))
            .unwrap();
        inventory
    }

    #[test]
    fn test_sales_report_totals() {
        let mut inventory = stocked();
        inventory.log_sale("A", "C1", 2, at(0)).unwrap();
        inventory.log_sale("A", "C2", 3, at(1)).unwrap();
        inventory.log_sale("B", "C1", 1, at(2)).unwrap();

        let report = inventory.sales_report().unwrap();
        assert_eq!(report.transactions, 3);
        assert_eq!(report.drugs_sold, 2);
        assert_eq!(report.total_units, 6);
        assert_eq!(report.total_revenue, Decimal::new(1350, 2));
        assert_eq!(report.lines[0].code, "A");
        assert_eq!(report.lines[0].units, 5);
        assert_eq!(report.lines[0].revenue, Decimal::new(1250, 2));

        // generating a report leaves the log intact
        assert_eq!(inventory.sales_log().len(), 3);
    }

    #[test]
    fn test_sales_report_skips_removed_drug() {
        let mut inventory = stocked();
        inventory.log_sale("B", "C1", 1, at(0)).unwrap();
        inventory.remove_drug("B").unwrap();

        let report = inventory.sales_report().unwrap();
        assert_eq!(report.total_units, 1);
        assert!(report.lines.is_empty());
    }

    #[test]
    fn test_purchase_report_by_supplier() {
        let mut inventory = stocked();
        inventory.log_purchase("A", "S1", 10, at(0)).unwrap();
        inventory.log_purchase("B", "S1", 4, at(1)).unwrap();
        inventory.log_purchase("B", "S9", 1, at(2)).unwrap();

        let report = inventory.purchase_report().unwrap();
        assert_eq!(report.transactions, 3);
        assert_eq!(report.total_cost, Decimal::new(3000, 2));
        assert_eq!(report.lines.len(), 1);
        assert_eq!(report.lines[0].units, 14);
        assert_eq!(report.lines[0].cost, Decimal::new(2900, 2));
        assert_eq!(inventory.purchase_history().len(), 3);
    }

    #[test]
    fn test_inventory_report() {
        let inventory = stocked();
        let report = inventory.inventory_report().unwrap();

        assert_eq!(report.total_drugs, 2);
        assert_eq!(report.total_stock, 45);
        assert_eq!(report.total_value, Decimal::new(10500, 2));
        assert_eq!(report.low_stock_count, 1);
        assert_eq!(report.low_stock_percentage, Decimal::from(50));
        assert!(report.lines[1].low_stock);

        let text = report.to_string();
        assert!(text.contains("B | Ibuprofen | 5 | $1.00 | $5.00 | [LOW STOCK]"));
    }

    #[test]
    fn test_inventory_report_empty() {
        let report = Inventory::new().inventory_report().unwrap();

        assert_eq!(report.total_drugs, 0);
        assert_eq!(report.low_stock_percentage, Decimal::ZERO);
    }
}
