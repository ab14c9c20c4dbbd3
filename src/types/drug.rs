//! Drug record, keyed by its code.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::types::money::{self, format_money};

/// A stocked drug.
///
/// ## Example
///
/// ```
/// use amis::types::Drug;
/// use rust_decimal::Decimal;
///
/// let mut drug = Drug::new("PCM-500", "Paracetamol", Decimal::new(250, 2)).with_stock(40);
/// assert!(drug.add_supplier("SUP-1"));
/// assert!(!drug.add_supplier("SUP-1"));
///
/// assert_eq!(drug.to_string(), "Paracetamol (PCM-500) - Stock: 40, Price: 2.50");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drug {
    /// Unique drug code (primary key)
    pub code: String,

    /// Display name
    pub name: String,

    /// Supplier ids, no duplicates, in the order they were added
    pub suppliers: Vec<String>,

    pub expiration_date: Option<NaiveDate>,

    /// Unit price
    pub price: Decimal,

    /// Units on hand
    pub stock_level: u32,
}

impl Drug {
    /// Create a drug with no stock, suppliers, or expiration date
    pub fn new(code: impl Into<String>, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            suppliers: Vec::new(),
            expiration_date: None,
            price,
            stock_level: 0,
        }
    }

    pub fn with_stock(mut self, stock_level: u32) -> Self {
        self.stock_level = stock_level;
        self
    }

    pub fn with_expiration(mut self, date: NaiveDate) -> Self {
        self.expiration_date = Some(date);
        self
    }

    /// Link a supplier id; returns `false` if it was already linked
    pub fn add_supplier(&mut self, supplier_id: impl Into<String>) -> bool {
        let supplier_id = supplier_id.into();
        if self.suppliers.contains(&supplier_id) {
            return false;
        }
        self.suppliers.push(supplier_id);
        true
    }

    /// Unlink a supplier id; returns `false` if it was not linked
    pub fn remove_supplier(&mut self, supplier_id: &str) -> bool {
        let before = self.suppliers.len();
        self.suppliers.retain(|id| id != supplier_id);
        self.suppliers.len() != before
    }

    #[inline]
    pub fn is_supplied_by(&self, supplier_id: &str) -> bool {
        self.suppliers.iter().any(|id| id == supplier_id)
    }

    /// At or below `threshold` units
    #[inline]
    pub fn is_low_stock(&self, threshold: u32) -> bool {
        self.stock_level <= threshold
    }

    /// Price times units on hand, `None` on overflow
    pub fn stock_value(&self) -> Option<Decimal> {
        money::line_total(self.price, self.stock_level)
    }
}

impl fmt::Display for Drug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) - Stock: {}, Price: {}",
            self.name,
            self.code,
            self.stock_level,
            format_money(self.price)
        )
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_drug() -> Drug {
        Drug::new("AMX-250", "Amoxicillin", Decimal::new(1250, 2))
    }

    #[test]
    fn test_drug_new() {
        let drug = create_test_drug();

        assert_eq!(drug.code, "AMX-250");
        assert_eq!(drug.stock_level, 0);
        assert!(drug.suppliers.is_empty());
        assert!(drug.expiration_date.is_none());
    }

    #[test]
    fn test_drug_suppliers() {
        let mut drug = create_test_drug();

        assert!(drug.add_supplier("S1"));
        assert!(drug.add_supplier("S2"));
        assert!(!drug.add_supplier("S1"));
        assert_eq!(drug.suppliers, vec!["S1", "S2"]);
        assert!(drug.is_supplied_by("S2"));

        assert!(drug.remove_supplier("S1"));
        assert!(!drug.remove_supplier("S1"));
        assert_eq!(drug.suppliers, vec!["S2"]);
    }

    #[test]
    fn test_drug_low_stock_is_inclusive() {
        let drug = create_test_drug().with_stock(10);

        assert!(drug.is_low_stock(10));
        assert!(!drug.is_low_stock(9));
    }

    #[test]
    fn test_drug_stock_value() {
        let drug = create_test_drug().with_stock(4);

        assert_eq!(drug.stock_value(), Some(Decimal::new(5000, 2)));
    }

    #[test]
    fn test_drug_display() {
        let drug = create_test_drug().with_stock(3);

        assert_eq!(drug.to_string(), "Amoxicillin (AMX-250) - Stock: 3, Price: 12.50");
    }
}
