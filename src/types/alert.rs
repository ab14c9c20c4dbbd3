//! Low-stock alert entries held in the inventory's min-heap.

use std::cmp::Ordering;
use std::fmt;

use crate::types::Drug;

/// Snapshot of a drug at or below the stock threshold.
///
/// The heap is rebuilt from the drug map on every change, so the snapshot
/// never needs to track later edits to the drug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LowStockAlert {
    pub code: String,
    pub name: String,
    pub stock_level: u32,
}

impl LowStockAlert {
    /// Heap comparator: lowest stock first
    ///
    /// Only the stock level is compared; alerts with equal stock come out
    /// in unspecified order.
    pub fn by_stock_level(a: &LowStockAlert, b: &LowStockAlert) -> Ordering {
        a.stock_level.cmp(&b.stock_level)
    }
}

impl From<&Drug> for LowStockAlert {
    fn from(drug: &Drug) -> Self {
        Self {
            code: drug.code.clone(),
            name: drug.name.clone(),
            stock_level: drug.stock_level,
        }
    }
}

impl fmt::Display for LowStockAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Code: {}, Name: {}, Stock: {}",
            self.code, self.name, self.stock_level
        )
    }
}
