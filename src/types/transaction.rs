//! Purchase and sale events.
//!
//! Purchases flow into the purchase-history queue (oldest first); sales
//! are pushed on the sales-log stack (most recent on top).

use std::fmt;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::types::money::format_money;

/// ISO-8601 layout used wherever a timestamp is written as text
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Direction of a stock movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    /// Stock bought from a supplier
    Purchase,
    /// Stock sold to a customer
    Sale,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Purchase => "Purchase",
            TransactionKind::Sale => "Sale",
        }
    }
}

/// A single purchase or sale.
///
/// ## Example
///
/// ```
/// use amis::types::{Transaction, TransactionKind};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let at = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(9, 30, 0).unwrap();
/// let sale = Transaction::new(TransactionKind::Sale, "PCM-500", 2, "C1", Decimal::new(500, 2), at);
///
/// assert_eq!(sale.to_string(), "2024-03-01 09:30:00 - Sale: 2 units of PCM-500 for 5.00");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub kind: TransactionKind,

    pub drug_code: String,

    /// Units moved
    pub quantity: u32,

    /// Supplier id for purchases, customer id for sales
    pub counterparty_id: String,

    /// Unit price at the time times quantity
    pub total_cost: Decimal,

    pub timestamp: NaiveDateTime,
}

impl Transaction {
    pub fn new(
        kind: TransactionKind,
        drug_code: impl Into<String>,
        quantity: u32,
        counterparty_id: impl Into<String>,
        total_cost: Decimal,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            kind,
            drug_code: drug_code.into(),
            quantity,
            counterparty_id: counterparty_id.into(),
            total_cost,
            timestamp,
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}: {} units of {} for {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.kind.as_str(),
            self.quantity,
            self.drug_code,
            format_money(self.total_cost)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_transaction_kind() {
        let at = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let purchase = Transaction::new(TransactionKind::Purchase, "X", 1, "S1", Decimal::ONE, at);

        assert_eq!(purchase.kind.as_str(), "Purchase");
        assert_eq!(
            purchase.to_string(),
            "2024-01-01 00:00:00 - Purchase: 1 units of X for 1.00"
        );
    }
}
