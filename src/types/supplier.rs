//! Supplier record, keyed by id.

use std::fmt;

/// A drug supplier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Supplier {
    /// Unique supplier id (primary key)
    pub id: String,

    pub name: String,

    pub location: String,

    /// Typical delivery time in days
    pub delivery_days: u32,

    /// Codes of drugs this supplier carries
    pub drug_codes: Vec<String>,
}

impl Supplier {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        location: impl Into<String>,
        delivery_days: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location: location.into(),
            delivery_days,
            drug_codes: Vec::new(),
        }
    }

    /// Record a carried drug; returns `false` if already recorded
    pub fn add_drug(&mut self, code: impl Into<String>) -> bool {
        let code = code.into();
        if self.drug_codes.contains(&code) {
            return false;
        }
        self.drug_codes.push(code);
        true
    }

    pub fn remove_drug(&mut self, code: &str) -> bool {
        let before = self.drug_codes.len();
        self.drug_codes.retain(|c| c != code);
        self.drug_codes.len() != before
    }
}

impl fmt::Display for Supplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) - Location: {}, Delivery Time: {} days",
            self.name, self.id, self.location, self.delivery_days
        )
    }
}
