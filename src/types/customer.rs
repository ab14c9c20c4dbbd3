//! Customer record, keyed by id.

use std::fmt;

/// A pharmacy customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    /// Unique customer id (primary key)
    pub id: String,

    pub name: String,

    /// Free-form contact details
    pub contact: String,
}

impl Customer {
    pub fn new(id: impl Into<String>, name: impl Into<String>, contact: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            contact: contact.into(),
        }
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) - Contact: {}", self.name, self.id, self.contact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_display() {
        let customer = Customer::new("C1", "Ama Mensah", "0244000000");

        assert_eq!(customer.to_string(), "Ama Mensah (C1) - Contact: 0244000000");
    }
}
