//! Errors raised by the inventory service.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    #[error("drug {0} not found")]
    DrugNotFound(String),

    #[error("supplier {0} not found")]
    SupplierNotFound(String),

    #[error("customer {0} not found")]
    CustomerNotFound(String),

    #[error("drug code {0} already exists")]
    DuplicateDrug(String),

    #[error("supplier id {0} already exists")]
    DuplicateSupplier(String),

    #[error("customer id {0} already exists")]
    DuplicateCustomer(String),

    #[error("quantity must be greater than zero")]
    InvalidQuantity,

    #[error("insufficient stock for {code}: requested {requested}, available {available}")]
    InsufficientStock {
        code: String,
        requested: u32,
        available: u32,
    },

    #[error("stock level of {0} would overflow")]
    StockOverflow(String),

    #[error("cost calculation overflowed")]
    CostOverflow,
}
