//! Line codec for the flat files.
//!
//! One record per line, fields separated by `|`, list fields joined with
//! `,`. Encoding fails on values that would break the layout; decoding
//! reports a reason string that the store wraps with file and line.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::store::StoreError;
use crate::types::money::parse_money;
use crate::types::{Customer, Drug, Supplier, Transaction, TransactionKind, TIMESTAMP_FORMAT};

pub const FIELD_SEPARATOR: char = '|';
pub const LIST_SEPARATOR: char = ',';

const DATE_FORMAT: &str = "%Y-%m-%d";

// ============================================================================
// Encoding
// ============================================================================

fn check_field<'a>(field: &'static str, value: &'a str) -> Result<&'a str, StoreError> {
    if value.contains(FIELD_SEPARATOR) || value.contains('\n') || value.contains('\r') {
        return Err(StoreError::InvalidField {
            field,
            value: value.to_string(),
        });
    }
    Ok(value)
}

fn join_list(field: &'static str, items: &[String]) -> Result<String, StoreError> {
    for item in items {
        // empty items would not survive a split
        if item.is_empty() || item.contains(LIST_SEPARATOR) {
            return Err(StoreError::InvalidField {
                field,
                value: item.clone(),
            });
        }
        check_field(field, item)?;
    }
    Ok(items.join(","))
}

pub fn encode_drug(drug: &Drug) -> Result<String, StoreError> {
    let expiration = drug
        .expiration_date
        .map(|date| date.format(DATE_FORMAT).to_string())
        .unwrap_or_default();

    Ok(format!(
        "{}|{}|{}|{}|{}|{}",
        check_field("drug code", &drug.code)?,
        check_field("drug name", &drug.name)?,
        join_list("drug suppliers", &drug.suppliers)?,
        expiration,
        drug.price,
        drug.stock_level
    ))
}

pub fn encode_supplier(supplier: &Supplier) -> Result<String, StoreError> {
    Ok(format!(
        "{}|{}|{}|{}|{}",
        check_field("supplier id", &supplier.id)?,
        check_field("supplier name", &supplier.name)?,
        check_field("supplier location", &supplier.location)?,
        supplier.delivery_days,
        join_list("supplier drugs", &supplier.drug_codes)?
    ))
}

pub fn encode_customer(customer: &Customer) -> Result<String, StoreError> {
    Ok(format!(
        "{}|{}|{}",
        check_field("customer id", &customer.id)?,
        check_field("customer name", &customer.name)?,
        check_field("customer contact", &customer.contact)?
    ))
}

/// The kind is implied by the file the line goes to
pub fn encode_transaction(transaction: &Transaction) -> Result<String, StoreError> {
    Ok(format!(
        "{}|{}|{}|{}|{}",
        check_field("transaction drug code", &transaction.drug_code)?,
        transaction.quantity,
        check_field("transaction counterparty", &transaction.counterparty_id)?,
        transaction.timestamp.format(TIMESTAMP_FORMAT),
        transaction.total_cost
    ))
}

// ============================================================================
// Decoding
// ============================================================================

/// Split a line into exactly `N` fields
fn split_fields<const N: usize>(line: &str) -> Result<[&str; N], String> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    fields
        .try_into()
        .map_err(|fields: Vec<&str>| format!("expected {} fields, found {}", N, fields.len()))
}

fn split_list(value: &str) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }
    value.split(LIST_SEPARATOR).map(str::to_string).collect()
}

fn parse_number<T: FromStr>(what: &str, value: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("invalid {}: {:?}", what, value))
}

fn parse_amount(what: &str, value: &str) -> Result<Decimal, String> {
    parse_money(value).ok_or_else(|| format!("invalid {}: {:?}", what, value))
}

pub fn decode_drug(line: &str) -> Result<Drug, String> {
    let [code, name, suppliers, expiration, price, stock] = split_fields::<6>(line)?;

    let expiration_date = if expiration.is_empty() {
        None
    } else {
        Some(
            NaiveDate::parse_from_str(expiration, DATE_FORMAT)
                .map_err(|e| format!("invalid expiration date {:?}: {}", expiration, e))?,
        )
    };

    let mut drug = Drug {
        code: code.to_string(),
        name: name.to_string(),
        suppliers: Vec::new(),
        expiration_date,
        price: parse_amount("price", price)?,
        stock_level: parse_number("stock level", stock)?,
    };
    for supplier_id in split_list(suppliers) {
        drug.add_supplier(supplier_id);
    }
    Ok(drug)
}

pub fn decode_supplier(line: &str) -> Result<Supplier, String> {
    let [id, name, location, delivery_days, drug_codes] = split_fields::<5>(line)?;

    let mut supplier = Supplier {
        id: id.to_string(),
        name: name.to_string(),
        location: location.to_string(),
        delivery_days: parse_number("delivery days", delivery_days)?,
        drug_codes: Vec::new(),
    };
    for code in split_list(drug_codes) {
        supplier.add_drug(code);
    }
    Ok(supplier)
}

pub fn decode_customer(line: &str) -> Result<Customer, String> {
    let [id, name, contact] = split_fields::<3>(line)?;
    Ok(Customer::new(id, name, contact))
}

pub fn decode_transaction(kind: TransactionKind, line: &str) -> Result<Transaction, String> {
    let [drug_code, quantity, counterparty, timestamp, total_cost] = split_fields::<5>(line)?;

    let timestamp = NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT)
        .map_err(|e| format!("invalid timestamp {:?}: {}", timestamp, e))?;

    Ok(Transaction::new(
        kind,
        drug_code,
        parse_number("quantity", quantity)?,
        counterparty,
        parse_amount("total cost", total_cost)?,
        timestamp,
    ))
}

// ============================================================================
// Unit Tests
// ============================================================================
