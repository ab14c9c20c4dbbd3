//! Money helpers over `rust_decimal`.
//!
//! ## Overview
//!
//! Prices and transaction totals are [`Decimal`] values. Nothing in the
//! inventory touches `f64`, so totals summed over many transactions are
//! exact and reproduce byte-for-byte after a save/load cycle.
//!
//! ## Display
//!
//! Amounts are shown with two decimal places ([`MONEY_DP`]). The stored
//! value keeps whatever scale it was entered with.
//!
//! ## Examples
//!
//! ```
//! use amis::types::money::{parse_money, format_money, line_total};
//!
//! let price = parse_money("12.5").unwrap();
//! assert_eq!(format_money(price), "12.50");
//!
//! let total = line_total(price, 4).unwrap();
//! assert_eq!(format_money(total), "50.00");
//! ```

use std::str::FromStr;

use rust_decimal::Decimal;

/// Decimal places shown for money amounts
pub const MONEY_DP: u32 = 2;

// ============================================================================
// Conversion Functions
// ============================================================================

/// Parse a non-negative decimal amount
///
/// # Returns
///
/// * `Some(Decimal)` - The parsed amount
/// * `None` - If parsing fails or the amount is negative
///
/// # Example
///
/// ```
/// use amis::types::money::parse_money;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_money("1.25"), Some(Decimal::new(125, 2)));
/// assert_eq!(parse_money(" 3 "), Some(Decimal::from(3)));
/// assert_eq!(parse_money("-1"), None);
/// ```
pub fn parse_money(s: &str) -> Option<Decimal> {
    let amount = Decimal::from_str(s.trim()).ok()?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return None;
    }
    Some(amount)
}

/// Format an amount with [`MONEY_DP`] decimal places
///
/// # Example
///
/// ```
/// use amis::types::money::format_money;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_money(Decimal::from(5)), "5.00");
/// assert_eq!(format_money(Decimal::new(1999, 3)), "2.00");
/// ```
pub fn format_money(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(MONEY_DP))
}

// ============================================================================
// Arithmetic Functions
// ============================================================================

/// Unit price times quantity
///
/// # Returns
///
/// * `Some(Decimal)` - The total
/// * `None` - If the multiplication overflows
pub fn line_total(price: Decimal, quantity: u32) -> Option<Decimal> {
    price.checked_mul(Decimal::from(quantity))
}

/// Add two amounts
///
/// # Returns
///
/// * `None` - If the addition overflows
pub fn checked_add(a: Decimal, b: Decimal) -> Option<Decimal> {
    a.checked_add(b)
}

/// `part / whole` as a percentage rounded to [`MONEY_DP`] places
///
/// Returns zero when `whole` is zero.
///
/// # Example
///
/// ```
/// use amis::types::money::percentage;
/// use rust_decimal::Decimal;
///
/// assert_eq!(percentage(1, 3), Decimal::new(3333, 2));
/// assert_eq!(percentage(5, 0), Decimal::ZERO);
/// ```
pub fn percentage(part: usize, whole: usize) -> Decimal {
    if whole == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(part) * Decimal::ONE_HUNDRED / Decimal::from(whole)).round_dp(MONEY_DP)
}

// ============================================================================
// Unit Tests
// ============================================================================
