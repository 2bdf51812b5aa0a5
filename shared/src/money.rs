//! Fixed-point money helpers
//!
//! Prices travel as [`Decimal`] on the wire and live as integer cents in the
//! store. Conversions are centralized here so a rounding rule change is a
//! one-line edit.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Integer cents -> two-decimal amount.
pub fn cents_to_decimal(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// Two-decimal amount -> integer cents.
///
/// Rounds to 2 dp (banker's rounding is fine for catalog prices — amounts are
/// operator-entered, not computed). Returns `None` for negative amounts or
/// values that overflow i64 cents.
pub fn decimal_to_cents(amount: Decimal) -> Option<i64> {
    if amount.is_sign_negative() {
        return None;
    }
    (amount.round_dp(2) * Decimal::new(100, 0)).to_i64()
}
