//! Currency rounding helpers
//!
//! Every monetary amount in the crate is a `BigDecimal` rounded to two
//! decimal places with banker's rounding (round-half-even). Values are
//! rounded once, at the point they are computed; sums of already-rounded
//! values are never re-rounded, so invoice totals add up exactly.

use bigdecimal::{BigDecimal, RoundingMode};

/// Number of decimal places kept for monetary amounts.
pub const MONEY_SCALE: i64 = 2;

/// Round a monetary amount to [`MONEY_SCALE`] decimal places, half-even.
pub fn round_money(amount: &BigDecimal) -> BigDecimal {
    amount.with_scale_round(MONEY_SCALE, RoundingMode::HalfEven)
}

/// Check whether an amount is strictly negative.
pub fn is_negative(amount: &BigDecimal) -> bool {
    *amount < BigDecimal::from(0)
}
