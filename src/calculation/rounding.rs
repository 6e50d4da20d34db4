//! Fixed-point rounding for currency and hour values.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places kept on monetary values.
pub const CURRENCY_DP: u32 = 2;

/// Decimal places kept on hour values.
pub const HOURS_DP: u32 = 2;

/// Rounds a monetary value to currency precision, half away from zero.
///
/// # Example
///
/// ```
/// use hr_payroll::calculation::round_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_currency(Decimal::from_str("10.005").unwrap()), Decimal::from_str("10.01").unwrap());
/// ```
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CURRENCY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds an hour value to two decimal places, half away from zero.
pub fn round_hours(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(HOURS_DP, RoundingStrategy::MidpointAwayFromZero)
}
