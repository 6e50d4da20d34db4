//! Worked hours between a check-in and a check-out.
//!
//! Attendance never spans midnight, so both values are times of day on the
//! same calendar date. Fractional minutes are preserved up to two decimal
//! places of an hour.

use chrono::NaiveTime;
use rust_decimal::Decimal;

use crate::error::{HrError, HrResult};

use super::rounding::round_hours;

const SECONDS_PER_HOUR: Decimal = Decimal::from_parts(3600, 0, 0, false, 0);

/// Calculates the elapsed hours between `check_in` and `check_out`.
///
/// # Returns
///
/// The elapsed time in hours, rounded to two decimal places, or
/// `CheckOutBeforeCheckIn` if `check_out` precedes `check_in`. Equal times
/// yield zero hours.
///
/// # Examples
///
/// ```
/// use hr_payroll::calculation::calculate_worked_hours;
/// use chrono::NaiveTime;
/// use rust_decimal::Decimal;
///
/// let check_in = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
/// let check_out = NaiveTime::from_hms_opt(16, 30, 0).unwrap();
/// assert_eq!(calculate_worked_hours(check_in, check_out).unwrap(), Decimal::new(850, 2));
/// ```
pub fn calculate_worked_hours(check_in: NaiveTime, check_out: NaiveTime) -> HrResult<Decimal> {
    if check_out < check_in {
        return Err(HrError::CheckOutBeforeCheckIn {
            check_in,
            check_out,
        });
    }

    let seconds = (check_out - check_in).num_seconds();
    Ok(round_hours(Decimal::from(seconds) / SECONDS_PER_HOUR))
}
