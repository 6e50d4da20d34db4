//! Monthly overtime detection.
//!
//! Overtime for a payroll period is whatever worked time exceeds the standard
//! hours, where standard hours are the attended days multiplied by the
//! standard hours per day.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::attendance_summary::AttendanceSummary;

/// The split of a period's worked hours into standard and overtime hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyOvertimeDetection {
    /// working_days × hours_per_day.
    pub standard_hours: Decimal,
    /// max(0, total_hours − standard_hours).
    pub overtime_hours: Decimal,
}

/// Detects overtime hours for a period.
///
/// # Examples
///
/// ```
/// use hr_payroll::calculation::{detect_monthly_overtime, AttendanceSummary};
/// use rust_decimal::Decimal;
///
/// let summary = AttendanceSummary { total_hours: Decimal::from(180), working_days: 20 };
/// let detection = detect_monthly_overtime(&summary, Decimal::from(8));
/// assert_eq!(detection.standard_hours, Decimal::from(160));
/// assert_eq!(detection.overtime_hours, Decimal::from(20));
/// ```
pub fn detect_monthly_overtime(
    summary: &AttendanceSummary,
    hours_per_day: Decimal,
) -> MonthlyOvertimeDetection {
    let standard_hours = Decimal::from(summary.working_days) * hours_per_day;
    let overtime_hours = (summary.total_hours - standard_hours).max(Decimal::ZERO);

    MonthlyOvertimeDetection {
        standard_hours,
        overtime_hours,
    }
}
