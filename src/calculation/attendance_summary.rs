//! Monthly attendance aggregation.
//!
//! Reduces an employee's attendance records for a payroll period into the
//! total worked hours and the number of attendance rows. Every row counts
//! regardless of status; rows without worked hours contribute zero hours.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AttendanceRecord, AttendanceStatus, Period};

/// Worked hours and day count for one employee over one period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttendanceSummary {
    /// Sum of worked hours.
    pub total_hours: Decimal,
    /// Number of attendance rows.
    pub working_days: u32,
}

/// Attendance row counts per status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusBreakdown {
    /// Total rows counted.
    pub total_records: u32,
    /// Rows marked present.
    pub present: u32,
    /// Rows marked absent.
    pub absent: u32,
    /// Rows marked late.
    pub late: u32,
    /// Rows marked half day.
    pub half_day: u32,
}

/// Summarizes the attendance of `employee_id` during `period`.
///
/// Records belonging to other employees or dated outside the period are
/// ignored, so callers may pass an unfiltered slice.
///
/// # Examples
///
/// ```
/// use hr_payroll::calculation::summarize_attendance;
/// use hr_payroll::models::Period;
/// use rust_decimal::Decimal;
///
/// let summary = summarize_attendance(std::iter::empty(), 1, Period::new(2025, 1).unwrap());
/// assert_eq!(summary.total_hours, Decimal::ZERO);
/// assert_eq!(summary.working_days, 0);
/// ```
pub fn summarize_attendance<'a, I>(records: I, employee_id: u64, period: Period) -> AttendanceSummary
where
    I: IntoIterator<Item = &'a AttendanceRecord>,
{
    records
        .into_iter()
        .filter(|r| r.employee_id == employee_id && period.contains_date(r.date))
        .fold(AttendanceSummary::default(), |acc, r| AttendanceSummary {
            total_hours: acc.total_hours + r.hours_or_zero(),
            working_days: acc.working_days + 1,
        })
}

/// Counts attendance rows per status within `period`, across all employees.
pub fn count_statuses<'a, I>(records: I, period: Period) -> StatusBreakdown
where
    I: IntoIterator<Item = &'a AttendanceRecord>,
{
    let mut breakdown = StatusBreakdown::default();
    for record in records.into_iter().filter(|r| period.contains_date(r.date)) {
        breakdown.total_records += 1;
        match record.status {
            AttendanceStatus::Present => breakdown.present += 1,
            AttendanceStatus::Absent => breakdown.absent += 1,
            AttendanceStatus::Late => breakdown.late += 1,
            AttendanceStatus::HalfDay => breakdown.half_day += 1,
        }
    }
    breakdown
}
