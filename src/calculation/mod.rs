//! Calculation logic for the HR payroll engine.
//!
//! This module contains the pure rules: worked hours between check-in and
//! check-out, late arrival detection, monthly attendance aggregation,
//! monthly overtime detection, and the two-phase payroll breakdown
//! (gross first, then deductions and net).

mod attendance_summary;
mod late_detection;
mod monthly_overtime;
mod payroll_breakdown;
mod rounding;
mod worked_hours;

pub use attendance_summary::{AttendanceSummary, StatusBreakdown, count_statuses, summarize_attendance};
pub use late_detection::{default_late_cutoff, detect_check_in_status};
pub use monthly_overtime::{MonthlyOvertimeDetection, detect_monthly_overtime};
pub use payroll_breakdown::{
    GrossBreakdown, PayrollBreakdown, apply_deductions, calculate_gross, calculate_payroll,
    deduction_for,
};
pub use rounding::{CURRENCY_DP, HOURS_DP, round_currency, round_hours};
pub use worked_hours::calculate_worked_hours;
