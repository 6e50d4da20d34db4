//! Late arrival detection.
//!
//! A check-in strictly after the late cutoff is recorded as late; a check-in
//! at or before the cutoff is recorded as present.

use chrono::NaiveTime;

use crate::models::AttendanceStatus;

/// Returns the default late cutoff, 09:00:00.
pub fn default_late_cutoff() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default()
}

/// Determines the attendance status for a check-in time.
///
/// # Examples
///
/// ```
/// use hr_payroll::calculation::{detect_check_in_status, default_late_cutoff};
/// use hr_payroll::models::AttendanceStatus;
/// use chrono::NaiveTime;
///
/// let on_time = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
/// let late = NaiveTime::from_hms_opt(9, 0, 1).unwrap();
/// assert_eq!(detect_check_in_status(on_time, default_late_cutoff()), AttendanceStatus::Present);
/// assert_eq!(detect_check_in_status(late, default_late_cutoff()), AttendanceStatus::Late);
/// ```
pub fn detect_check_in_status(check_in: NaiveTime, cutoff: NaiveTime) -> AttendanceStatus {
    if check_in > cutoff {
        AttendanceStatus::Late
    } else {
        AttendanceStatus::Present
    }
}
