//! Error types for the HR payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition that can occur while recording attendance or
//! producing payroll.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the HR payroll engine.
///
/// All operations return this error type. None of the variants are fatal to
/// the process; the HTTP layer turns each one into a single message tied to
/// the failed action.
///
/// # Example
///
/// ```
/// use hr_payroll::error::HrError;
///
/// let error = HrError::InvalidPeriod { year: 2019, month: 5 };
/// assert_eq!(error.to_string(), "Invalid payroll period 2019-05");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HrError {
    /// The employee already has a check-in for the day.
    #[error("Employee {employee_id} has already checked in on {date}")]
    AlreadyCheckedIn {
        /// The employee that attempted to check in.
        employee_id: u64,
        /// The attendance date.
        date: NaiveDate,
    },

    /// The employee already has a check-out for the day.
    #[error("Employee {employee_id} has already checked out on {date}")]
    AlreadyCheckedOut {
        /// The employee that attempted to check out.
        employee_id: u64,
        /// The attendance date.
        date: NaiveDate,
    },

    /// Check-out was attempted without a check-in for the day.
    #[error("No check-in found for employee {employee_id} on {date}")]
    NoCheckInFound {
        /// The employee that attempted to check out.
        employee_id: u64,
        /// The attendance date.
        date: NaiveDate,
    },

    /// A check-out time precedes the check-in time.
    #[error("Check-out time {check_out} is before check-in time {check_in}")]
    CheckOutBeforeCheckIn {
        /// The check-in time of day.
        check_in: chrono::NaiveTime,
        /// The check-out time of day.
        check_out: chrono::NaiveTime,
    },

    /// The payroll period is outside the accepted range.
    #[error("Invalid payroll period {year}-{month:02}")]
    InvalidPeriod {
        /// The requested year.
        year: i32,
        /// The requested month.
        month: u32,
    },

    /// A payroll record already exists for the employee and period.
    #[error("Payroll for employee {employee_id} already exists for {year}-{month:02}")]
    DuplicatePayrollPeriod {
        /// The employee.
        employee_id: u64,
        /// The period year.
        year: i32,
        /// The period month.
        month: u32,
    },

    /// An attendance record already exists for the employee and date.
    #[error("Attendance for employee {employee_id} already exists on {date}")]
    DuplicateAttendance {
        /// The employee.
        employee_id: u64,
        /// The attendance date.
        date: NaiveDate,
    },

    /// The referenced employee does not exist.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The missing employee id.
        employee_id: u64,
    },

    /// The caller's user account has no employee profile.
    #[error("User {user_id} is not linked to an employee profile")]
    NotLinkedToEmployee {
        /// The caller's user account.
        user_id: u64,
    },

    /// Another employee already uses the employee code.
    #[error("Employee code already taken: {code}")]
    DuplicateEmployeeCode {
        /// The conflicting code.
        code: String,
    },

    /// Another employee is already linked to the user account.
    #[error("User {user_id} is already linked to an employee")]
    UserAlreadyLinked {
        /// The user account.
        user_id: u64,
    },

    /// The referenced attendance record does not exist.
    #[error("Attendance record not found: {attendance_id}")]
    AttendanceNotFound {
        /// The missing record id.
        attendance_id: u64,
    },

    /// The referenced payroll record does not exist.
    #[error("Payroll record not found: {payroll_id}")]
    PayrollNotFound {
        /// The missing record id.
        payroll_id: u64,
    },

    /// The payroll record has been paid and can no longer change.
    #[error("Payroll record {payroll_id} is paid and can no longer be modified")]
    PayrollFinalized {
        /// The finalized record id.
        payroll_id: u64,
    },

    /// A monetary or hour amount failed validation.
    #[error("Invalid amount for '{field}': {message}")]
    InvalidAmount {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The caller lacks the capability for the action.
    #[error("Not permitted to {action}")]
    Forbidden {
        /// The attempted action.
        action: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

/// A type alias for Results that return HrError.
pub type HrResult<T> = Result<T, HrError>;
