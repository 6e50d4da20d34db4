//! Core data models for the HR payroll engine.
//!
//! This module contains the three persisted entities (employees, attendance
//! records, payroll records) and the payroll [`Period`] they are grouped by.

mod attendance;
mod employee;
mod payroll;
mod period;

pub use attendance::{AttendanceRecord, AttendanceStatus, NewAttendance};
pub use employee::{Employee, EmployeeStatus, EmployeeUpdate, NewEmployee};
pub use payroll::{NewPayroll, PayrollRecord, PayrollStatus};
pub use period::Period;
