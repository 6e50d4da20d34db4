//! Employee model and related types.
//!
//! This module defines the Employee struct and EmployeeStatus enum
//! for representing workers managed by HR.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether an employee currently takes part in payroll runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    /// Employed and included in payroll generation.
    #[default]
    Active,
    /// No longer included in payroll generation.
    Inactive,
}

/// Represents an employee record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Storage identifier for the employee.
    pub id: u64,
    /// The user account linked to this employee profile.
    pub user_id: u64,
    /// The unique, human-facing employee code (e.g., "EMP-0042").
    pub employee_code: String,
    /// Full name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Optional contact phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Department the employee belongs to.
    pub department: String,
    /// Job position.
    pub position: String,
    /// The date the employee was hired.
    pub hire_date: NaiveDate,
    /// Monthly basic salary.
    pub basic_salary: Decimal,
    /// Active or inactive.
    pub status: EmployeeStatus,
}

impl Employee {
    /// Returns true if the employee takes part in payroll generation.
    ///
    /// # Examples
    ///
    /// ```
    /// use hr_payroll::models::{Employee, EmployeeStatus};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     id: 1,
    ///     user_id: 10,
    ///     employee_code: "EMP-0001".to_string(),
    ///     name: "Sari Wulandari".to_string(),
    ///     email: "sari@example.com".to_string(),
    ///     phone: None,
    ///     department: "Finance".to_string(),
    ///     position: "Accountant".to_string(),
    ///     hire_date: NaiveDate::from_ymd_opt(2022, 2, 1).unwrap(),
    ///     basic_salary: Decimal::new(8_000_000, 0),
    ///     status: EmployeeStatus::Active,
    /// };
    /// assert!(employee.is_active());
    /// ```
    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }
}

/// Input for creating an employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEmployee {
    /// The user account to link.
    pub user_id: u64,
    /// The unique employee code.
    pub employee_code: String,
    /// Full name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Optional contact phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Department.
    pub department: String,
    /// Job position.
    pub position: String,
    /// Hire date.
    pub hire_date: NaiveDate,
    /// Monthly basic salary.
    pub basic_salary: Decimal,
}

/// Editable employee attributes.
///
/// The employee code and linked user account are fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    /// Full name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Optional contact phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Department.
    pub department: String,
    /// Job position.
    pub position: String,
    /// Hire date.
    pub hire_date: NaiveDate,
    /// Monthly basic salary.
    pub basic_salary: Decimal,
    /// Active or inactive.
    pub status: EmployeeStatus,
}
