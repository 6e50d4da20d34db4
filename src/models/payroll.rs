//! Payroll record model.
//!
//! One record exists per (employee, year, month). Monetary fields carry two
//! decimal places.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Period;

/// Lifecycle stage of a payroll record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayrollStatus {
    /// Created, still editable.
    #[default]
    Draft,
    /// Approved for payment; stamps `processed_at`.
    Processed,
    /// Paid out; no further changes.
    Paid,
}

/// A monthly payroll line for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// Storage identifier.
    pub id: u64,
    /// The employee this record belongs to.
    pub employee_id: u64,
    /// Period year.
    pub year: i32,
    /// Period month (1-12).
    pub month: u32,
    /// Monthly basic salary.
    pub basic_salary: Decimal,
    /// Additional allowances.
    pub allowances: Decimal,
    /// Tax, insurance and other deductions.
    pub deductions: Decimal,
    /// Hours worked beyond the standard hours for the period.
    pub overtime_hours: Decimal,
    /// Pay per overtime hour.
    pub overtime_rate: Decimal,
    /// overtime_hours × overtime_rate.
    pub overtime_pay: Decimal,
    /// basic_salary + allowances + overtime_pay.
    pub gross_salary: Decimal,
    /// gross_salary − deductions.
    pub net_salary: Decimal,
    /// Lifecycle stage.
    pub status: PayrollStatus,
    /// When the record entered `processed`.
    #[serde(default)]
    pub processed_at: Option<NaiveDateTime>,
}

impl PayrollRecord {
    /// Returns the period this record covers.
    pub fn period(&self) -> Period {
        Period {
            year: self.year,
            month: self.month,
        }
    }

    /// Returns true once the record has been paid.
    pub fn is_finalized(&self) -> bool {
        self.status == PayrollStatus::Paid
    }
}

/// Input for inserting a payroll record; derived fields are already computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPayroll {
    /// The employee.
    pub employee_id: u64,
    /// The pay period.
    pub period: Period,
    /// Monthly basic salary.
    pub basic_salary: Decimal,
    /// Additional allowances.
    pub allowances: Decimal,
    /// Deductions.
    pub deductions: Decimal,
    /// Overtime hours.
    pub overtime_hours: Decimal,
    /// Overtime rate.
    pub overtime_rate: Decimal,
    /// Overtime pay.
    pub overtime_pay: Decimal,
    /// Gross salary.
    pub gross_salary: Decimal,
    /// Net salary.
    pub net_salary: Decimal,
}
