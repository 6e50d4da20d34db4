//! Payroll line arithmetic.
//!
//! Turns basic salary, allowances, deductions and overtime into overtime pay,
//! gross salary and net salary. The calculation runs in two explicit phases:
//! [`calculate_gross`] produces overtime pay and gross salary, then
//! [`apply_deductions`] produces the net salary. Generated payroll derives its
//! deductions from the phase-one gross via [`deduction_for`] before running
//! phase two.
//!
//! Inputs are expected to be non-negative; callers validate. Net salary is
//! not clamped and goes negative when deductions exceed gross.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::rounding::round_currency;

/// Phase one output: overtime pay and gross salary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrossBreakdown {
    /// overtime_hours × overtime_rate, rounded to currency precision.
    pub overtime_pay: Decimal,
    /// basic_salary + allowances + overtime_pay.
    pub gross_salary: Decimal,
}

/// The derived amounts of a payroll line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollBreakdown {
    /// overtime_hours × overtime_rate, rounded to currency precision.
    pub overtime_pay: Decimal,
    /// basic_salary + allowances + overtime_pay.
    pub gross_salary: Decimal,
    /// gross_salary − deductions.
    pub net_salary: Decimal,
}

/// Phase one: computes overtime pay and gross salary.
pub fn calculate_gross(
    basic_salary: Decimal,
    allowances: Decimal,
    overtime_hours: Decimal,
    overtime_rate: Decimal,
) -> GrossBreakdown {
    let overtime_pay = round_currency(overtime_hours * overtime_rate);
    let gross_salary = round_currency(basic_salary + allowances + overtime_pay);

    GrossBreakdown {
        overtime_pay,
        gross_salary,
    }
}

/// Phase two: subtracts deductions from the gross salary.
pub fn apply_deductions(gross: GrossBreakdown, deductions: Decimal) -> PayrollBreakdown {
    PayrollBreakdown {
        overtime_pay: gross.overtime_pay,
        gross_salary: gross.gross_salary,
        net_salary: round_currency(gross.gross_salary - deductions),
    }
}

/// Computes policy deductions as a fraction of gross salary.
///
/// # Examples
///
/// ```
/// use hr_payroll::calculation::deduction_for;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let deduction = deduction_for(Decimal::from(10_500_000), Decimal::from_str("0.05").unwrap());
/// assert_eq!(deduction, Decimal::from(525_000));
/// ```
pub fn deduction_for(gross_salary: Decimal, deduction_rate: Decimal) -> Decimal {
    round_currency(gross_salary * deduction_rate)
}

/// Computes overtime pay, gross salary and net salary in one call.
///
/// # Examples
///
/// ```
/// use hr_payroll::calculation::calculate_payroll;
/// use rust_decimal::Decimal;
///
/// let breakdown = calculate_payroll(
///     Decimal::from(10_000_000),
///     Decimal::ZERO,
///     Decimal::from(525_000),
///     Decimal::from(20),
///     Decimal::from(25_000),
/// );
/// assert_eq!(breakdown.overtime_pay, Decimal::from(500_000));
/// assert_eq!(breakdown.gross_salary, Decimal::from(10_500_000));
/// assert_eq!(breakdown.net_salary, Decimal::from(9_975_000));
/// ```
pub fn calculate_payroll(
    basic_salary: Decimal,
    allowances: Decimal,
    deductions: Decimal,
    overtime_hours: Decimal,
    overtime_rate: Decimal,
) -> PayrollBreakdown {
    let gross = calculate_gross(basic_salary, allowances, overtime_hours, overtime_rate);
    apply_deductions(gross, deductions)
}
