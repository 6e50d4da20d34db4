//! Manual payroll entries.
//!
//! HR staff may create payroll records with explicit allowances, deductions
//! and overtime, and amend them until they are paid. Derived amounts always
//! come from the payroll calculator, never from the caller.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::access::Capability;
use crate::calculation::{calculate_payroll, round_currency, round_hours};
use crate::clock::Clock;
use crate::config::PayrollPolicy;
use crate::error::{HrError, HrResult};
use crate::models::{NewPayroll, PayrollRecord, PayrollStatus};
use crate::store::{HrStore, PayrollQuery};

/// A manually entered payroll line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollEntry {
    /// The employee.
    pub employee_id: u64,
    /// Period year.
    pub year: i32,
    /// Period month.
    pub month: u32,
    /// Monthly basic salary.
    pub basic_salary: Decimal,
    /// Additional allowances.
    #[serde(default)]
    pub allowances: Decimal,
    /// Deductions.
    #[serde(default)]
    pub deductions: Decimal,
    /// Overtime hours.
    #[serde(default)]
    pub overtime_hours: Decimal,
    /// Pay per overtime hour.
    #[serde(default)]
    pub overtime_rate: Decimal,
}

/// Changes to an existing payroll line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollAmendment {
    /// Monthly basic salary.
    pub basic_salary: Decimal,
    /// Additional allowances.
    #[serde(default)]
    pub allowances: Decimal,
    /// Deductions.
    #[serde(default)]
    pub deductions: Decimal,
    /// Overtime hours.
    #[serde(default)]
    pub overtime_hours: Decimal,
    /// Pay per overtime hour.
    #[serde(default)]
    pub overtime_rate: Decimal,
    /// New lifecycle stage.
    pub status: PayrollStatus,
}

/// Largest salary-sized amount a payroll line holds.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

/// Largest overtime hours a payroll line holds.
pub const MAX_OVERTIME_HOURS: Decimal = Decimal::from_parts(9_999, 0, 0, false, 2);

/// Largest overtime rate a payroll line holds.
pub const MAX_OVERTIME_RATE: Decimal = Decimal::from_parts(99_999_999, 0, 0, false, 2);

/// Amounts shared by entries and amendments.
struct Amounts {
    basic_salary: Decimal,
    allowances: Decimal,
    deductions: Decimal,
    overtime_hours: Decimal,
    overtime_rate: Decimal,
}

impl Amounts {
    fn validated(self) -> HrResult<Self> {
        let fields = [
            ("basic_salary", self.basic_salary, MAX_AMOUNT),
            ("allowances", self.allowances, MAX_AMOUNT),
            ("deductions", self.deductions, MAX_AMOUNT),
            ("overtime_hours", self.overtime_hours, MAX_OVERTIME_HOURS),
            ("overtime_rate", self.overtime_rate, MAX_OVERTIME_RATE),
        ];
        for (field, value, max) in fields {
            check_amount(field, value, max)?;
        }
        Ok(Self {
            basic_salary: round_currency(self.basic_salary),
            allowances: round_currency(self.allowances),
            deductions: round_currency(self.deductions),
            overtime_hours: round_hours(self.overtime_hours),
            overtime_rate: round_currency(self.overtime_rate),
        })
    }
}

/// Rejects a negative `value` or one above `max`.
pub(crate) fn check_amount(field: &str, value: Decimal, max: Decimal) -> HrResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(HrError::InvalidAmount {
            field: field.to_string(),
            message: "must not be negative".to_string(),
        });
    }
    if value > max {
        return Err(HrError::InvalidAmount {
            field: field.to_string(),
            message: format!("must not exceed {}", max),
        });
    }
    Ok(())
}

/// Creates, amends and lists payroll records.
pub struct PayrollBook {
    store: Arc<HrStore>,
    clock: Arc<dyn Clock>,
    policy: PayrollPolicy,
}

impl PayrollBook {
    /// Creates a payroll book over `store`.
    pub fn new(store: Arc<HrStore>, clock: Arc<dyn Clock>, policy: PayrollPolicy) -> Self {
        Self {
            store,
            clock,
            policy,
        }
    }

    /// Creates a draft payroll record from a manual entry.
    ///
    /// Requires full access. The period is validated the same way as for
    /// generation, and a second record for the same employee and period is
    /// rejected with [`HrError::DuplicatePayrollPeriod`].
    pub fn create(&self, capability: &Capability, entry: PayrollEntry) -> HrResult<PayrollRecord> {
        capability.require_full("create payroll")?;
        let period = self.policy.period(entry.year, entry.month)?;
        let amounts = Amounts {
            basic_salary: entry.basic_salary,
            allowances: entry.allowances,
            deductions: entry.deductions,
            overtime_hours: entry.overtime_hours,
            overtime_rate: entry.overtime_rate,
        }
        .validated()?;

        let breakdown = calculate_payroll(
            amounts.basic_salary,
            amounts.allowances,
            amounts.deductions,
            amounts.overtime_hours,
            amounts.overtime_rate,
        );

        let record = self.store.insert_payroll(NewPayroll {
            employee_id: entry.employee_id,
            period,
            basic_salary: amounts.basic_salary,
            allowances: amounts.allowances,
            deductions: amounts.deductions,
            overtime_hours: amounts.overtime_hours,
            overtime_rate: amounts.overtime_rate,
            overtime_pay: breakdown.overtime_pay,
            gross_salary: breakdown.gross_salary,
            net_salary: breakdown.net_salary,
        })?;

        info!(
            payroll_id = record.id,
            employee_id = record.employee_id,
            year = record.year,
            month = record.month,
            "Created payroll"
        );
        Ok(record)
    }

    /// Amends a payroll record, recomputing its derived amounts.
    ///
    /// Moving into processed stamps `processed_at` with the current time. Staying
    /// processed or moving on to paid keeps the existing stamp; returning to
    /// draft clears it. Paid records are final and fail with
    /// [`HrError::PayrollFinalized`].
    pub fn update(
        &self,
        capability: &Capability,
        payroll_id: u64,
        amendment: PayrollAmendment,
    ) -> HrResult<PayrollRecord> {
        capability.require_full("update payroll")?;
        let amounts = Amounts {
            basic_salary: amendment.basic_salary,
            allowances: amendment.allowances,
            deductions: amendment.deductions,
            overtime_hours: amendment.overtime_hours,
            overtime_rate: amendment.overtime_rate,
        }
        .validated()?;
        let status = amendment.status;
        let now = self.clock.now();

        let record = self.store.modify_payroll(payroll_id, |record| {
            if record.is_finalized() {
                return Err(HrError::PayrollFinalized { payroll_id });
            }

            let breakdown = calculate_payroll(
                amounts.basic_salary,
                amounts.allowances,
                amounts.deductions,
                amounts.overtime_hours,
                amounts.overtime_rate,
            );
            record.basic_salary = amounts.basic_salary;
            record.allowances = amounts.allowances;
            record.deductions = amounts.deductions;
            record.overtime_hours = amounts.overtime_hours;
            record.overtime_rate = amounts.overtime_rate;
            record.overtime_pay = breakdown.overtime_pay;
            record.gross_salary = breakdown.gross_salary;
            record.net_salary = breakdown.net_salary;

            record.processed_at = match (record.status, status) {
                (PayrollStatus::Processed, PayrollStatus::Processed) => record.processed_at,
                (_, PayrollStatus::Processed) => Some(now),
                (_, PayrollStatus::Paid) => record.processed_at,
                (_, PayrollStatus::Draft) => None,
            };
            record.status = status;
            Ok(())
        })?;

        info!(
            payroll_id,
            status = ?record.status,
            net_salary = %record.net_salary,
            "Updated payroll"
        );
        Ok(record)
    }

    /// Lists payroll visible to `capability`, newest period first.
    pub fn list(&self, capability: &Capability, query: PayrollQuery) -> Vec<PayrollRecord> {
        let query = PayrollQuery {
            employee_id: capability.scope(query.employee_id),
            ..query
        };
        self.store.payrolls(&query)
    }

    /// Returns a single payroll record.
    pub fn get(&self, capability: &Capability, payroll_id: u64) -> HrResult<PayrollRecord> {
        let record = self
            .store
            .payroll(payroll_id)
            .ok_or(HrError::PayrollNotFound { payroll_id })?;
        capability.require_view(record.employee_id, "view payroll record")?;
        Ok(record)
    }
}
