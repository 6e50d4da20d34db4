//! Batch payroll generation.
//!
//! [`PayrollGenerator::generate`] creates one draft payroll record per active
//! employee for a period, derived from their attendance:
//!
//! 1. Validate the period against the policy's year range.
//! 2. For each active employee, in ascending id order:
//!    - skip if a record already exists for the period
//!    - summarize attendance into total hours and working days
//!    - overtime = max(0, total hours − working days × standard hours per day)
//!    - phase one: overtime pay and gross salary, allowances zero
//!    - deductions = deduction rate × gross salary
//!    - phase two: net salary = gross salary − deductions
//!    - persist the draft record
//! 3. Report how many records were created.
//!
//! Re-running for the same period creates nothing new. Each employee's record
//! is inserted atomically; a failure part-way leaves earlier records intact.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::access::Capability;
use crate::calculation::{
    apply_deductions, calculate_gross, deduction_for, detect_monthly_overtime, round_hours,
    summarize_attendance,
};
use crate::config::PayrollPolicy;
use crate::error::{HrError, HrResult};
use crate::models::{Employee, NewPayroll, Period};
use crate::store::HrStore;

/// Result of a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOutcome {
    /// The period generated for.
    pub period: Period,
    /// Records newly created by this run.
    pub generated: u32,
    /// Active employees that already had a record.
    pub skipped: u32,
}

/// Generates monthly payroll for the whole active workforce.
pub struct PayrollGenerator {
    store: Arc<HrStore>,
    policy: PayrollPolicy,
}

impl PayrollGenerator {
    /// Creates a generator over `store` using `policy` rates.
    pub fn new(store: Arc<HrStore>, policy: PayrollPolicy) -> Self {
        Self { store, policy }
    }

    /// Generates draft payroll for every active employee lacking one for the period.
    ///
    /// Requires full access. Fails with [`HrError::InvalidPeriod`] when the
    /// year is outside the policy range or the month outside 1-12.
    pub fn generate(
        &self,
        capability: &Capability,
        year: i32,
        month: u32,
    ) -> HrResult<GenerationOutcome> {
        capability.require_full("generate payroll")?;
        let period = self.policy.period(year, month)?;

        let mut outcome = GenerationOutcome {
            period,
            generated: 0,
            skipped: 0,
        };

        for employee in self.store.active_employees() {
            if self.store.has_payroll(employee.id, period) {
                debug!(employee_id = employee.id, year, month, "Payroll exists, skipping");
                outcome.skipped += 1;
                continue;
            }

            let draft = self.draft_for(&employee, period);
            match self.store.insert_payroll(draft) {
                Ok(_) => outcome.generated += 1,
                Err(HrError::DuplicatePayrollPeriod { .. }) => {
                    debug!(
                        employee_id = employee.id,
                        year, month, "Payroll created concurrently, skipping"
                    );
                    outcome.skipped += 1;
                }
                Err(HrError::EmployeeNotFound { .. }) => {
                    debug!(employee_id = employee.id, "Employee removed during generation");
                }
                Err(err) => return Err(err),
            }
        }

        info!(
            year,
            month,
            generated = outcome.generated,
            skipped = outcome.skipped,
            "Payroll generation completed"
        );
        Ok(outcome)
    }

    /// Computes the draft payroll record for one employee without storing it.
    pub fn draft_for(&self, employee: &Employee, period: Period) -> NewPayroll {
        let records = self.store.attendance_in_period(employee.id, period);
        let summary = summarize_attendance(&records, employee.id, period);
        let overtime = detect_monthly_overtime(&summary, self.policy.standard_hours_per_day);
        let overtime_hours = round_hours(overtime.overtime_hours);

        let allowances = Decimal::ZERO;
        let gross = calculate_gross(
            employee.basic_salary,
            allowances,
            overtime_hours,
            self.policy.overtime_rate,
        );
        let deductions = deduction_for(gross.gross_salary, self.policy.deduction_rate);
        let breakdown = apply_deductions(gross, deductions);

        NewPayroll {
            employee_id: employee.id,
            period,
            basic_salary: employee.basic_salary,
            allowances,
            deductions,
            overtime_hours,
            overtime_rate: self.policy.overtime_rate,
            overtime_pay: breakdown.overtime_pay,
            gross_salary: breakdown.gross_salary,
            net_salary: breakdown.net_salary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AttendanceStatus, EmployeeStatus, EmployeeUpdate, NewAttendance, NewEmployee,
        PayrollStatus,
    };
    use crate::store::PayrollQuery;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn hire(store: &HrStore, user_id: u64, salary: &str) -> Employee {
        store
            .insert_employee(NewEmployee {
                user_id,
                employee_code: format!("EMP-{:04}", user_id),
                name: format!("Employee {}", user_id),
                email: format!("e{}@example.com", user_id),
                phone: None,
                department: "Operations".to_string(),
                position: "Staff".to_string(),
                hire_date: NaiveDate::from_ymd_opt(2021, 5, 3).unwrap(),
                basic_salary: dec(salary),
            })
            .unwrap()
    }

    fn attend(store: &HrStore, employee_id: u64, day: u32, hours: &str) {
        store
            .insert_attendance(NewAttendance {
                employee_id,
                date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
                check_in: None,
                check_out: None,
                total_hours: Some(dec(hours)),
                status: AttendanceStatus::Present,
                notes: None,
            })
            .unwrap();
    }

    fn generator(store: &Arc<HrStore>) -> PayrollGenerator {
        PayrollGenerator::new(Arc::clone(store), PayrollPolicy::default())
    }

    #[test]
    fn test_reference_month_with_overtime() {
        let store = Arc::new(HrStore::new());
        let employee = hire(&store, 1, "10000000");
        // 20 days, 180 hours in total.
        for day in 1..=20 {
            attend(&store, employee.id, day, "9");
        }

        let outcome = generator(&store).generate(&Capability::Full, 2025, 3).unwrap();
        assert_eq!(outcome.generated, 1);

        let record = store.payrolls(&PayrollQuery::default()).pop().unwrap();
        assert_eq!(record.overtime_hours, dec("20"));
        assert_eq!(record.overtime_rate, dec("25000"));
        assert_eq!(record.overtime_pay, dec("500000"));
        assert_eq!(record.gross_salary, dec("10500000"));
        assert_eq!(record.deductions, dec("525000"));
        assert_eq!(record.net_salary, dec("9975000"));
        assert_eq!(record.allowances, Decimal::ZERO);
        assert_eq!(record.status, PayrollStatus::Draft);
        assert_eq!(record.processed_at, None);
    }

    #[test]
    fn test_no_attendance_nets_ninety_five_percent() {
        let store = Arc::new(HrStore::new());
        hire(&store, 1, "7250000");

        generator(&store).generate(&Capability::Full, 2025, 3).unwrap();

        let record = store.payrolls(&PayrollQuery::default()).pop().unwrap();
        assert_eq!(record.overtime_hours, Decimal::ZERO);
        assert_eq!(record.overtime_pay, Decimal::ZERO);
        assert_eq!(record.net_salary, dec("6887500"));
    }

    #[test]
    fn test_second_run_generates_nothing() {
        let store = Arc::new(HrStore::new());
        hire(&store, 1, "5000000");
        hire(&store, 2, "6000000");
        let generator = generator(&store);

        let first = generator.generate(&Capability::Full, 2025, 3).unwrap();
        let before = store.payrolls(&PayrollQuery::default());
        let second = generator.generate(&Capability::Full, 2025, 3).unwrap();
        let after = store.payrolls(&PayrollQuery::default());

        assert_eq!(first.generated, 2);
        assert_eq!(second.generated, 0);
        assert_eq!(second.skipped, 2);
        assert_eq!(before, after);
    }

    #[test]
    fn test_skips_existing_and_inactive() {
        let store = Arc::new(HrStore::new());
        let existing = hire(&store, 1, "5000000");
        let inactive = hire(&store, 2, "5000000");
        let fresh = hire(&store, 3, "5000000");

        store
            .update_employee(
                inactive.id,
                EmployeeUpdate {
                    name: inactive.name.clone(),
                    email: inactive.email.clone(),
                    phone: None,
                    department: inactive.department.clone(),
                    position: inactive.position.clone(),
                    hire_date: inactive.hire_date,
                    basic_salary: inactive.basic_salary,
                    status: EmployeeStatus::Inactive,
                },
            )
            .unwrap();

        let generator = generator(&store);
        let period = Period::new(2025, 3).unwrap();
        store
            .insert_payroll(generator.draft_for(&existing, period))
            .unwrap();

        let outcome = generator.generate(&Capability::Full, 2025, 3).unwrap();
        assert_eq!(outcome.generated, 1);
        assert_eq!(outcome.skipped, 1);
        assert!(store.has_payroll(fresh.id, period));
        assert!(!store.has_payroll(inactive.id, period));
    }

    #[test]
    fn test_rejects_invalid_period() {
        let store = Arc::new(HrStore::new());
        hire(&store, 1, "5000000");
        let generator = generator(&store);

        for (year, month) in [(2019, 6), (2031, 1), (2025, 0), (2025, 13)] {
            assert_eq!(
                generator.generate(&Capability::Full, year, month),
                Err(HrError::InvalidPeriod { year, month })
            );
        }
        assert!(store.payrolls(&PayrollQuery::default()).is_empty());
    }

    #[test]
    fn test_requires_full_access() {
        let store = Arc::new(HrStore::new());
        let employee = hire(&store, 1, "5000000");

        let result = generator(&store).generate(
            &Capability::SelfOnly {
                employee_id: employee.id,
            },
            2025,
            3,
        );
        assert!(matches!(result, Err(HrError::Forbidden { .. })));
    }

    #[test]
    fn test_overtime_only_counts_target_month() {
        let store = Arc::new(HrStore::new());
        let employee = hire(&store, 1, "8000000");
        attend(&store, employee.id, 3, "10.5");
        store
            .insert_attendance(NewAttendance {
                employee_id: employee.id,
                date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
                check_in: None,
                check_out: None,
                total_hours: Some(dec("12")),
                status: AttendanceStatus::Present,
                notes: None,
            })
            .unwrap();

        let draft = generator(&store).draft_for(&employee, Period::new(2025, 3).unwrap());
        assert_eq!(draft.overtime_hours, dec("2.5"));
        assert_eq!(draft.overtime_pay, dec("62500"));
        assert_eq!(draft.gross_salary, dec("8062500"));
        assert_eq!(draft.deductions, dec("403125"));
        assert_eq!(draft.net_salary, dec("7659375"));
    }
}
