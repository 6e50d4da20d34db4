//! Employee records and the HR dashboard.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::access::Capability;
use crate::calculation::{StatusBreakdown, count_statuses};
use crate::clock::Clock;
use crate::error::{HrError, HrResult};
use crate::models::{
    AttendanceRecord, Employee, EmployeeUpdate, NewEmployee, PayrollStatus, Period,
};
use crate::store::{AttendanceQuery, HrStore, PayrollQuery};

use super::payroll_book::{MAX_AMOUNT, check_amount};

/// Number of today's attendance rows shown on the dashboard.
pub const RECENT_ATTENDANCE_LIMIT: usize = 5;

/// Headline numbers for HR staff.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    /// Active employees.
    pub active_employees: usize,
    /// Attendance rows dated today.
    pub today_attendance: usize,
    /// Payroll records still in draft.
    pub draft_payrolls: usize,
    /// This month's attendance by status.
    pub monthly_attendance: StatusBreakdown,
    /// The latest of today's attendance rows.
    pub recent_attendance: Vec<AttendanceRecord>,
}

/// Manages employee records.
pub struct EmployeeDirectory {
    store: Arc<HrStore>,
    clock: Arc<dyn Clock>,
}

impl EmployeeDirectory {
    /// Creates a directory over `store`.
    pub fn new(store: Arc<HrStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Returns the employee linked to a user account, if any.
    pub fn linked_employee(&self, user_id: u64) -> Option<Employee> {
        self.store.employee_by_user(user_id)
    }

    /// Creates an active employee. Requires full access.
    pub fn create(&self, capability: &Capability, new: NewEmployee) -> HrResult<Employee> {
        capability.require_full("create employee")?;
        check_salary(new.basic_salary)?;

        let employee = self.store.insert_employee(new)?;
        info!(
            employee_id = employee.id,
            employee_code = %employee.employee_code,
            "Created employee"
        );
        Ok(employee)
    }

    /// Updates an employee's editable attributes. Requires full access.
    pub fn update(
        &self,
        capability: &Capability,
        employee_id: u64,
        update: EmployeeUpdate,
    ) -> HrResult<Employee> {
        capability.require_full("update employee")?;
        check_salary(update.basic_salary)?;

        let employee = self.store.update_employee(employee_id, update)?;
        info!(employee_id, status = ?employee.status, "Updated employee");
        Ok(employee)
    }

    /// Deletes an employee and everything they own. Requires full access.
    pub fn delete(&self, capability: &Capability, employee_id: u64) -> HrResult<Employee> {
        capability.require_full("delete employee")?;
        let employee = self.store.delete_employee(employee_id)?;
        info!(employee_id, "Deleted employee with attendance and payroll");
        Ok(employee)
    }

    /// Returns one employee; self-only callers may read only their own profile.
    pub fn get(&self, capability: &Capability, employee_id: u64) -> HrResult<Employee> {
        capability.require_view(employee_id, "view employee")?;
        self.store
            .employee(employee_id)
            .ok_or(HrError::EmployeeNotFound { employee_id })
    }

    /// Lists employees ordered by id. Requires full access.
    pub fn list(&self, capability: &Capability) -> HrResult<Vec<Employee>> {
        capability.require_full("list employees")?;
        Ok(self.store.employees())
    }

    /// Builds the HR dashboard for the clock's current date.
    pub fn dashboard(&self, capability: &Capability) -> HrResult<Dashboard> {
        capability.require_full("view dashboard")?;
        let today = self.clock.today();

        let mut todays = self.store.attendances(&AttendanceQuery {
            employee_id: None,
            date_from: Some(today),
            date_to: Some(today),
        });
        let today_attendance = todays.len();
        todays.truncate(RECENT_ATTENDANCE_LIMIT);

        let month = Period::of(today);
        let this_month = self.store.attendances(&AttendanceQuery {
            employee_id: None,
            date_from: month.first_day(),
            date_to: month.last_day(),
        });

        let draft_payrolls = self
            .store
            .payrolls(&PayrollQuery {
                status: Some(PayrollStatus::Draft),
                ..Default::default()
            })
            .len();

        Ok(Dashboard {
            active_employees: self.store.active_employees().len(),
            today_attendance,
            draft_payrolls,
            monthly_attendance: count_statuses(&this_month, month),
            recent_attendance: todays,
        })
    }
}

fn check_salary(basic_salary: Decimal) -> HrResult<()> {
    check_amount("basic_salary", basic_salary, MAX_AMOUNT)
}
