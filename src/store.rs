//! In-process storage for employees, attendance and payroll.
//!
//! [`HrStore`] holds the three tables behind a single lock together with
//! their natural-key unique indexes:
//!
//! - employees: unique employee code, unique linked user account
//! - attendance: unique (employee, date)
//! - payroll: unique (employee, year, month)
//!
//! Every uniqueness check runs under the same write lock as the insert it
//! guards, so two concurrent check-ins or two concurrent generation runs for
//! the same key cannot both succeed. The loser receives the matching
//! duplicate error. Deleting an employee cascades to their attendance and
//! payroll records.

use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{HrError, HrResult};
use crate::models::{
    AttendanceRecord, Employee, EmployeeStatus, EmployeeUpdate, NewAttendance, NewEmployee,
    NewPayroll, PayrollRecord, PayrollStatus, Period,
};

/// Filters for listing attendance records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct AttendanceQuery {
    /// Only records of this employee.
    pub employee_id: Option<u64>,
    /// Only records on or after this date.
    pub date_from: Option<NaiveDate>,
    /// Only records on or before this date.
    pub date_to: Option<NaiveDate>,
}

impl AttendanceQuery {
    fn matches(&self, record: &AttendanceRecord) -> bool {
        self.employee_id.is_none_or(|id| record.employee_id == id)
            && self.date_from.is_none_or(|from| record.date >= from)
            && self.date_to.is_none_or(|to| record.date <= to)
    }
}

/// Filters for listing payroll records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PayrollQuery {
    /// Only records of this employee.
    pub employee_id: Option<u64>,
    /// Only records for this year.
    pub year: Option<i32>,
    /// Only records for this month.
    pub month: Option<u32>,
    /// Only records in this lifecycle stage.
    pub status: Option<PayrollStatus>,
}

impl PayrollQuery {
    fn matches(&self, record: &PayrollRecord) -> bool {
        self.employee_id.is_none_or(|id| record.employee_id == id)
            && self.year.is_none_or(|year| record.year == year)
            && self.month.is_none_or(|month| record.month == month)
            && self.status.is_none_or(|status| record.status == status)
    }
}

#[derive(Debug, Default)]
struct Tables {
    next_employee_id: u64,
    next_attendance_id: u64,
    next_payroll_id: u64,

    employees: BTreeMap<u64, Employee>,
    attendance: BTreeMap<u64, AttendanceRecord>,
    payrolls: BTreeMap<u64, PayrollRecord>,

    employee_codes: HashMap<String, u64>,
    employee_users: HashMap<u64, u64>,
    attendance_keys: HashMap<(u64, NaiveDate), u64>,
    payroll_keys: HashMap<(u64, Period), u64>,
}

impl Tables {
    fn require_employee(&self, employee_id: u64) -> HrResult<()> {
        if self.employees.contains_key(&employee_id) {
            Ok(())
        } else {
            Err(HrError::EmployeeNotFound { employee_id })
        }
    }
}

/// Shared storage for all HR records.
#[derive(Debug, Default)]
pub struct HrStore {
    tables: RwLock<Tables>,
}

impl HrStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }

    // ---------------------------------------------------------------------
    // Employees
    // ---------------------------------------------------------------------

    /// Inserts an employee with status active.
    pub fn insert_employee(&self, new: NewEmployee) -> HrResult<Employee> {
        let mut tables = self.write();

        if tables.employee_codes.contains_key(&new.employee_code) {
            return Err(HrError::DuplicateEmployeeCode {
                code: new.employee_code,
            });
        }
        if tables.employee_users.contains_key(&new.user_id) {
            return Err(HrError::UserAlreadyLinked {
                user_id: new.user_id,
            });
        }

        tables.next_employee_id += 1;
        let employee = Employee {
            id: tables.next_employee_id,
            user_id: new.user_id,
            employee_code: new.employee_code,
            name: new.name,
            email: new.email,
            phone: new.phone,
            department: new.department,
            position: new.position,
            hire_date: new.hire_date,
            basic_salary: new.basic_salary,
            status: EmployeeStatus::Active,
        };

        tables
            .employee_codes
            .insert(employee.employee_code.clone(), employee.id);
        tables.employee_users.insert(employee.user_id, employee.id);
        tables.employees.insert(employee.id, employee.clone());
        Ok(employee)
    }

    /// Replaces the editable attributes of an employee.
    pub fn update_employee(&self, employee_id: u64, update: EmployeeUpdate) -> HrResult<Employee> {
        let mut tables = self.write();
        let employee = tables
            .employees
            .get_mut(&employee_id)
            .ok_or(HrError::EmployeeNotFound { employee_id })?;

        employee.name = update.name;
        employee.email = update.email;
        employee.phone = update.phone;
        employee.department = update.department;
        employee.position = update.position;
        employee.hire_date = update.hire_date;
        employee.basic_salary = update.basic_salary;
        employee.status = update.status;
        Ok(employee.clone())
    }

    /// Deletes an employee together with their attendance and payroll records.
    pub fn delete_employee(&self, employee_id: u64) -> HrResult<Employee> {
        let mut tables = self.write();
        let employee = tables
            .employees
            .remove(&employee_id)
            .ok_or(HrError::EmployeeNotFound { employee_id })?;

        tables.employee_codes.remove(&employee.employee_code);
        tables.employee_users.remove(&employee.user_id);
        tables.attendance.retain(|_, r| r.employee_id != employee_id);
        tables.attendance_keys.retain(|(id, _), _| *id != employee_id);
        tables.payrolls.retain(|_, r| r.employee_id != employee_id);
        tables.payroll_keys.retain(|(id, _), _| *id != employee_id);
        Ok(employee)
    }

    /// Returns an employee by id.
    pub fn employee(&self, employee_id: u64) -> Option<Employee> {
        self.read().employees.get(&employee_id).cloned()
    }

    /// Returns the employee linked to a user account.
    pub fn employee_by_user(&self, user_id: u64) -> Option<Employee> {
        let tables = self.read();
        let id = tables.employee_users.get(&user_id)?;
        tables.employees.get(id).cloned()
    }

    /// Returns all employees ordered by id.
    pub fn employees(&self) -> Vec<Employee> {
        self.read().employees.values().cloned().collect()
    }

    /// Returns active employees ordered by id.
    pub fn active_employees(&self) -> Vec<Employee> {
        self.read()
            .employees
            .values()
            .filter(|e| e.is_active())
            .cloned()
            .collect()
    }

    // ---------------------------------------------------------------------
    // Attendance
    // ---------------------------------------------------------------------

    /// Inserts an attendance record, enforcing one record per (employee, date).
    pub fn insert_attendance(&self, new: NewAttendance) -> HrResult<AttendanceRecord> {
        let mut tables = self.write();
        tables.require_employee(new.employee_id)?;

        let key = (new.employee_id, new.date);
        if tables.attendance_keys.contains_key(&key) {
            return Err(HrError::DuplicateAttendance {
                employee_id: new.employee_id,
                date: new.date,
            });
        }

        tables.next_attendance_id += 1;
        let record = AttendanceRecord {
            id: tables.next_attendance_id,
            employee_id: new.employee_id,
            date: new.date,
            check_in: new.check_in,
            check_out: new.check_out,
            total_hours: new.total_hours,
            status: new.status,
            notes: new.notes,
        };

        tables.attendance_keys.insert(key, record.id);
        tables.attendance.insert(record.id, record.clone());
        Ok(record)
    }

    /// Applies `change` to the record for (employee, date) under the write lock.
    ///
    /// Returns `Ok(None)` when no such record exists. The change is committed
    /// only if `change` succeeds; the record's id, employee and date are kept.
    pub fn modify_attendance<F>(
        &self,
        employee_id: u64,
        date: NaiveDate,
        change: F,
    ) -> HrResult<Option<AttendanceRecord>>
    where
        F: FnOnce(&mut AttendanceRecord) -> HrResult<()>,
    {
        let mut tables = self.write();
        let Some(id) = tables.attendance_keys.get(&(employee_id, date)).copied() else {
            return Ok(None);
        };
        let Some(current) = tables.attendance.get(&id) else {
            return Ok(None);
        };

        let mut updated = current.clone();
        change(&mut updated)?;
        updated.id = id;
        updated.employee_id = employee_id;
        updated.date = date;

        tables.attendance.insert(id, updated.clone());
        Ok(Some(updated))
    }

    /// Returns an attendance record by id.
    pub fn attendance(&self, attendance_id: u64) -> Option<AttendanceRecord> {
        self.read().attendance.get(&attendance_id).cloned()
    }

    /// Returns the record for (employee, date).
    pub fn attendance_on(&self, employee_id: u64, date: NaiveDate) -> Option<AttendanceRecord> {
        let tables = self.read();
        let id = tables.attendance_keys.get(&(employee_id, date))?;
        tables.attendance.get(id).cloned()
    }

    /// Returns matching records, newest date first.
    pub fn attendances(&self, query: &AttendanceQuery) -> Vec<AttendanceRecord> {
        let mut records: Vec<AttendanceRecord> = self
            .read()
            .attendance
            .values()
            .filter(|r| query.matches(r))
            .cloned()
            .collect();
        records.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        records
    }

    /// Returns an employee's records dated within `period`.
    pub fn attendance_in_period(&self, employee_id: u64, period: Period) -> Vec<AttendanceRecord> {
        self.read()
            .attendance
            .values()
            .filter(|r| r.employee_id == employee_id && period.contains_date(r.date))
            .cloned()
            .collect()
    }

    // ---------------------------------------------------------------------
    // Payroll
    // ---------------------------------------------------------------------

    /// Inserts a draft payroll record, enforcing one record per (employee, period).
    pub fn insert_payroll(&self, new: NewPayroll) -> HrResult<PayrollRecord> {
        let mut tables = self.write();
        tables.require_employee(new.employee_id)?;

        let key = (new.employee_id, new.period);
        if tables.payroll_keys.contains_key(&key) {
            return Err(HrError::DuplicatePayrollPeriod {
                employee_id: new.employee_id,
                year: new.period.year,
                month: new.period.month,
            });
        }

        tables.next_payroll_id += 1;
        let record = PayrollRecord {
            id: tables.next_payroll_id,
            employee_id: new.employee_id,
            year: new.period.year,
            month: new.period.month,
            basic_salary: new.basic_salary,
            allowances: new.allowances,
            deductions: new.deductions,
            overtime_hours: new.overtime_hours,
            overtime_rate: new.overtime_rate,
            overtime_pay: new.overtime_pay,
            gross_salary: new.gross_salary,
            net_salary: new.net_salary,
            status: PayrollStatus::Draft,
            processed_at: None,
        };

        tables.payroll_keys.insert(key, record.id);
        tables.payrolls.insert(record.id, record.clone());
        Ok(record)
    }

    /// Applies `change` to a payroll record under the write lock.
    ///
    /// The change is committed only if `change` succeeds; the record's id,
    /// employee and period are kept.
    pub fn modify_payroll<F>(&self, payroll_id: u64, change: F) -> HrResult<PayrollRecord>
    where
        F: FnOnce(&mut PayrollRecord) -> HrResult<()>,
    {
        let mut tables = self.write();
        let current = tables
            .payrolls
            .get(&payroll_id)
            .ok_or(HrError::PayrollNotFound { payroll_id })?;

        let mut updated = current.clone();
        change(&mut updated)?;
        updated.id = current.id;
        updated.employee_id = current.employee_id;
        updated.year = current.year;
        updated.month = current.month;

        tables.payrolls.insert(payroll_id, updated.clone());
        Ok(updated)
    }

    /// Returns a payroll record by id.
    pub fn payroll(&self, payroll_id: u64) -> Option<PayrollRecord> {
        self.read().payrolls.get(&payroll_id).cloned()
    }

    /// Returns true if the employee already has a record for `period`.
    pub fn has_payroll(&self, employee_id: u64, period: Period) -> bool {
        self.read().payroll_keys.contains_key(&(employee_id, period))
    }

    /// Returns matching records, newest period first.
    pub fn payrolls(&self, query: &PayrollQuery) -> Vec<PayrollRecord> {
        let mut records: Vec<PayrollRecord> = self
            .read()
            .payrolls
            .values()
            .filter(|r| query.matches(r))
            .cloned()
            .collect();
        records.sort_by(|a, b| {
            b.period()
                .cmp(&a.period())
                .then(a.employee_id.cmp(&b.employee_id))
        });
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AttendanceStatus;
    use chrono::NaiveTime;
    use rust_decimal::Decimal;
    use std::sync::Arc;
    use std::thread;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn new_employee(user_id: u64, code: &str) -> NewEmployee {
        NewEmployee {
            user_id,
            employee_code: code.to_string(),
            name: format!("Employee {}", code),
            email: format!("{}@example.com", code.to_lowercase()),
            phone: None,
            department: "Engineering".to_string(),
            position: "Engineer".to_string(),
            hire_date: d("2023-01-02"),
            basic_salary: Decimal::from(10_000_000),
        }
    }

    fn new_attendance(employee_id: u64, date: &str) -> NewAttendance {
        NewAttendance {
            employee_id,
            date: d(date),
            check_in: NaiveTime::from_hms_opt(8, 0, 0),
            check_out: None,
            total_hours: None,
            status: AttendanceStatus::Present,
            notes: None,
        }
    }

    fn new_payroll(employee_id: u64, year: i32, month: u32) -> NewPayroll {
        NewPayroll {
            employee_id,
            period: Period::new(year, month).unwrap(),
            basic_salary: Decimal::from(10_000_000),
            allowances: Decimal::ZERO,
            deductions: Decimal::from(500_000),
            overtime_hours: Decimal::ZERO,
            overtime_rate: Decimal::from(25_000),
            overtime_pay: Decimal::ZERO,
            gross_salary: Decimal::from(10_000_000),
            net_salary: Decimal::from(9_500_000),
        }
    }

    #[test]
    fn test_employee_code_and_user_are_unique() {
        let store = HrStore::new();
        let first = store.insert_employee(new_employee(1, "EMP-1")).unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(first.status, EmployeeStatus::Active);

        assert_eq!(
            store.insert_employee(new_employee(2, "EMP-1")),
            Err(HrError::DuplicateEmployeeCode {
                code: "EMP-1".to_string()
            })
        );
        assert_eq!(
            store.insert_employee(new_employee(1, "EMP-2")),
            Err(HrError::UserAlreadyLinked { user_id: 1 })
        );
        assert_eq!(store.employees().len(), 1);
        assert_eq!(store.employee_by_user(1).map(|e| e.id), Some(1));
    }

    #[test]
    fn test_attendance_unique_per_employee_and_date() {
        let store = HrStore::new();
        let employee = store.insert_employee(new_employee(1, "EMP-1")).unwrap();

        store
            .insert_attendance(new_attendance(employee.id, "2025-05-05"))
            .unwrap();
        let err = store
            .insert_attendance(new_attendance(employee.id, "2025-05-05"))
            .unwrap_err();
        assert_eq!(
            err,
            HrError::DuplicateAttendance {
                employee_id: employee.id,
                date: d("2025-05-05")
            }
        );
        assert!(
            store
                .insert_attendance(new_attendance(employee.id, "2025-05-06"))
                .is_ok()
        );
    }

    #[test]
    fn test_attendance_requires_employee() {
        let store = HrStore::new();
        assert_eq!(
            store.insert_attendance(new_attendance(99, "2025-05-05")),
            Err(HrError::EmployeeNotFound { employee_id: 99 })
        );
    }

    #[test]
    fn test_modify_attendance_commits_only_on_success() {
        let store = HrStore::new();
        let employee = store.insert_employee(new_employee(1, "EMP-1")).unwrap();
        store
            .insert_attendance(new_attendance(employee.id, "2025-05-05"))
            .unwrap();

        let failed = store.modify_attendance(employee.id, d("2025-05-05"), |r| {
            r.notes = Some("changed".to_string());
            Err(HrError::AlreadyCheckedOut {
                employee_id: r.employee_id,
                date: r.date,
            })
        });
        assert!(failed.is_err());
        assert_eq!(
            store.attendance_on(employee.id, d("2025-05-05")).unwrap().notes,
            None
        );

        let updated = store
            .modify_attendance(employee.id, d("2025-05-05"), |r| {
                r.notes = Some("remote".to_string());
                r.date = d("2030-01-01");
                Ok(())
            })
            .unwrap()
            .unwrap();
        assert_eq!(updated.notes.as_deref(), Some("remote"));
        assert_eq!(updated.date, d("2025-05-05"));

        let missing = store
            .modify_attendance(employee.id, d("2025-05-07"), |_| Ok(()))
            .unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_payroll_unique_per_period() {
        let store = HrStore::new();
        let employee = store.insert_employee(new_employee(1, "EMP-1")).unwrap();
        let record = store.insert_payroll(new_payroll(employee.id, 2025, 6)).unwrap();
        assert_eq!(record.status, PayrollStatus::Draft);
        assert!(store.has_payroll(employee.id, Period::new(2025, 6).unwrap()));

        assert_eq!(
            store.insert_payroll(new_payroll(employee.id, 2025, 6)),
            Err(HrError::DuplicatePayrollPeriod {
                employee_id: employee.id,
                year: 2025,
                month: 6
            })
        );
    }

    #[test]
    fn test_concurrent_payroll_inserts_create_one_record() {
        let store = Arc::new(HrStore::new());
        let employee_id = store.insert_employee(new_employee(1, "EMP-1")).unwrap().id;

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.insert_payroll(new_payroll(employee_id, 2025, 6)).is_ok())
            })
            .collect();
        let created = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(created, 1);
        assert_eq!(store.payrolls(&PayrollQuery::default()).len(), 1);
    }

    #[test]
    fn test_delete_employee_cascades() {
        let store = HrStore::new();
        let keep = store.insert_employee(new_employee(1, "EMP-1")).unwrap();
        let gone = store.insert_employee(new_employee(2, "EMP-2")).unwrap();

        store.insert_attendance(new_attendance(keep.id, "2025-05-05")).unwrap();
        store.insert_attendance(new_attendance(gone.id, "2025-05-05")).unwrap();
        store.insert_payroll(new_payroll(keep.id, 2025, 5)).unwrap();
        store.insert_payroll(new_payroll(gone.id, 2025, 5)).unwrap();

        store.delete_employee(gone.id).unwrap();

        assert!(store.employee(gone.id).is_none());
        assert_eq!(store.attendances(&AttendanceQuery::default()).len(), 1);
        assert_eq!(store.payrolls(&PayrollQuery::default()).len(), 1);
        assert!(!store.has_payroll(gone.id, Period::new(2025, 5).unwrap()));

        // Code, user and natural keys are free again.
        let again = store.insert_employee(new_employee(2, "EMP-2")).unwrap();
        assert!(store.insert_attendance(new_attendance(again.id, "2025-05-05")).is_ok());
        assert_eq!(
            store.delete_employee(gone.id),
            Err(HrError::EmployeeNotFound { employee_id: gone.id })
        );
    }

    #[test]
    fn test_attendance_listing_filters_and_order() {
        let store = HrStore::new();
        let a = store.insert_employee(new_employee(1, "EMP-1")).unwrap();
        let b = store.insert_employee(new_employee(2, "EMP-2")).unwrap();
        for date in ["2025-05-01", "2025-05-03", "2025-05-02"] {
            store.insert_attendance(new_attendance(a.id, date)).unwrap();
        }
        store.insert_attendance(new_attendance(b.id, "2025-05-02")).unwrap();

        let all_a = store.attendances(&AttendanceQuery {
            employee_id: Some(a.id),
            ..Default::default()
        });
        let dates: Vec<NaiveDate> = all_a.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![d("2025-05-03"), d("2025-05-02"), d("2025-05-01")]);

        let ranged = store.attendances(&AttendanceQuery {
            employee_id: None,
            date_from: Some(d("2025-05-02")),
            date_to: Some(d("2025-05-02")),
        });
        assert_eq!(ranged.len(), 2);
    }

    #[test]
    fn test_payroll_listing_newest_period_first() {
        let store = HrStore::new();
        let a = store.insert_employee(new_employee(1, "EMP-1")).unwrap();
        store.insert_payroll(new_payroll(a.id, 2024, 12)).unwrap();
        store.insert_payroll(new_payroll(a.id, 2025, 2)).unwrap();
        store.insert_payroll(new_payroll(a.id, 2025, 1)).unwrap();

        let months: Vec<(i32, u32)> = store
            .payrolls(&PayrollQuery::default())
            .iter()
            .map(|r| (r.year, r.month))
            .collect();
        assert_eq!(months, vec![(2025, 2), (2025, 1), (2024, 12)]);

        let filtered = store.payrolls(&PayrollQuery {
            year: Some(2025),
            month: Some(1),
            ..Default::default()
        });
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn test_modify_payroll_keeps_key() {
        let store = HrStore::new();
        let a = store.insert_employee(new_employee(1, "EMP-1")).unwrap();
        let record = store.insert_payroll(new_payroll(a.id, 2025, 3)).unwrap();

        let updated = store
            .modify_payroll(record.id, |r| {
                r.month = 9;
                r.status = PayrollStatus::Processed;
                Ok(())
            })
            .unwrap();
        assert_eq!(updated.month, 3);
        assert_eq!(updated.status, PayrollStatus::Processed);

        assert_eq!(
            store.modify_payroll(999, |_| Ok(())),
            Err(HrError::PayrollNotFound { payroll_id: 999 })
        );
    }
}
