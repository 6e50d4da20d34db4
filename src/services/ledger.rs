//! Attendance ledger.
//!
//! Records one attendance row per (employee, date). Self-service check-in and
//! check-out stamp the time of day from the injected [`Clock`]; HR staff can
//! enter arbitrary rows through [`AttendanceLedger::record_manual`].

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::access::Capability;
use crate::calculation::{calculate_worked_hours, detect_check_in_status};
use crate::clock::Clock;
use crate::config::PayrollPolicy;
use crate::error::{HrError, HrResult};
use crate::models::{AttendanceRecord, AttendanceStatus, NewAttendance};
use crate::store::{AttendanceQuery, HrStore};

/// A manually entered attendance row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualAttendance {
    /// The employee.
    pub employee_id: u64,
    /// The calendar date.
    pub date: NaiveDate,
    /// Optional check-in time of day.
    #[serde(default)]
    pub check_in: Option<NaiveTime>,
    /// Optional check-out time of day.
    #[serde(default)]
    pub check_out: Option<NaiveTime>,
    /// Explicit status.
    pub status: AttendanceStatus,
    /// Free-text note.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Records check-ins, check-outs and manual attendance entries.
pub struct AttendanceLedger {
    store: Arc<HrStore>,
    clock: Arc<dyn Clock>,
    policy: PayrollPolicy,
}

impl AttendanceLedger {
    /// Creates a ledger over `store` reading time from `clock`.
    pub fn new(store: Arc<HrStore>, clock: Arc<dyn Clock>, policy: PayrollPolicy) -> Self {
        Self {
            store,
            clock,
            policy,
        }
    }

    /// Checks the employee in at the clock's current time.
    pub fn check_in(&self, employee_id: u64) -> HrResult<AttendanceRecord> {
        self.check_in_at(employee_id, self.clock.now())
    }

    /// Checks the employee in at `at`.
    ///
    /// Creates the day's record, or fills in an existing record that has no
    /// check-in yet. The status is late when the time of day is strictly
    /// after the policy's late cutoff, present otherwise.
    pub fn check_in_at(&self, employee_id: u64, at: NaiveDateTime) -> HrResult<AttendanceRecord> {
        let date = at.date();
        let time = at.time();
        let status = detect_check_in_status(time, self.policy.late_cutoff);
        let stamp = |record: &mut AttendanceRecord| stamp_check_in(record, time, status);

        let record = match self.store.modify_attendance(employee_id, date, stamp)? {
            Some(record) => record,
            None => {
                let new = NewAttendance {
                    employee_id,
                    date,
                    check_in: Some(time),
                    check_out: None,
                    total_hours: None,
                    status,
                    notes: None,
                };
                match self.store.insert_attendance(new) {
                    Ok(record) => record,
                    // Another request created the row in between.
                    Err(HrError::DuplicateAttendance { .. }) => self
                        .store
                        .modify_attendance(employee_id, date, stamp)?
                        .ok_or(HrError::AlreadyCheckedIn { employee_id, date })?,
                    Err(err) => return Err(err),
                }
            }
        };

        info!(
            employee_id,
            date = %date,
            check_in = %time,
            status = ?record.status,
            "Checked in"
        );
        Ok(record)
    }

    /// Checks the employee out at the clock's current time.
    pub fn check_out(&self, employee_id: u64) -> HrResult<AttendanceRecord> {
        self.check_out_at(employee_id, self.clock.now())
    }

    /// Checks the employee out at `at`, computing the worked hours.
    pub fn check_out_at(&self, employee_id: u64, at: NaiveDateTime) -> HrResult<AttendanceRecord> {
        let date = at.date();
        let time = at.time();

        let record = self
            .store
            .modify_attendance(employee_id, date, |record| {
                let check_in = record
                    .check_in
                    .ok_or(HrError::NoCheckInFound { employee_id, date })?;
                if record.check_out.is_some() {
                    return Err(HrError::AlreadyCheckedOut { employee_id, date });
                }
                record.total_hours = Some(calculate_worked_hours(check_in, time)?);
                record.check_out = Some(time);
                Ok(())
            })?
            .ok_or(HrError::NoCheckInFound { employee_id, date })?;

        info!(
            employee_id,
            date = %date,
            check_out = %time,
            total_hours = %record.hours_or_zero(),
            "Checked out"
        );
        Ok(record)
    }

    /// Inserts an attendance row on behalf of an employee.
    ///
    /// Requires full access. Worked hours are computed when both times are
    /// given; the one-row-per-day rule still applies.
    pub fn record_manual(
        &self,
        capability: &Capability,
        entry: ManualAttendance,
    ) -> HrResult<AttendanceRecord> {
        capability.require_full("record attendance")?;

        let total_hours = match (entry.check_in, entry.check_out) {
            (Some(check_in), Some(check_out)) => Some(calculate_worked_hours(check_in, check_out)?),
            _ => None,
        };

        let record = self.store.insert_attendance(NewAttendance {
            employee_id: entry.employee_id,
            date: entry.date,
            check_in: entry.check_in,
            check_out: entry.check_out,
            total_hours,
            status: entry.status,
            notes: entry.notes,
        })?;

        info!(
            employee_id = record.employee_id,
            date = %record.date,
            status = ?record.status,
            "Recorded manual attendance"
        );
        Ok(record)
    }

    /// Lists attendance visible to `capability`, newest date first.
    pub fn list(&self, capability: &Capability, query: AttendanceQuery) -> Vec<AttendanceRecord> {
        let query = AttendanceQuery {
            employee_id: capability.scope(query.employee_id),
            ..query
        };
        self.store.attendances(&query)
    }

    /// Returns a single attendance record.
    pub fn get(&self, capability: &Capability, attendance_id: u64) -> HrResult<AttendanceRecord> {
        let record = self
            .store
            .attendance(attendance_id)
            .ok_or(HrError::AttendanceNotFound { attendance_id })?;
        capability.require_view(record.employee_id, "view attendance record")?;
        Ok(record)
    }
}

fn stamp_check_in(
    record: &mut AttendanceRecord,
    time: NaiveTime,
    status: AttendanceStatus,
) -> HrResult<()> {
    if record.check_in.is_some() {
        return Err(HrError::AlreadyCheckedIn {
            employee_id: record.employee_id,
            date: record.date,
        });
    }
    if let Some(check_out) = record.check_out {
        record.total_hours = Some(calculate_worked_hours(time, check_out)?);
    }
    record.check_in = Some(time);
    record.status = status;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::models::NewEmployee;
    use chrono::Duration;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn t(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M:%S").unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn setup(now: &str) -> (AttendanceLedger, Arc<FixedClock>, u64) {
        let store = Arc::new(HrStore::new());
        let employee = store
            .insert_employee(NewEmployee {
                user_id: 10,
                employee_code: "EMP-0001".to_string(),
                name: "Rina Hartono".to_string(),
                email: "rina@example.com".to_string(),
                phone: None,
                department: "Finance".to_string(),
                position: "Analyst".to_string(),
                hire_date: NaiveDate::from_ymd_opt(2022, 1, 3).unwrap(),
                basic_salary: dec("9000000"),
            })
            .unwrap();
        let clock = Arc::new(FixedClock::new(at(now)));
        let ledger = AttendanceLedger::new(store, clock.clone(), PayrollPolicy::default());
        (ledger, clock, employee.id)
    }

    #[test]
    fn test_check_in_on_time_is_present() {
        let (ledger, _, id) = setup("2025-06-02 08:45:00");
        let record = ledger.check_in(id).unwrap();
        assert_eq!(record.check_in, Some(t("08:45:00")));
        assert_eq!(record.check_out, None);
        assert_eq!(record.status, AttendanceStatus::Present);
    }

    #[test]
    fn test_check_in_after_cutoff_is_late() {
        let (ledger, _, id) = setup("2025-06-02 09:00:01");
        assert_eq!(ledger.check_in(id).unwrap().status, AttendanceStatus::Late);
    }

    #[test]
    fn test_second_check_in_fails() {
        let (ledger, clock, id) = setup("2025-06-02 08:00:00");
        ledger.check_in(id).unwrap();
        clock.advance(Duration::minutes(5));

        assert_eq!(
            ledger.check_in(id),
            Err(HrError::AlreadyCheckedIn {
                employee_id: id,
                date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
            })
        );
    }

    #[test]
    fn test_check_in_fills_existing_row_without_check_in() {
        let (ledger, _, id) = setup("2025-06-02 09:30:00");
        ledger
            .record_manual(
                &Capability::Full,
                ManualAttendance {
                    employee_id: id,
                    date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
                    check_in: None,
                    check_out: None,
                    status: AttendanceStatus::Absent,
                    notes: Some("pre-filled".to_string()),
                },
            )
            .unwrap();

        let record = ledger.check_in(id).unwrap();
        assert_eq!(record.check_in, Some(t("09:30:00")));
        assert_eq!(record.status, AttendanceStatus::Late);
        assert_eq!(record.notes.as_deref(), Some("pre-filled"));
    }

    #[test]
    fn test_check_in_after_recorded_check_out_is_rejected() {
        let (ledger, _, id) = setup("2025-06-02 14:00:00");
        let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        ledger
            .record_manual(
                &Capability::Full,
                ManualAttendance {
                    employee_id: id,
                    date,
                    check_in: None,
                    check_out: Some(t("12:00:00")),
                    status: AttendanceStatus::HalfDay,
                    notes: None,
                },
            )
            .unwrap();

        assert_eq!(
            ledger.check_in(id),
            Err(HrError::CheckOutBeforeCheckIn {
                check_in: t("14:00:00"),
                check_out: t("12:00:00"),
            })
        );
        let stored = ledger
            .list(&Capability::Full, AttendanceQuery::default())
            .pop()
            .unwrap();
        assert_eq!(stored.check_in, None);
        assert_eq!(stored.status, AttendanceStatus::HalfDay);
    }

    #[test]
    fn test_check_in_before_recorded_check_out_computes_hours() {
        let (ledger, _, id) = setup("2025-06-02 08:30:00");
        ledger
            .record_manual(
                &Capability::Full,
                ManualAttendance {
                    employee_id: id,
                    date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
                    check_in: None,
                    check_out: Some(t("12:00:00")),
                    status: AttendanceStatus::HalfDay,
                    notes: None,
                },
            )
            .unwrap();

        let record = ledger.check_in(id).unwrap();
        assert_eq!(record.check_in, Some(t("08:30:00")));
        assert_eq!(record.total_hours, Some(dec("3.5")));
        assert!(matches!(
            ledger.check_out(id),
            Err(HrError::AlreadyCheckedOut { .. })
        ));
    }

    #[test]
    fn test_concurrent_check_ins_create_one_record() {
        let (ledger, _, id) = setup("2025-06-02 08:00:00");
        let moment = at("2025-06-02 08:10:00");

        let results: Vec<HrResult<AttendanceRecord>> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| ledger.check_in_at(id, moment)))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        for result in results.iter().filter(|r| r.is_err()) {
            assert_eq!(
                result,
                &Err(HrError::AlreadyCheckedIn {
                    employee_id: id,
                    date
                })
            );
        }
        let stored = ledger.list(&Capability::Full, AttendanceQuery::default());
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].check_in, Some(t("08:10:00")));
    }

    #[test]
    fn test_check_out_computes_fractional_hours() {
        let (ledger, clock, id) = setup("2025-06-02 08:00:00");
        ledger.check_in(id).unwrap();
        clock.set(at("2025-06-02 16:30:00"));

        let record = ledger.check_out(id).unwrap();
        assert_eq!(record.check_out, Some(t("16:30:00")));
        assert_eq!(record.total_hours, Some(dec("8.5")));
    }

    #[test]
    fn test_check_out_without_check_in_fails() {
        let (ledger, _, id) = setup("2025-06-02 17:00:00");
        assert!(matches!(
            ledger.check_out(id),
            Err(HrError::NoCheckInFound { .. })
        ));
    }

    #[test]
    fn test_check_out_on_row_without_check_in_fails() {
        let (ledger, _, id) = setup("2025-06-02 17:00:00");
        ledger
            .record_manual(
                &Capability::Full,
                ManualAttendance {
                    employee_id: id,
                    date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
                    check_in: None,
                    check_out: None,
                    status: AttendanceStatus::Absent,
                    notes: None,
                },
            )
            .unwrap();

        assert!(matches!(
            ledger.check_out(id),
            Err(HrError::NoCheckInFound { .. })
        ));
    }

    #[test]
    fn test_second_check_out_fails() {
        let (ledger, clock, id) = setup("2025-06-02 08:00:00");
        ledger.check_in(id).unwrap();
        clock.set(at("2025-06-02 17:00:00"));
        ledger.check_out(id).unwrap();
        clock.advance(Duration::minutes(1));

        assert!(matches!(
            ledger.check_out(id),
            Err(HrError::AlreadyCheckedOut { .. })
        ));
        let stored = ledger
            .list(&Capability::Full, AttendanceQuery::default())
            .pop()
            .unwrap();
        assert_eq!(stored.check_out, Some(t("17:00:00")));
        assert_eq!(stored.total_hours, Some(dec("9")));
    }

    #[test]
    fn test_check_out_next_day_finds_no_check_in() {
        let (ledger, clock, id) = setup("2025-06-02 22:00:00");
        ledger.check_in(id).unwrap();
        clock.set(at("2025-06-03 06:00:00"));
        assert!(matches!(
            ledger.check_out(id),
            Err(HrError::NoCheckInFound { .. })
        ));
    }

    #[test]
    fn test_check_in_unknown_employee() {
        let (ledger, _, _) = setup("2025-06-02 08:00:00");
        assert_eq!(
            ledger.check_in(404),
            Err(HrError::EmployeeNotFound { employee_id: 404 })
        );
    }

    #[test]
    fn test_manual_entry_requires_full_access() {
        let (ledger, _, id) = setup("2025-06-02 08:00:00");
        let entry = ManualAttendance {
            employee_id: id,
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            check_in: Some(t("08:00:00")),
            check_out: Some(t("12:00:00")),
            status: AttendanceStatus::HalfDay,
            notes: None,
        };

        assert!(matches!(
            ledger.record_manual(&Capability::SelfOnly { employee_id: id }, entry.clone()),
            Err(HrError::Forbidden { .. })
        ));

        let record = ledger.record_manual(&Capability::Full, entry.clone()).unwrap();
        assert_eq!(record.total_hours, Some(dec("4")));
        assert_eq!(record.status, AttendanceStatus::HalfDay);

        assert!(matches!(
            ledger.record_manual(&Capability::Full, entry),
            Err(HrError::DuplicateAttendance { .. })
        ));
    }

    #[test]
    fn test_manual_entry_rejects_reversed_times() {
        let (ledger, _, id) = setup("2025-06-02 08:00:00");
        let result = ledger.record_manual(
            &Capability::Full,
            ManualAttendance {
                employee_id: id,
                date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                check_in: Some(t("13:00:00")),
                check_out: Some(t("09:00:00")),
                status: AttendanceStatus::Present,
                notes: None,
            },
        );
        assert_eq!(
            result,
            Err(HrError::CheckOutBeforeCheckIn {
                check_in: t("13:00:00"),
                check_out: t("09:00:00"),
            })
        );
    }

    #[test]
    fn test_self_only_listing_and_get() {
        let (ledger, _, id) = setup("2025-06-02 08:00:00");
        let own = ledger.check_in(id).unwrap();
        let own_capability = Capability::SelfOnly { employee_id: id };
        let other_capability = Capability::SelfOnly { employee_id: id + 1 };

        assert_eq!(ledger.list(&own_capability, AttendanceQuery::default()).len(), 1);
        assert!(
            ledger
                .list(&other_capability, AttendanceQuery {
                    employee_id: Some(id),
                    ..Default::default()
                })
                .is_empty()
        );

        assert_eq!(ledger.get(&own_capability, own.id).unwrap().id, own.id);
        assert!(matches!(
            ledger.get(&other_capability, own.id),
            Err(HrError::Forbidden { .. })
        ));
        assert_eq!(
            ledger.get(&Capability::Full, 999),
            Err(HrError::AttendanceNotFound { attendance_id: 999 })
        );
    }
}
