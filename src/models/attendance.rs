//! Attendance record model.
//!
//! One record exists per (employee, calendar date). It is created on check-in
//! or by a manual HR entry, and completed on check-out.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Outcome recorded for an attendance day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// Checked in on time.
    #[default]
    Present,
    /// Did not attend.
    Absent,
    /// Checked in after the late cutoff.
    Late,
    /// Attended part of the day.
    HalfDay,
}

impl AttendanceStatus {
    /// All statuses, in display order.
    pub const ALL: [AttendanceStatus; 4] = [
        AttendanceStatus::Present,
        AttendanceStatus::Absent,
        AttendanceStatus::Late,
        AttendanceStatus::HalfDay,
    ];
}

/// A single day's attendance for an employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Storage identifier.
    pub id: u64,
    /// The employee this record belongs to.
    pub employee_id: u64,
    /// The calendar date of the record.
    pub date: NaiveDate,
    /// Time of day the employee checked in.
    pub check_in: Option<NaiveTime>,
    /// Time of day the employee checked out.
    pub check_out: Option<NaiveTime>,
    /// Worked hours, set once both times are known.
    pub total_hours: Option<Decimal>,
    /// Attendance outcome.
    pub status: AttendanceStatus,
    /// Free-text note.
    #[serde(default)]
    pub notes: Option<String>,
}

impl AttendanceRecord {
    /// Returns the worked hours, treating an open record as zero.
    pub fn hours_or_zero(&self) -> Decimal {
        self.total_hours.unwrap_or(Decimal::ZERO)
    }
}

/// Input for inserting an attendance record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAttendance {
    /// The employee.
    pub employee_id: u64,
    /// The calendar date.
    pub date: NaiveDate,
    /// Check-in time of day.
    pub check_in: Option<NaiveTime>,
    /// Check-out time of day.
    pub check_out: Option<NaiveTime>,
    /// Worked hours.
    pub total_hours: Option<Decimal>,
    /// Attendance outcome.
    pub status: AttendanceStatus,
    /// Free-text note.
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(check_in: Option<&str>, check_out: Option<&str>) -> AttendanceRecord {
        let t = |s: &str| NaiveTime::parse_from_str(s, "%H:%M:%S").unwrap();
        AttendanceRecord {
            id: 1,
            employee_id: 1,
            date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            check_in: check_in.map(t),
            check_out: check_out.map(t),
            total_hours: None,
            status: AttendanceStatus::Present,
            notes: None,
        }
    }

    #[test]
    fn test_hours_or_zero() {
        let mut r = record(Some("08:00:00"), None);
        assert_eq!(r.hours_or_zero(), Decimal::ZERO);
        r.total_hours = Some(Decimal::new(850, 2));
        assert_eq!(r.hours_or_zero(), Decimal::new(850, 2));
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&AttendanceStatus::HalfDay).unwrap(),
            "\"half_day\""
        );
        let status: AttendanceStatus = serde_json::from_str("\"late\"").unwrap();
        assert_eq!(status, AttendanceStatus::Late);
    }

    #[test]
    fn test_deserialize_record_with_times() {
        let json = r#"{
            "id": 9,
            "employee_id": 2,
            "date": "2025-04-01",
            "check_in": "08:15:00",
            "check_out": "17:45:00",
            "total_hours": "9.50",
            "status": "present"
        }"#;

        let record: AttendanceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.check_in, NaiveTime::from_hms_opt(8, 15, 0));
        assert_eq!(record.total_hours, Some(Decimal::new(950, 2)));
        assert_eq!(record.notes, None);
    }
}
