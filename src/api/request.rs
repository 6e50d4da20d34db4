//! Request types for the HR payroll API.
//!
//! Payroll and employee bodies deserialize straight into the service inputs
//! ([`PayrollEntry`](crate::services::PayrollEntry),
//! [`NewEmployee`](crate::models::NewEmployee), ...). The types here cover the
//! bodies whose wire shape differs from the domain.

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::AttendanceStatus;
use crate::services::ManualAttendance;

/// Request body for `POST /payroll-generation`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Period year.
    pub year: i32,
    /// Period month.
    pub month: u32,
}

/// Request body for `POST /attendances`.
///
/// Times of day are accepted as `HH:MM` or `HH:MM:SS`.
#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceRequest {
    /// The employee.
    pub employee_id: u64,
    /// The calendar date.
    pub date: chrono::NaiveDate,
    /// Check-in time of day.
    #[serde(default, deserialize_with = "time_of_day")]
    pub check_in: Option<NaiveTime>,
    /// Check-out time of day.
    #[serde(default, deserialize_with = "time_of_day")]
    pub check_out: Option<NaiveTime>,
    /// Attendance status.
    pub status: AttendanceStatus,
    /// Free-text note.
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<AttendanceRequest> for ManualAttendance {
    fn from(req: AttendanceRequest) -> Self {
        ManualAttendance {
            employee_id: req.employee_id,
            date: req.date,
            check_in: req.check_in,
            check_out: req.check_out,
            status: req.status,
            notes: req.notes.filter(|n| !n.trim().is_empty()),
        }
    }
}

fn time_of_day<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveTime::parse_from_str(raw, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .map(Some)
        .map_err(|_| serde::de::Error::custom(format!("invalid time of day '{}'", raw)))
}
