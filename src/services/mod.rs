//! Operations over the HR store.
//!
//! Each service owns a handle to the shared [`HrStore`](crate::store::HrStore)
//! and takes the caller's [`Capability`](crate::access::Capability) wherever
//! access depends on who is asking.

mod directory;
mod generator;
mod ledger;
mod payroll_book;

pub use directory::{Dashboard, EmployeeDirectory, RECENT_ATTENDANCE_LIMIT};
pub use generator::{GenerationOutcome, PayrollGenerator};
pub use ledger::{AttendanceLedger, ManualAttendance};
pub use payroll_book::{
    MAX_AMOUNT, MAX_OVERTIME_HOURS, MAX_OVERTIME_RATE, PayrollAmendment, PayrollBook, PayrollEntry,
};
