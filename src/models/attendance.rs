//! Attendance record model and related types.
//!
//! One attendance record exists per employee per calendar date. Records are
//! created at check-in, mutated once at check-out, and never deleted by this
//! engine. Late minutes are always re-derived from the stored check-in time
//! and date; no running counter is persisted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::TimeOfDay;
use crate::error::{EngineError, EngineResult};

/// Classification of an employee's day.
///
/// The classifier only ever produces `Present` or `Late`; `Absent`, `Leave`
/// and `Holiday` are assigned by other flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// Checked in on or within the tolerance window of the scheduled start.
    Present,
    /// Checked in after the tolerance window.
    Late,
    /// No punch and no approved leave on a working day.
    Absent,
    /// On approved leave.
    Leave,
    /// A recognized holiday.
    Holiday,
}

impl AttendanceStatus {
    /// Returns the snake_case wire name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Late => "late",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Leave => "leave",
            AttendanceStatus::Holiday => "holiday",
        }
    }
}

/// A single day's attendance for one employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Unique identifier for the record.
    pub id: String,
    /// The employee the record belongs to.
    pub employee_id: String,
    /// The calendar date the record covers.
    pub date: NaiveDate,
    /// The recorded check-in time, if the employee has punched in.
    #[serde(default)]
    pub check_in: Option<TimeOfDay>,
    /// The recorded check-out time, if the employee has punched out.
    #[serde(default)]
    pub check_out: Option<TimeOfDay>,
    /// The day's classification.
    pub status: AttendanceStatus,
    /// Free-form location captured with the punch, if any.
    #[serde(default)]
    pub location: Option<String>,
    /// Free-form notes attached to the record, if any.
    #[serde(default)]
    pub notes: Option<String>,
}

impl AttendanceRecord {
    /// Records the check-out punch on an existing record.
    ///
    /// A check-out requires a prior check-in, may happen only once, and may
    /// not precede the check-in time.
    ///
    /// # Errors
    ///
    /// - [`EngineError::CheckInNotFound`] if the record has no check-in.
    /// - [`EngineError::AlreadyCheckedOut`] if a check-out is already set.
    /// - [`EngineError::Validation`] if `time` is earlier than the check-in.
    pub fn with_check_out(mut self, time: TimeOfDay) -> EngineResult<Self> {
        let check_in = self.check_in.ok_or_else(|| EngineError::CheckInNotFound {
            employee_id: self.employee_id.clone(),
            date: self.date,
        })?;

        if self.check_out.is_some() {
            return Err(EngineError::AlreadyCheckedOut {
                employee_id: self.employee_id.clone(),
                date: self.date,
            });
        }

        if time < check_in {
            return Err(EngineError::Validation {
                field: "check_out".to_string(),
                message: format!("check-out {time} precedes check-in {check_in}"),
            });
        }

        self.check_out = Some(time);
        Ok(self)
    }
}
