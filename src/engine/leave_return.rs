//! Late return-to-work detection.
//!
//! Cross-references an approved leave request with subsequent attendance.
//! The check applies only once the leave's end date has fully elapsed
//! (end of day); the scan window then runs from the day after the end date
//! through "today". The window never includes the end date itself, so a
//! check-in punched on the end date is never reported as a return date.

use std::sync::Arc;

use chrono::{Days, NaiveDate};

use crate::error::{EngineError, EngineResult};
use crate::models::{LeaveRequest, LeaveStatus};
use crate::store::AttendanceStore;

/// The outcome of one late-return check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaveReturn {
    /// True when the employee's return from this leave is overdue.
    pub is_late: bool,
    /// The first day the employee checked in after the leave, when one
    /// exists. Always strictly after the leave's end date.
    pub return_date: Option<NaiveDate>,
}

impl LeaveReturn {
    fn on_time() -> Self {
        Self {
            is_late: false,
            return_date: None,
        }
    }
}

/// Flags approved leave requests whose holder has not returned on time.
pub struct LeaveReturnMonitor {
    attendance: Arc<dyn AttendanceStore>,
}

impl LeaveReturnMonitor {
    /// Creates the monitor over the given attendance store.
    pub fn new(attendance: Arc<dyn AttendanceStore>) -> Self {
        Self { attendance }
    }

    /// Checks one leave request as of `today`.
    ///
    /// Unapproved requests, and requests whose end date has not yet fully
    /// elapsed, report `is_late = false`. Once the end date has passed, the
    /// earliest check-in strictly after it becomes the recorded return date;
    /// finding none means the employee never returned. Both elapsed
    /// outcomes are reported late.
    pub async fn check(&self, request: &LeaveRequest, today: NaiveDate) -> EngineResult<LeaveReturn> {
        if request.status != LeaveStatus::Approved || today <= request.end_date {
            return Ok(LeaveReturn::on_time());
        }

        let window_start = request
            .end_date
            .checked_add_days(Days::new(1))
            .ok_or_else(|| EngineError::Validation {
                field: "end_date".to_string(),
                message: format!("{} overflows the calendar", request.end_date),
            })?;

        let records = self
            .attendance
            .get_by_employee_in_range(&request.employee_id, window_start, today)
            .await?;

        let return_date = records
            .iter()
            .filter(|r| r.check_in.is_some())
            .map(|r| r.date)
            .min();

        Ok(LeaveReturn {
            is_late: true,
            return_date,
        })
    }
}
