//! Lateness escalation policies.
//!
//! Two independently defined SP1 policies exist side by side, matching
//! divergent behavior across the system's surfaces, and are deliberately not
//! unified:
//!
//! - [`WeeklyLateMinutesPolicy`] sums late minutes over the ISO week
//!   (Monday-Sunday) and fires once the total exceeds 30, evaluated
//!   immediately when the triggering check-in is recorded.
//! - [`MonthlyLateCountPolicy`] counts late days over the calendar month and
//!   fires once the count exceeds 5, evaluated on demand.
//!
//! Each evaluation re-scans its window from persisted records; no escalation
//! ledger exists, so the same condition can fire again on recomputation.
//! Deduplication, if wanted, belongs to the sink's owner.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Datelike, Days, NaiveDate};

use super::recorded_late_minutes;
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceStatus, Escalation, EscalationKind, PayrollPeriod};
use crate::store::AttendanceStore;

/// Accumulated late minutes per ISO week above which SP1 fires.
pub const WEEKLY_LATE_MINUTES_LIMIT: i64 = 30;

/// Late-day count per calendar month above which SP1 fires.
pub const MONTHLY_LATE_COUNT_LIMIT: i64 = 5;

/// A lateness escalation rule evaluated over a window of persisted records.
#[async_trait]
pub trait EscalationPolicy: Send + Sync {
    /// Evaluates the policy for an employee as of the given date.
    ///
    /// Returns the escalation to raise, or `None` while the employee is
    /// under the threshold.
    async fn evaluate(
        &self,
        employee_id: &str,
        as_of: NaiveDate,
    ) -> EngineResult<Option<Escalation>>;
}

/// SP1 on more than 30 accumulated late minutes within the ISO week.
pub struct WeeklyLateMinutesPolicy {
    attendance: Arc<dyn AttendanceStore>,
}

impl WeeklyLateMinutesPolicy {
    /// Creates the policy over the given attendance store.
    pub fn new(attendance: Arc<dyn AttendanceStore>) -> Self {
        Self { attendance }
    }
}

#[async_trait]
impl EscalationPolicy for WeeklyLateMinutesPolicy {
    async fn evaluate(
        &self,
        employee_id: &str,
        as_of: NaiveDate,
    ) -> EngineResult<Option<Escalation>> {
        let (monday, sunday) = iso_week_bounds(as_of)?;
        let records = self
            .attendance
            .get_by_employee_in_range(employee_id, monday, sunday)
            .await?;

        let total_late_minutes: i64 = records.iter().map(recorded_late_minutes).sum();

        if total_late_minutes > WEEKLY_LATE_MINUTES_LIMIT {
            let iso = as_of.iso_week();
            return Ok(Some(Escalation {
                employee_id: employee_id.to_string(),
                kind: EscalationKind::FirstWarning,
                trigger_value: total_late_minutes,
                period: format!("{}-W{:02}", iso.year(), iso.week()),
            }));
        }
        Ok(None)
    }
}

/// SP1 on more than 5 late days within the calendar month.
pub struct MonthlyLateCountPolicy {
    attendance: Arc<dyn AttendanceStore>,
}

impl MonthlyLateCountPolicy {
    /// Creates the policy over the given attendance store.
    pub fn new(attendance: Arc<dyn AttendanceStore>) -> Self {
        Self { attendance }
    }
}

#[async_trait]
impl EscalationPolicy for MonthlyLateCountPolicy {
    async fn evaluate(
        &self,
        employee_id: &str,
        as_of: NaiveDate,
    ) -> EngineResult<Option<Escalation>> {
        let month = PayrollPeriod::new(as_of.month(), as_of.year())?;
        let records = self
            .attendance
            .get_by_employee_in_range(employee_id, month.first_day(), month.last_day())
            .await?;

        let late_count = records
            .iter()
            .filter(|r| r.status == AttendanceStatus::Late)
            .count() as i64;

        if late_count > MONTHLY_LATE_COUNT_LIMIT {
            return Ok(Some(Escalation {
                employee_id: employee_id.to_string(),
                kind: EscalationKind::FirstWarning,
                trigger_value: late_count,
                period: month.to_string(),
            }));
        }
        Ok(None)
    }
}

/// Returns the Monday and Sunday of the ISO week containing `date`.
fn iso_week_bounds(date: NaiveDate) -> EngineResult<(NaiveDate, NaiveDate)> {
    let days_from_monday = u64::from(date.weekday().num_days_from_monday());
    let monday = date
        .checked_sub_days(Days::new(days_from_monday))
        .ok_or_else(|| EngineError::Validation {
            field: "date".to_string(),
            message: format!("{date} underflows the calendar"),
        })?;
    let sunday = monday
        .checked_add_days(Days::new(6))
        .ok_or_else(|| EngineError::Validation {
            field: "date".to_string(),
            message: format!("{date} overflows the calendar"),
        })?;
    Ok((monday, sunday))
}
