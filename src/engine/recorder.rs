//! Check-in and check-out recording.
//!
//! The composite punch operation: await the identity gate, classify the
//! punch against the schedule, persist the record, and evaluate the weekly
//! lateness policy for an immediate SP1. The duplicate pre-check here is a
//! fast failure for callers; the attendance store's (employee, date)
//! uniqueness rule is what actually prevents duplicates under concurrent
//! submission.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;
use uuid::Uuid;

use super::classify_check_in;
use super::compliance::{EscalationPolicy, WeeklyLateMinutesPolicy};
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, Escalation, TimeOfDay};
use crate::store::{AttendanceStore, EscalationSink, VerificationGate};

/// The result of recording a check-in.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckInOutcome {
    /// The persisted attendance record.
    pub record: AttendanceRecord,
    /// The SP1 raised by the weekly minute policy, when this punch tipped
    /// the employee over the threshold.
    pub escalation: Option<Escalation>,
}

/// Records attendance punches.
pub struct AttendanceRecorder {
    attendance: Arc<dyn AttendanceStore>,
    gate: Arc<dyn VerificationGate>,
    sink: Arc<dyn EscalationSink>,
    weekly_policy: WeeklyLateMinutesPolicy,
}

impl AttendanceRecorder {
    /// Creates the recorder over the given store, gate and sink.
    pub fn new(
        attendance: Arc<dyn AttendanceStore>,
        gate: Arc<dyn VerificationGate>,
        sink: Arc<dyn EscalationSink>,
    ) -> Self {
        let weekly_policy = WeeklyLateMinutesPolicy::new(attendance.clone());
        Self {
            attendance,
            gate,
            sink,
            weekly_policy,
        }
    }

    /// Records a check-in punch.
    ///
    /// The identity gate is awaited before anything is written. The record
    /// is durable once the store insert returns; the weekly policy scan runs
    /// after that, so a scan failure surfaces to the caller without undoing
    /// the punch. Callers may re-run compliance evaluation but must not
    /// retry the punch itself.
    ///
    /// # Errors
    ///
    /// - whatever the gate raises when verification fails.
    /// - [`EngineError::AlreadyCheckedIn`] if a record already covers the
    ///   date.
    pub async fn check_in(
        &self,
        employee_id: &str,
        date: NaiveDate,
        time: TimeOfDay,
        location: Option<String>,
    ) -> EngineResult<CheckInOutcome> {
        self.gate.verify(employee_id).await?;

        // Fast-fail only; the store insert below is the real guard.
        if let Some(existing) = self
            .attendance
            .get_by_employee_and_date(employee_id, date)
            .await?
        {
            return Err(EngineError::AlreadyCheckedIn {
                employee_id: existing.employee_id,
                date: existing.date,
            });
        }

        let classification = classify_check_in(time, date);
        let record = AttendanceRecord {
            id: Uuid::new_v4().to_string(),
            employee_id: employee_id.to_string(),
            date,
            check_in: Some(time),
            check_out: None,
            status: classification.status,
            location,
            notes: None,
        };

        let record = self.attendance.insert(record).await?;
        info!(
            employee_id,
            %date,
            status = record.status.as_str(),
            late_minutes = classification.late_minutes,
            "check-in recorded"
        );

        let escalation = self.weekly_policy.evaluate(employee_id, date).await?;
        if let Some(escalation) = &escalation {
            self.sink.emit(escalation.clone()).await;
        }

        Ok(CheckInOutcome { record, escalation })
    }

    /// Records a check-out punch against the day's existing record.
    ///
    /// # Errors
    ///
    /// - [`EngineError::CheckInNotFound`] if no check-in exists for the
    ///   date.
    /// - [`EngineError::AlreadyCheckedOut`] if the record already has a
    ///   check-out.
    /// - [`EngineError::Validation`] if `time` precedes the check-in.
    pub async fn check_out(
        &self,
        employee_id: &str,
        date: NaiveDate,
        time: TimeOfDay,
    ) -> EngineResult<AttendanceRecord> {
        let record = self
            .attendance
            .get_by_employee_and_date(employee_id, date)
            .await?
            .ok_or_else(|| EngineError::CheckInNotFound {
                employee_id: employee_id.to_string(),
                date,
            })?;

        let updated = self.attendance.update(record.with_check_out(time)?).await?;
        info!(employee_id, %date, "check-out recorded");
        Ok(updated)
    }
}
