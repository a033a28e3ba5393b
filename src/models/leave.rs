//! Leave request and leave quota models.
//!
//! A leave request is created pending and transitions exactly once, to either
//! approved or rejected. Approval is the only operation that mutates a leave
//! quota; the reverse transition (an approved leave later invalidated) is
//! unspecified upstream and deliberately not modeled.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The category of leave being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    /// Annual leave, drawn from the employee's quota.
    Annual,
    /// Sick leave.
    Sick,
    /// Personal leave.
    Personal,
    /// Unpaid leave.
    Unpaid,
}

/// The lifecycle state of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Awaiting a decision.
    Pending,
    /// Approved; quota has been consumed.
    Approved,
    /// Rejected; no quota effect.
    Rejected,
}

impl LeaveStatus {
    /// Returns the snake_case wire name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            LeaveStatus::Pending => "pending",
            LeaveStatus::Approved => "approved",
            LeaveStatus::Rejected => "rejected",
        }
    }
}

/// A request for a contiguous span of leave days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Unique identifier for the request.
    pub id: String,
    /// The employee requesting leave.
    pub employee_id: String,
    /// The category of leave.
    pub leave_type: LeaveType,
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// The number of leave days the request consumes.
    pub days: u32,
    /// The lifecycle state of the request.
    pub status: LeaveStatus,
    /// Who approved the request, once approved.
    #[serde(default)]
    pub approved_by: Option<String>,
    /// When the request was approved, once approved.
    #[serde(default)]
    pub approved_at: Option<NaiveDateTime>,
}

impl LeaveRequest {
    /// Transitions the request from pending to approved, recording approver
    /// metadata.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidTransition`] if the request is not
    /// pending.
    pub fn approve(mut self, approved_by: &str, approved_at: NaiveDateTime) -> EngineResult<Self> {
        self.ensure_pending("approved")?;
        self.status = LeaveStatus::Approved;
        self.approved_by = Some(approved_by.to_string());
        self.approved_at = Some(approved_at);
        Ok(self)
    }

    /// Transitions the request from pending to rejected.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidTransition`] if the request is not
    /// pending.
    pub fn reject(mut self) -> EngineResult<Self> {
        self.ensure_pending("rejected")?;
        self.status = LeaveStatus::Rejected;
        Ok(self)
    }

    fn ensure_pending(&self, to: &str) -> EngineResult<()> {
        if self.status != LeaveStatus::Pending {
            return Err(EngineError::InvalidTransition {
                entity: "leave request".to_string(),
                from: self.status.as_str().to_string(),
                to: to.to_string(),
            });
        }
        Ok(())
    }
}

/// An employee's leave-day allotment for the current tracking period.
///
/// Invariant: `remaining_days = total_days - used_days`, never negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveQuota {
    /// The employee the quota belongs to.
    pub employee_id: String,
    /// Total leave days granted for the period.
    pub total_days: u32,
    /// Leave days consumed by approvals.
    pub used_days: u32,
    /// Leave days still available.
    pub remaining_days: u32,
}
