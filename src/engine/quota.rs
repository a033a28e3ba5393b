//! Leave quota tracking.
//!
//! Quota balances move only on the pending → approved transition of a leave
//! request: `used_days` grows by the request's days and `remaining_days`
//! follows as `total_days - used_days`. Over-approval is rejected before any
//! write; the quota store additionally enforces the non-negative floor. No
//! reverse transition exists: invalidating an already-approved leave is
//! unspecified upstream and is not invented here.

use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::error::{EngineError, EngineResult};
use crate::models::{LeaveQuota, LeaveRequest};
use crate::store::LeaveQuotaStore;

/// Applies leave-request approvals to employee quota balances.
pub struct LeaveQuotaTracker {
    quotas: Arc<dyn LeaveQuotaStore>,
}

impl LeaveQuotaTracker {
    /// Creates the tracker over the given quota store.
    pub fn new(quotas: Arc<dyn LeaveQuotaStore>) -> Self {
        Self { quotas }
    }

    /// Approves a pending request, consuming quota.
    ///
    /// Quota is reserved through the store first; the returned approved
    /// request is for the caller to persist. Rejections leave both the
    /// request and the quota untouched.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidTransition`] if the request is not pending.
    /// - [`EngineError::NotFound`] if the employee has no quota row.
    /// - [`EngineError::PolicyViolation`] if the request would overdraw the
    ///   remaining days.
    pub async fn approve(
        &self,
        request: LeaveRequest,
        approved_by: &str,
        approved_at: NaiveDateTime,
    ) -> EngineResult<(LeaveRequest, LeaveQuota)> {
        let quota = self
            .quotas
            .get(&request.employee_id)
            .await?
            .ok_or_else(|| EngineError::NotFound {
                entity: "leave quota".to_string(),
                id: request.employee_id.clone(),
            })?;

        if request.days > quota.remaining_days {
            return Err(EngineError::PolicyViolation {
                message: format!(
                    "approving {} leave days would overdraw the remaining {} for employee '{}'",
                    request.days, quota.remaining_days, request.employee_id
                ),
            });
        }

        let approved = request.approve(approved_by, approved_at)?;
        let updated = self
            .quotas
            .increment_used(&approved.employee_id, approved.days)
            .await?;

        Ok((approved, updated))
    }

    /// Returns the current quota for an employee.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] if the employee has no quota row.
    pub async fn balance(&self, employee_id: &str) -> EngineResult<LeaveQuota> {
        self.quotas
            .get(employee_id)
            .await?
            .ok_or_else(|| EngineError::NotFound {
                entity: "leave quota".to_string(),
                id: employee_id.to_string(),
            })
    }
}
