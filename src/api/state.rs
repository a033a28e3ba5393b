//! Application state for the attendance engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::engine::{
    AttendanceRecorder, DeductionCalculator, LeaveQuotaTracker, LeaveReturnMonitor,
    MonthlyLateCountPolicy, PayrollComputer, WeeklyLateMinutesPolicy,
};
use crate::store::{
    AttendanceStore, EmployeeDirectory, EscalationSink, LeaveQuotaStore, LeaveStore, LoanStore,
    PayrollStore, SettingsProvider, VerificationGate,
};

/// The full set of external collaborators the engine is wired to.
#[derive(Clone)]
pub struct EngineStores {
    /// Attendance record persistence.
    pub attendance: Arc<dyn AttendanceStore>,
    /// Leave request persistence.
    pub leaves: Arc<dyn LeaveStore>,
    /// Loan persistence.
    pub loans: Arc<dyn LoanStore>,
    /// Payroll record persistence.
    pub payroll: Arc<dyn PayrollStore>,
    /// Leave quota persistence.
    pub quotas: Arc<dyn LeaveQuotaStore>,
    /// Read-only employee directory.
    pub directory: Arc<dyn EmployeeDirectory>,
    /// Injected engine settings.
    pub settings: Arc<dyn SettingsProvider>,
    /// Identity gate awaited before punches.
    pub gate: Arc<dyn VerificationGate>,
    /// Outbound escalation channel.
    pub sink: Arc<dyn EscalationSink>,
}

/// Shared application state.
///
/// Wires the engine services over one set of stores and hands them to the
/// request handlers.
#[derive(Clone)]
pub struct AppState {
    recorder: Arc<AttendanceRecorder>,
    weekly_policy: Arc<WeeklyLateMinutesPolicy>,
    monthly_policy: Arc<MonthlyLateCountPolicy>,
    leave_returns: Arc<LeaveReturnMonitor>,
    deductions: Arc<DeductionCalculator>,
    payroll: Arc<PayrollComputer>,
    quotas: Arc<LeaveQuotaTracker>,
    stores: EngineStores,
}

impl AppState {
    /// Creates application state over the given stores.
    pub fn new(stores: EngineStores) -> Self {
        Self {
            recorder: Arc::new(AttendanceRecorder::new(
                stores.attendance.clone(),
                stores.gate.clone(),
                stores.sink.clone(),
            )),
            weekly_policy: Arc::new(WeeklyLateMinutesPolicy::new(stores.attendance.clone())),
            monthly_policy: Arc::new(MonthlyLateCountPolicy::new(stores.attendance.clone())),
            leave_returns: Arc::new(LeaveReturnMonitor::new(stores.attendance.clone())),
            deductions: Arc::new(DeductionCalculator::new(
                stores.loans.clone(),
                stores.attendance.clone(),
                stores.settings.clone(),
            )),
            payroll: Arc::new(PayrollComputer::new(
                stores.payroll.clone(),
                stores.directory.clone(),
            )),
            quotas: Arc::new(LeaveQuotaTracker::new(stores.quotas.clone())),
            stores,
        }
    }

    /// Returns the punch recorder.
    pub fn recorder(&self) -> &AttendanceRecorder {
        &self.recorder
    }

    /// Returns the weekly late-minutes escalation policy.
    pub fn weekly_policy(&self) -> &WeeklyLateMinutesPolicy {
        &self.weekly_policy
    }

    /// Returns the monthly late-count escalation policy.
    pub fn monthly_policy(&self) -> &MonthlyLateCountPolicy {
        &self.monthly_policy
    }

    /// Returns the late-return monitor.
    pub fn leave_returns(&self) -> &LeaveReturnMonitor {
        &self.leave_returns
    }

    /// Returns the deduction calculator.
    pub fn deductions(&self) -> &DeductionCalculator {
        &self.deductions
    }

    /// Returns the payroll computer.
    pub fn payroll(&self) -> &PayrollComputer {
        &self.payroll
    }

    /// Returns the leave quota tracker.
    pub fn quotas(&self) -> &LeaveQuotaTracker {
        &self.quotas
    }

    /// Returns the wired stores.
    pub fn stores(&self) -> &EngineStores {
        &self.stores
    }
}
