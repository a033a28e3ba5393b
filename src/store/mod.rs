//! External interfaces consumed by the engine.
//!
//! The engine owns no persistence, wire protocol or clock. Everything it
//! needs from the outside world arrives through the narrow contracts in this
//! module: repository-style stores, the settings provider, the escalation
//! sink and the verification gate. Every store call is a suspension point in
//! an asynchronous chain; a failed read or write surfaces as
//! [`EngineError::Store`] and aborts the containing operation.
//!
//! Uniqueness rules live in the stores, not in their callers: `insert`
//! implementations reject a second attendance record for the same
//! (employee, date), and a second non-cancelled payroll record for the same
//! (employee, period). Callers may pre-check for a friendlier fast failure,
//! but the store answer is the one that counts.
//!
//! [`EngineError::Store`]: crate::error::EngineError::Store

mod memory;

pub use memory::{
    InMemoryAttendanceStore, InMemoryEmployeeDirectory, InMemoryLeaveQuotaStore,
    InMemoryLeaveStore, InMemoryLoanStore, InMemoryPayrollStore, LoggingEscalationSink, OpenGate,
    RecordingEscalationSink,
};

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{
    AttendanceRecord, Employee, Escalation, LeaveQuota, LeaveRequest, Loan, PayrollPeriod,
    PayrollRecord, PayrollStatus,
};

/// Persistence contract for attendance records.
#[async_trait]
pub trait AttendanceStore: Send + Sync {
    /// Returns the record for an employee on a date, if one exists.
    async fn get_by_employee_and_date(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> EngineResult<Option<AttendanceRecord>>;

    /// Returns all records for an employee within `start..=end`, ordered by
    /// date ascending.
    async fn get_by_employee_in_range(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<AttendanceRecord>>;

    /// Inserts a new record.
    ///
    /// The store enforces at most one record per (employee, date); a
    /// conflicting insert fails with
    /// [`EngineError::AlreadyCheckedIn`](crate::error::EngineError::AlreadyCheckedIn).
    async fn insert(&self, record: AttendanceRecord) -> EngineResult<AttendanceRecord>;

    /// Replaces an existing record, matched by id.
    async fn update(&self, record: AttendanceRecord) -> EngineResult<AttendanceRecord>;
}

/// Persistence contract for leave requests.
#[async_trait]
pub trait LeaveStore: Send + Sync {
    /// Returns a request by id, if it exists.
    async fn get(&self, id: &str) -> EngineResult<Option<LeaveRequest>>;

    /// Returns all approved requests for an employee.
    async fn get_approved_by_employee(&self, employee_id: &str)
    -> EngineResult<Vec<LeaveRequest>>;

    /// Returns every request in the store.
    async fn get_all(&self) -> EngineResult<Vec<LeaveRequest>>;

    /// Replaces an existing request, matched by id.
    async fn update(&self, request: LeaveRequest) -> EngineResult<LeaveRequest>;
}

/// Persistence contract for loans.
#[async_trait]
pub trait LoanStore: Send + Sync {
    /// Returns the loans producing a deduction for the period starting at
    /// `period_start`: approved, balance outstanding, repayments started on
    /// or before that date.
    async fn get_active_by_employee(
        &self,
        employee_id: &str,
        period_start: NaiveDate,
    ) -> EngineResult<Vec<Loan>>;
}

/// Persistence contract for payroll records.
#[async_trait]
pub trait PayrollStore: Send + Sync {
    /// Returns a record by id, if it exists.
    async fn get(&self, id: &str) -> EngineResult<Option<PayrollRecord>>;

    /// Returns the records for an employee and period whose status is not in
    /// `exclude_statuses`.
    async fn find_for_period(
        &self,
        employee_id: &str,
        period: PayrollPeriod,
        exclude_statuses: &[PayrollStatus],
    ) -> EngineResult<Vec<PayrollRecord>>;

    /// Inserts a new record.
    ///
    /// The store enforces at most one non-cancelled record per
    /// (employee, period); a conflicting insert fails with the duplicate
    /// error matching the existing record's status.
    async fn insert(&self, record: PayrollRecord) -> EngineResult<PayrollRecord>;

    /// Replaces an existing record, matched by id.
    async fn update(&self, record: PayrollRecord) -> EngineResult<PayrollRecord>;
}

/// Persistence contract for leave quotas.
#[async_trait]
pub trait LeaveQuotaStore: Send + Sync {
    /// Returns the quota for an employee, if one exists.
    async fn get(&self, employee_id: &str) -> EngineResult<Option<LeaveQuota>>;

    /// Consumes `days` from the quota and returns the updated balance.
    ///
    /// The store enforces the non-negative remaining invariant; an increment
    /// that would overdraw the quota fails with
    /// [`EngineError::PolicyViolation`](crate::error::EngineError::PolicyViolation).
    async fn increment_used(&self, employee_id: &str, days: u32) -> EngineResult<LeaveQuota>;
}

/// Read-only view of the external employee directory.
#[async_trait]
pub trait EmployeeDirectory: Send + Sync {
    /// Returns an employee by id, if the directory knows them.
    async fn get(&self, employee_id: &str) -> EngineResult<Option<Employee>>;
}

/// Injected engine settings.
///
/// Modeled as a trait rather than a module-level value so tests can swap the
/// penalty rate deterministically.
pub trait SettingsProvider: Send + Sync {
    /// The penalty charged per minute of lateness, in currency units.
    ///
    /// A returned value of zero means "unset": the deduction calculator
    /// falls back to
    /// [`DEFAULT_LATE_PENALTY_RATE_PER_MINUTE`](crate::engine::DEFAULT_LATE_PENALTY_RATE_PER_MINUTE).
    fn late_penalty_rate_per_minute(&self) -> Decimal;
}

/// Outbound channel for escalation events.
///
/// Fire-and-forget: delivery and retry are the sink's concern, not this
/// engine's, so `emit` cannot fail from the engine's point of view.
#[async_trait]
pub trait EscalationSink: Send + Sync {
    /// Delivers one escalation event.
    async fn emit(&self, escalation: Escalation);
}

/// Opaque identity gate awaited before a punch is recorded.
///
/// The caller-side face verification step. Its internals are irrelevant
/// here; the engine only requires that it resolves before the punch is
/// stored.
#[async_trait]
pub trait VerificationGate: Send + Sync {
    /// Confirms the punching employee's identity.
    async fn verify(&self, employee_id: &str) -> EngineResult<()>;
}
