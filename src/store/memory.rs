//! In-memory store implementations.
//!
//! Reference implementations of the store contracts, backed by
//! `tokio::sync::RwLock`. They carry the authoritative rules the contracts
//! demand: one attendance record per (employee, date), one non-cancelled
//! payroll record per (employee, period), and a non-negative leave-quota
//! floor. Used by the test suite, the benchmarks and the HTTP state
//! builder.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use tracing::info;

use super::{
    AttendanceStore, EmployeeDirectory, EscalationSink, LeaveQuotaStore, LeaveStore, LoanStore,
    PayrollStore, VerificationGate,
};
use crate::engine::duplicate_payroll_error;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, Employee, Escalation, LeaveQuota, LeaveRequest, LeaveStatus, Loan,
    PayrollPeriod, PayrollRecord, PayrollStatus,
};

/// Attendance records keyed by (employee, date).
#[derive(Default)]
pub struct InMemoryAttendanceStore {
    records: RwLock<HashMap<(String, NaiveDate), AttendanceRecord>>,
}

impl InMemoryAttendanceStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AttendanceStore for InMemoryAttendanceStore {
    async fn get_by_employee_and_date(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> EngineResult<Option<AttendanceRecord>> {
        let records = self.records.read().await;
        Ok(records.get(&(employee_id.to_string(), date)).cloned())
    }

    async fn get_by_employee_in_range(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<AttendanceRecord>> {
        let records = self.records.read().await;
        let mut matching: Vec<AttendanceRecord> = records
            .values()
            .filter(|r| r.employee_id == employee_id && r.date >= start && r.date <= end)
            .cloned()
            .collect();
        matching.sort_by_key(|r| r.date);
        Ok(matching)
    }

    async fn insert(&self, record: AttendanceRecord) -> EngineResult<AttendanceRecord> {
        let mut records = self.records.write().await;
        let key = (record.employee_id.clone(), record.date);
        if records.contains_key(&key) {
            return Err(EngineError::AlreadyCheckedIn {
                employee_id: record.employee_id,
                date: record.date,
            });
        }
        records.insert(key, record.clone());
        Ok(record)
    }

    async fn update(&self, record: AttendanceRecord) -> EngineResult<AttendanceRecord> {
        let mut records = self.records.write().await;
        let key = (record.employee_id.clone(), record.date);
        match records.get(&key) {
            Some(existing) if existing.id == record.id => {
                records.insert(key, record.clone());
                Ok(record)
            }
            _ => Err(EngineError::NotFound {
                entity: "attendance record".to_string(),
                id: record.id,
            }),
        }
    }
}

/// Leave requests keyed by id.
#[derive(Default)]
pub struct InMemoryLeaveStore {
    requests: RwLock<HashMap<String, LeaveRequest>>,
}

impl InMemoryLeaveStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a request, replacing any with the same id.
    pub async fn insert(&self, request: LeaveRequest) {
        let mut requests = self.requests.write().await;
        requests.insert(request.id.clone(), request);
    }
}

#[async_trait]
impl LeaveStore for InMemoryLeaveStore {
    async fn get(&self, id: &str) -> EngineResult<Option<LeaveRequest>> {
        let requests = self.requests.read().await;
        Ok(requests.get(id).cloned())
    }

    async fn get_approved_by_employee(
        &self,
        employee_id: &str,
    ) -> EngineResult<Vec<LeaveRequest>> {
        let requests = self.requests.read().await;
        let mut matching: Vec<LeaveRequest> = requests
            .values()
            .filter(|r| r.employee_id == employee_id && r.status == LeaveStatus::Approved)
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(matching)
    }

    async fn get_all(&self) -> EngineResult<Vec<LeaveRequest>> {
        let requests = self.requests.read().await;
        let mut all: Vec<LeaveRequest> = requests.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(all)
    }

    async fn update(&self, request: LeaveRequest) -> EngineResult<LeaveRequest> {
        let mut requests = self.requests.write().await;
        if !requests.contains_key(&request.id) {
            return Err(EngineError::NotFound {
                entity: "leave request".to_string(),
                id: request.id,
            });
        }
        requests.insert(request.id.clone(), request.clone());
        Ok(request)
    }
}

/// Loans keyed by id.
#[derive(Default)]
pub struct InMemoryLoanStore {
    loans: RwLock<HashMap<String, Loan>>,
}

impl InMemoryLoanStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a loan, replacing any with the same id.
    pub async fn insert(&self, loan: Loan) {
        let mut loans = self.loans.write().await;
        loans.insert(loan.id.clone(), loan);
    }
}

#[async_trait]
impl LoanStore for InMemoryLoanStore {
    async fn get_active_by_employee(
        &self,
        employee_id: &str,
        period_start: NaiveDate,
    ) -> EngineResult<Vec<Loan>> {
        let loans = self.loans.read().await;
        let mut matching: Vec<Loan> = loans
            .values()
            .filter(|l| l.employee_id == employee_id && l.is_active_for(period_start))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(matching)
    }
}

/// Payroll records keyed by id.
#[derive(Default)]
pub struct InMemoryPayrollStore {
    records: RwLock<HashMap<String, PayrollRecord>>,
}

impl InMemoryPayrollStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PayrollStore for InMemoryPayrollStore {
    async fn get(&self, id: &str) -> EngineResult<Option<PayrollRecord>> {
        let records = self.records.read().await;
        Ok(records.get(id).cloned())
    }

    async fn find_for_period(
        &self,
        employee_id: &str,
        period: PayrollPeriod,
        exclude_statuses: &[PayrollStatus],
    ) -> EngineResult<Vec<PayrollRecord>> {
        let records = self.records.read().await;
        let mut matching: Vec<PayrollRecord> = records
            .values()
            .filter(|r| {
                r.employee_id == employee_id
                    && r.period == period
                    && !exclude_statuses.contains(&r.status)
            })
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(matching)
    }

    async fn insert(&self, record: PayrollRecord) -> EngineResult<PayrollRecord> {
        let mut records = self.records.write().await;
        // One non-cancelled record per (employee, period).
        if let Some(existing) = records.values().find(|r| {
            r.employee_id == record.employee_id
                && r.period == record.period
                && r.status != PayrollStatus::Cancelled
        }) {
            return Err(duplicate_payroll_error(existing));
        }
        records.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn update(&self, record: PayrollRecord) -> EngineResult<PayrollRecord> {
        let mut records = self.records.write().await;
        if !records.contains_key(&record.id) {
            return Err(EngineError::NotFound {
                entity: "payroll record".to_string(),
                id: record.id,
            });
        }
        records.insert(record.id.clone(), record.clone());
        Ok(record)
    }
}

/// Leave quotas keyed by employee id.
#[derive(Default)]
pub struct InMemoryLeaveQuotaStore {
    quotas: RwLock<HashMap<String, LeaveQuota>>,
}

impl InMemoryLeaveQuotaStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a quota, replacing any for the same employee.
    pub async fn insert(&self, quota: LeaveQuota) {
        let mut quotas = self.quotas.write().await;
        quotas.insert(quota.employee_id.clone(), quota);
    }
}

#[async_trait]
impl LeaveQuotaStore for InMemoryLeaveQuotaStore {
    async fn get(&self, employee_id: &str) -> EngineResult<Option<LeaveQuota>> {
        let quotas = self.quotas.read().await;
        Ok(quotas.get(employee_id).cloned())
    }

    async fn increment_used(&self, employee_id: &str, days: u32) -> EngineResult<LeaveQuota> {
        let mut quotas = self.quotas.write().await;
        let quota = quotas
            .get_mut(employee_id)
            .ok_or_else(|| EngineError::NotFound {
                entity: "leave quota".to_string(),
                id: employee_id.to_string(),
            })?;

        if days > quota.remaining_days {
            return Err(EngineError::PolicyViolation {
                message: format!(
                    "consuming {days} leave days would overdraw the remaining {} for employee '{employee_id}'",
                    quota.remaining_days
                ),
            });
        }

        quota.used_days += days;
        quota.remaining_days = quota.total_days - quota.used_days;
        Ok(quota.clone())
    }
}

/// Employees keyed by id.
#[derive(Default)]
pub struct InMemoryEmployeeDirectory {
    employees: RwLock<HashMap<String, Employee>>,
}

impl InMemoryEmployeeDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an employee, replacing any with the same id.
    pub async fn insert(&self, employee: Employee) {
        let mut employees = self.employees.write().await;
        employees.insert(employee.id.clone(), employee);
    }
}

#[async_trait]
impl EmployeeDirectory for InMemoryEmployeeDirectory {
    async fn get(&self, employee_id: &str) -> EngineResult<Option<Employee>> {
        let employees = self.employees.read().await;
        Ok(employees.get(employee_id).cloned())
    }
}

/// Sink that retains every emitted escalation, for assertions.
#[derive(Default)]
pub struct RecordingEscalationSink {
    events: RwLock<Vec<Escalation>>,
}

impl RecordingEscalationSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every escalation emitted so far, in order.
    pub async fn emitted(&self) -> Vec<Escalation> {
        self.events.read().await.clone()
    }
}

#[async_trait]
impl EscalationSink for RecordingEscalationSink {
    async fn emit(&self, escalation: Escalation) {
        let mut events = self.events.write().await;
        events.push(escalation);
    }
}

/// Sink that logs escalations through `tracing` and drops them.
#[derive(Default)]
pub struct LoggingEscalationSink;

#[async_trait]
impl EscalationSink for LoggingEscalationSink {
    async fn emit(&self, escalation: Escalation) {
        info!(
            employee_id = %escalation.employee_id,
            kind = escalation.kind.code(),
            trigger_value = escalation.trigger_value,
            period = %escalation.period,
            "escalation emitted"
        );
    }
}

/// Gate that verifies every punch.
#[derive(Default)]
pub struct OpenGate;

#[async_trait]
impl VerificationGate for OpenGate {
    async fn verify(&self, _employee_id: &str) -> EngineResult<()> {
        Ok(())
    }
}
