//! Payroll record creation and lifecycle.
//!
//! Builds one net-salary record per employee and payroll period:
//! `net = base + allowances + overtime_hours * overtime_rate - deductions`,
//! exact to the currency's smallest unit. Creation is rejected when the
//! employee has no linked system account, or when a non-cancelled record
//! already covers the period; a pending duplicate and a paid duplicate are
//! distinct rejections so callers can present different messages.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{PayrollPeriod, PayrollRecord, PayrollStatus};
use crate::store::{EmployeeDirectory, PayrollStore};

/// The inputs to one payroll creation.
#[derive(Debug, Clone)]
pub struct PayrollInput {
    /// The employee the record is for.
    pub employee_id: String,
    /// The payroll period covered.
    pub period: PayrollPeriod,
    /// Base salary for the period.
    pub base_salary: Decimal,
    /// Allowances added on top of base salary.
    pub allowances: Decimal,
    /// Total deductions, as produced by the deduction calculator.
    pub deductions: Decimal,
    /// Overtime hours worked in the period.
    pub overtime_hours: Decimal,
    /// Pay rate per overtime hour.
    pub overtime_rate: Decimal,
}

/// Computes the net salary for a set of payroll inputs.
///
/// Pure arithmetic on [`Decimal`]; no rounding is applied.
///
/// # Example
///
/// ```
/// use attendance_engine::engine::net_salary;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let net = net_salary(
///     Decimal::from_str("5000000").unwrap(),
///     Decimal::from_str("250000").unwrap(),
///     Decimal::from_str("10").unwrap(),
///     Decimal::from_str("25000").unwrap(),
///     Decimal::from_str("350000").unwrap(),
/// );
/// assert_eq!(net, Decimal::from_str("5150000").unwrap());
/// ```
pub fn net_salary(
    base_salary: Decimal,
    allowances: Decimal,
    overtime_hours: Decimal,
    overtime_rate: Decimal,
    deductions: Decimal,
) -> Decimal {
    base_salary + allowances + overtime_hours * overtime_rate - deductions
}

/// Creates payroll records and drives their pending → paid/cancelled
/// lifecycle.
pub struct PayrollComputer {
    payroll: Arc<dyn PayrollStore>,
    directory: Arc<dyn EmployeeDirectory>,
}

impl PayrollComputer {
    /// Creates the computer over the given store and employee directory.
    pub fn new(payroll: Arc<dyn PayrollStore>, directory: Arc<dyn EmployeeDirectory>) -> Self {
        Self { payroll, directory }
    }

    /// Creates a pending payroll record.
    ///
    /// # Errors
    ///
    /// - [`EngineError::NotFound`] if the employee is unknown to the
    ///   directory.
    /// - [`EngineError::AccountNotLinked`] if the employee has no linked
    ///   system account.
    /// - [`EngineError::DuplicatePendingPayroll`] if a pending record
    ///   already covers the period.
    /// - [`EngineError::PayrollAlreadyPaid`] if a paid record already covers
    ///   the period. A cancelled record does not block creation.
    pub async fn create(&self, input: PayrollInput) -> EngineResult<PayrollRecord> {
        let employee = self
            .directory
            .get(&input.employee_id)
            .await?
            .ok_or_else(|| EngineError::NotFound {
                entity: "employee".to_string(),
                id: input.employee_id.clone(),
            })?;

        if !employee.has_linked_account() {
            return Err(EngineError::AccountNotLinked {
                employee_id: input.employee_id.clone(),
            });
        }

        // Fast-fail pre-check; the store's uniqueness rule over non-cancelled
        // rows remains authoritative under concurrent submission.
        let existing = self
            .payroll
            .find_for_period(&input.employee_id, input.period, &[PayrollStatus::Cancelled])
            .await?;
        if let Some(record) = existing.first() {
            return Err(duplicate_payroll_error(record));
        }

        let record = PayrollRecord {
            id: Uuid::new_v4().to_string(),
            employee_id: input.employee_id,
            period: input.period,
            base_salary: input.base_salary,
            allowances: input.allowances,
            deductions: input.deductions,
            net_salary: net_salary(
                input.base_salary,
                input.allowances,
                input.overtime_hours,
                input.overtime_rate,
                input.deductions,
            ),
            status: PayrollStatus::Pending,
            pay_date: None,
        };

        self.payroll.insert(record).await
    }

    /// Marks a pending record as paid, recording the pay date.
    ///
    /// # Errors
    ///
    /// - [`EngineError::NotFound`] if no record has the given id.
    /// - [`EngineError::InvalidTransition`] if the record is not pending.
    pub async fn mark_as_paid(&self, id: &str, pay_date: NaiveDate) -> EngineResult<PayrollRecord> {
        let record = self.get_record(id).await?;
        let paid = record.mark_as_paid(pay_date)?;
        self.payroll.update(paid).await
    }

    /// Cancels a pending record.
    ///
    /// # Errors
    ///
    /// - [`EngineError::NotFound`] if no record has the given id.
    /// - [`EngineError::InvalidTransition`] if the record is not pending.
    pub async fn cancel(&self, id: &str) -> EngineResult<PayrollRecord> {
        let record = self.get_record(id).await?;
        let cancelled = record.cancel()?;
        self.payroll.update(cancelled).await
    }

    async fn get_record(&self, id: &str) -> EngineResult<PayrollRecord> {
        self.payroll
            .get(id)
            .await?
            .ok_or_else(|| EngineError::NotFound {
                entity: "payroll record".to_string(),
                id: id.to_string(),
            })
    }
}

/// Maps an existing non-cancelled record to the matching duplicate
/// rejection.
pub(crate) fn duplicate_payroll_error(record: &PayrollRecord) -> EngineError {
    match record.status {
        PayrollStatus::Paid => EngineError::PayrollAlreadyPaid {
            employee_id: record.employee_id.clone(),
            period: record.period,
        },
        _ => EngineError::DuplicatePendingPayroll {
            employee_id: record.employee_id.clone(),
            period: record.period,
        },
    }
}
