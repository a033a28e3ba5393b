//! Payroll deduction aggregation.
//!
//! Computes the total deduction for one employee and payroll period: active
//! loan installments plus the lateness penalty, with an ordered
//! human-readable breakdown for audit display. The absent-day count is
//! computed and reported alongside but is not priced into the total,
//! matching upstream behavior.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::recorded_late_minutes;
use crate::error::EngineResult;
use crate::models::{AttendanceStatus, PayrollPeriod};
use crate::store::{AttendanceStore, LoanStore, SettingsProvider};

/// Fallback penalty per minute of lateness, in currency units, used when the
/// configured rate is unset or zero.
pub const DEFAULT_LATE_PENALTY_RATE_PER_MINUTE: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

/// The category of one deduction line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionCategory {
    /// Fixed installments of active loans.
    LoanInstallment,
    /// Penalty for accumulated late minutes.
    LatePenalty,
}

/// One human-readable line of the deduction breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionLine {
    /// The category of the line.
    pub category: DeductionCategory,
    /// Display text for audit screens.
    pub description: String,
    /// The amount the line contributes to the total.
    pub amount: Decimal,
}

/// The aggregated deductions for one employee and period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionResult {
    /// Sum of the breakdown line amounts.
    pub total: Decimal,
    /// Ordered breakdown: the loan line first, then the lateness line.
    pub breakdown: Vec<DeductionLine>,
    /// Absent days in the period. Reported for display only; not part of
    /// `total`.
    pub absent_count: u32,
}

/// Aggregates loan installments and lateness penalties for payroll periods.
pub struct DeductionCalculator {
    loans: Arc<dyn LoanStore>,
    attendance: Arc<dyn AttendanceStore>,
    settings: Arc<dyn SettingsProvider>,
}

impl DeductionCalculator {
    /// Creates the calculator over the given stores and settings.
    pub fn new(
        loans: Arc<dyn LoanStore>,
        attendance: Arc<dyn AttendanceStore>,
        settings: Arc<dyn SettingsProvider>,
    ) -> Self {
        Self {
            loans,
            attendance,
            settings,
        }
    }

    /// Computes the deduction total and breakdown for an employee and
    /// period.
    ///
    /// Reads both the loan store and the attendance store; if either read
    /// fails the whole computation aborts rather than treating the missing
    /// half as zero.
    pub async fn compute(
        &self,
        employee_id: &str,
        period: PayrollPeriod,
    ) -> EngineResult<DeductionResult> {
        let period_start = period.first_day();

        let loans = self
            .loans
            .get_active_by_employee(employee_id, period_start)
            .await?;
        let records = self
            .attendance
            .get_by_employee_in_range(employee_id, period_start, period.last_day())
            .await?;

        let loan_deduction: Decimal = loans.iter().map(|l| l.installment_amount).sum();

        let late_minutes: i64 = records.iter().map(recorded_late_minutes).sum();
        let rate = self.effective_penalty_rate();
        let late_penalty = Decimal::from(late_minutes) * rate;

        let absent_count = records
            .iter()
            .filter(|r| r.status == AttendanceStatus::Absent)
            .count() as u32;

        let breakdown = vec![
            DeductionLine {
                category: DeductionCategory::LoanInstallment,
                description: format!(
                    "Loan installments ({} active loan{})",
                    loans.len(),
                    if loans.len() == 1 { "" } else { "s" }
                ),
                amount: loan_deduction,
            },
            DeductionLine {
                category: DeductionCategory::LatePenalty,
                description: format!("Late arrival penalty ({late_minutes} min at {rate}/min)"),
                amount: late_penalty,
            },
        ];

        Ok(DeductionResult {
            total: loan_deduction + late_penalty,
            breakdown,
            absent_count,
        })
    }

    /// The penalty rate in force: the injected setting, or the documented
    /// fallback when that value is unset or zero.
    fn effective_penalty_rate(&self) -> Decimal {
        let configured = self.settings.late_penalty_rate_per_minute();
        if configured > Decimal::ZERO {
            configured
        } else {
            DEFAULT_LATE_PENALTY_RATE_PER_MINUTE
        }
    }
}
