//! Employee loan model.
//!
//! A loan is created pending and transitions to approved or rejected. An
//! approved loan is drained as payroll periods apply installments against
//! `remaining_amount`; when the balance reaches zero the loan is paid off.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The lifecycle state of a loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    /// Awaiting a decision.
    Pending,
    /// Approved and being repaid through payroll deductions.
    Approved,
    /// Rejected; never repaid.
    Rejected,
    /// Fully repaid.
    PaidOff,
}

impl LoanStatus {
    /// Returns the snake_case wire name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            LoanStatus::Pending => "pending",
            LoanStatus::Approved => "approved",
            LoanStatus::Rejected => "rejected",
            LoanStatus::PaidOff => "paid_off",
        }
    }
}

/// An employee loan repaid through fixed payroll installments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    /// Unique identifier for the loan.
    pub id: String,
    /// The employee the loan was granted to.
    pub employee_id: String,
    /// The principal amount.
    pub amount: Decimal,
    /// The outstanding balance.
    pub remaining_amount: Decimal,
    /// The fixed amount deducted each payroll period.
    pub installment_amount: Decimal,
    /// The date repayments begin.
    pub start_date: NaiveDate,
    /// The lifecycle state of the loan.
    pub status: LoanStatus,
}

impl Loan {
    /// Creates a pending loan with the full principal outstanding.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PolicyViolation`] if the installment exceeds
    /// the principal, or [`EngineError::Validation`] if either amount is not
    /// positive.
    pub fn new(
        id: impl Into<String>,
        employee_id: impl Into<String>,
        amount: Decimal,
        installment_amount: Decimal,
        start_date: NaiveDate,
    ) -> EngineResult<Self> {
        if amount <= Decimal::ZERO {
            return Err(EngineError::Validation {
                field: "amount".to_string(),
                message: "loan principal must be positive".to_string(),
            });
        }
        if installment_amount <= Decimal::ZERO {
            return Err(EngineError::Validation {
                field: "installment_amount".to_string(),
                message: "installment must be positive".to_string(),
            });
        }
        if installment_amount > amount {
            return Err(EngineError::PolicyViolation {
                message: format!(
                    "installment {installment_amount} exceeds loan principal {amount}"
                ),
            });
        }

        Ok(Self {
            id: id.into(),
            employee_id: employee_id.into(),
            amount,
            remaining_amount: amount,
            installment_amount,
            start_date,
            status: LoanStatus::Pending,
        })
    }

    /// Returns true if the loan currently produces a payroll deduction.
    ///
    /// Active means approved, with a balance outstanding, and with repayments
    /// started on or before `period_start`.
    pub fn is_active_for(&self, period_start: NaiveDate) -> bool {
        self.status == LoanStatus::Approved
            && self.remaining_amount > Decimal::ZERO
            && self.start_date <= period_start
    }

    /// Applies one installment against the outstanding balance.
    ///
    /// The final installment is capped at the remaining balance; a drained
    /// loan transitions to [`LoanStatus::PaidOff`].
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidTransition`] if the loan is not
    /// approved.
    pub fn apply_installment(mut self) -> EngineResult<Self> {
        if self.status != LoanStatus::Approved {
            return Err(EngineError::InvalidTransition {
                entity: "loan".to_string(),
                from: self.status.as_str().to_string(),
                to: "repayment".to_string(),
            });
        }

        let payment = self.installment_amount.min(self.remaining_amount);
        self.remaining_amount -= payment;
        if self.remaining_amount == Decimal::ZERO {
            self.status = LoanStatus::PaidOff;
        }
        Ok(self)
    }
}
