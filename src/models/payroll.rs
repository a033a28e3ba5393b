//! Payroll period and payroll record models.
//!
//! A payroll period is a (month, year) bucket identifying one salary run per
//! employee. A payroll record is created pending and transitions exactly once
//! to paid or cancelled; both are terminal. At most one non-cancelled record
//! may exist per (employee, period).

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A (month, year) payroll bucket.
///
/// # Example
///
/// ```
/// use attendance_engine::models::PayrollPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayrollPeriod::new(2, 2024).unwrap();
/// assert_eq!(period.first_day(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
/// assert_eq!(period.last_day(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// assert_eq!(period.to_string(), "2024-02");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayrollPeriod {
    /// The month, 1 through 12.
    pub month: u32,
    /// The calendar year.
    pub year: i32,
}

impl PayrollPeriod {
    /// Creates a period, validating the month.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `month` is not in 1..=12.
    pub fn new(month: u32, year: i32) -> EngineResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::Validation {
                field: "month".to_string(),
                message: format!("{month} is not a calendar month"),
            });
        }
        Ok(Self { month, year })
    }

    /// Returns the first day of the period.
    pub fn first_day(self) -> NaiveDate {
        // Month is validated at construction.
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or(NaiveDate::MIN)
    }

    /// Returns the last day of the period.
    pub fn last_day(self) -> NaiveDate {
        let (next_month, next_year) = if self.month == 12 {
            (1, self.year + 1)
        } else {
            (self.month + 1, self.year)
        };
        NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .unwrap_or(NaiveDate::MAX)
            .pred_opt()
            .unwrap_or(NaiveDate::MAX)
    }

    /// Returns true if `date` falls inside the period.
    pub fn contains(self, date: NaiveDate) -> bool {
        date >= self.first_day() && date <= self.last_day()
    }
}

impl fmt::Display for PayrollPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// The lifecycle state of a payroll record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayrollStatus {
    /// Created, awaiting payment or cancellation.
    Pending,
    /// Paid out; terminal.
    Paid,
    /// Cancelled before payment; terminal.
    Cancelled,
}

impl PayrollStatus {
    /// Returns the snake_case wire name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            PayrollStatus::Pending => "pending",
            PayrollStatus::Paid => "paid",
            PayrollStatus::Cancelled => "cancelled",
        }
    }
}

/// One employee's salary run for one payroll period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// Unique identifier for the record.
    pub id: String,
    /// The employee the record belongs to.
    pub employee_id: String,
    /// The payroll period covered.
    pub period: PayrollPeriod,
    /// The base salary for the period.
    pub base_salary: Decimal,
    /// Allowances added on top of base salary.
    pub allowances: Decimal,
    /// Total deductions subtracted from the gross.
    pub deductions: Decimal,
    /// The resulting net salary.
    pub net_salary: Decimal,
    /// The lifecycle state of the record.
    pub status: PayrollStatus,
    /// The date payment was made, once paid.
    #[serde(default)]
    pub pay_date: Option<NaiveDate>,
}

impl PayrollRecord {
    /// Transitions the record from pending to paid, recording the pay date.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidTransition`] if the record is not
    /// pending.
    pub fn mark_as_paid(mut self, pay_date: NaiveDate) -> EngineResult<Self> {
        self.ensure_pending("paid")?;
        self.status = PayrollStatus::Paid;
        self.pay_date = Some(pay_date);
        Ok(self)
    }

    /// Transitions the record from pending to cancelled.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidTransition`] if the record is not
    /// pending.
    pub fn cancel(mut self) -> EngineResult<Self> {
        self.ensure_pending("cancelled")?;
        self.status = PayrollStatus::Cancelled;
        Ok(self)
    }

    fn ensure_pending(&self, to: &str) -> EngineResult<()> {
        if self.status != PayrollStatus::Pending {
            return Err(EngineError::InvalidTransition {
                entity: "payroll record".to_string(),
                from: self.status.as_str().to_string(),
                to: to.to_string(),
            });
        }
        Ok(())
    }
}
