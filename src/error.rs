//! Error types for the attendance and payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during compliance and payroll
//! processing.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::PayrollPeriod;

/// The main error type for the attendance and payroll engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application. Variants fall
/// into five families: validation, duplicate operations, missing records,
/// policy violations, and opaque store transport failures. The engine never
/// retries on its own; a store failure aborts the containing operation and
/// the caller owns any retry of the whole operation.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::AccountNotLinked {
///     employee_id: "emp_001".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Employee 'emp_001' has no linked system account"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Settings file was not found at the specified path.
    #[error("Settings file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Settings file could not be parsed.
    #[error("Failed to parse settings file '{path}': {message}")]
    ConfigParse {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A field in a request or record was malformed or missing.
    #[error("Invalid field '{field}': {message}")]
    Validation {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A check-in already exists for the employee on this date.
    #[error("Employee '{employee_id}' already checked in on {date}")]
    AlreadyCheckedIn {
        /// The employee that attempted the duplicate punch.
        employee_id: String,
        /// The date of the existing record.
        date: NaiveDate,
    },

    /// A check-out already exists for the employee on this date.
    #[error("Employee '{employee_id}' already checked out on {date}")]
    AlreadyCheckedOut {
        /// The employee that attempted the duplicate punch.
        employee_id: String,
        /// The date of the existing record.
        date: NaiveDate,
    },

    /// No check-in exists to check out against.
    #[error("No check-in found for employee '{employee_id}' on {date}")]
    CheckInNotFound {
        /// The employee that attempted to check out.
        employee_id: String,
        /// The date with no check-in record.
        date: NaiveDate,
    },

    /// The employee has no linked system account.
    #[error("Employee '{employee_id}' has no linked system account")]
    AccountNotLinked {
        /// The employee without an account link.
        employee_id: String,
    },

    /// A pending payroll record already exists for this employee and period.
    #[error("A pending payroll record already exists for employee '{employee_id}' in {period}")]
    DuplicatePendingPayroll {
        /// The employee the record belongs to.
        employee_id: String,
        /// The payroll period already covered.
        period: PayrollPeriod,
    },

    /// A paid payroll record already exists for this employee and period.
    #[error("Payroll for employee '{employee_id}' in {period} has already been paid")]
    PayrollAlreadyPaid {
        /// The employee the record belongs to.
        employee_id: String,
        /// The payroll period already paid.
        period: PayrollPeriod,
    },

    /// A lifecycle transition was attempted from a state that does not allow it.
    #[error("Invalid {entity} transition from '{from}' to '{to}'")]
    InvalidTransition {
        /// The kind of record being transitioned.
        entity: String,
        /// The current state.
        from: String,
        /// The requested state.
        to: String,
    },

    /// A business rule was violated.
    #[error("Policy violation: {message}")]
    PolicyViolation {
        /// A description of the violated rule.
        message: String,
    },

    /// A required record was not found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of record that was looked up.
        entity: String,
        /// The identifier that was not found.
        id: String,
    },

    /// An underlying store read or write failed.
    ///
    /// Opaque transport failure: fatal to the current operation. Callers may
    /// retry the whole operation, never a partial step.
    #[error("Store failure: {message}")]
    Store {
        /// A description of the transport failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
