//! Request types for the attendance engine API.
//!
//! This module defines the JSON request bodies and query parameters for the
//! engine's endpoints. Dates and "today" are always explicit request data,
//! never read from the wall clock, so behavior is deterministic and
//! testable.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::TimeOfDay;

/// Request body for `POST /attendance/check-in`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckInRequest {
    /// The employee punching in.
    pub employee_id: String,
    /// The calendar date of the punch.
    pub date: NaiveDate,
    /// The punch time.
    pub time: TimeOfDay,
    /// Free-form location captured with the punch.
    #[serde(default)]
    pub location: Option<String>,
}

/// Request body for `POST /attendance/check-out`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckOutRequest {
    /// The employee punching out.
    pub employee_id: String,
    /// The calendar date of the punch.
    pub date: NaiveDate,
    /// The punch time.
    pub time: TimeOfDay,
}

/// Query parameters for `GET /compliance/{employee_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ComplianceQuery {
    /// The date the policies are evaluated as of.
    pub as_of: NaiveDate,
}

/// Query parameters for `GET /leave/late-returns`.
#[derive(Debug, Clone, Deserialize)]
pub struct LateReturnQuery {
    /// The date the scan treats as today.
    pub today: NaiveDate,
    /// Restrict the scan to one employee's approved requests.
    #[serde(default)]
    pub employee_id: Option<String>,
}

/// Request body for `POST /leave/{id}/approve`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApproveLeaveRequest {
    /// Who is approving the request.
    pub approved_by: String,
    /// When the approval happened.
    pub approved_at: NaiveDateTime,
}

/// Query parameters for `GET /payroll/deductions/{employee_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct DeductionQuery {
    /// The payroll month, 1 through 12.
    pub month: u32,
    /// The payroll year.
    pub year: i32,
}

/// Request body for `POST /payroll`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePayrollRequest {
    /// The employee the record is for.
    pub employee_id: String,
    /// The payroll month, 1 through 12.
    pub month: u32,
    /// The payroll year.
    pub year: i32,
    /// Allowances added on top of base salary.
    #[serde(default)]
    pub allowances: Decimal,
    /// Overtime hours worked in the period.
    #[serde(default)]
    pub overtime_hours: Decimal,
    /// Pay rate per overtime hour.
    #[serde(default)]
    pub overtime_rate: Decimal,
}

/// Request body for `POST /payroll/{id}/pay`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkPaidRequest {
    /// The date payment was made.
    pub pay_date: NaiveDate,
}
