//! Response types for the attendance engine API.
//!
//! This module defines the success payloads, the error response structure
//! and the mapping from [`EngineError`] to HTTP statuses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{
    AttendanceRecord, Escalation, LeaveQuota, LeaveRequest,
};

/// Response body for `POST /attendance/check-in`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckInResponse {
    /// The persisted attendance record.
    pub record: AttendanceRecord,
    /// The SP1 raised by this punch, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escalation: Option<Escalation>,
}

/// Response body for `GET /compliance/{employee_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceResponse {
    /// Outcome of the weekly late-minutes policy.
    pub weekly: Option<Escalation>,
    /// Outcome of the monthly late-count policy.
    pub monthly: Option<Escalation>,
}

/// One flagged request in `GET /leave/late-returns`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LateReturnEntry {
    /// The flagged leave request.
    pub request_id: String,
    /// The employee on leave.
    pub employee_id: String,
    /// The leave's end date.
    pub end_date: NaiveDate,
    /// The first check-in after the leave, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_date: Option<NaiveDate>,
}

/// Response body for `GET /leave/late-returns`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LateReturnsResponse {
    /// Every approved request currently flagged late.
    pub late_returns: Vec<LateReturnEntry>,
}

/// Response body for the leave approval endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveDecisionResponse {
    /// The transitioned request.
    pub request: LeaveRequest,
    /// The quota after the decision; only approvals change it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quota: Option<LeaveQuota>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let (status, code) = match &error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParse { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR")
            }
            EngineError::Validation { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            EngineError::AlreadyCheckedIn { .. } => (StatusCode::CONFLICT, "ALREADY_CHECKED_IN"),
            EngineError::AlreadyCheckedOut { .. } => (StatusCode::CONFLICT, "ALREADY_CHECKED_OUT"),
            EngineError::CheckInNotFound { .. } => (StatusCode::NOT_FOUND, "CHECK_IN_NOT_FOUND"),
            EngineError::AccountNotLinked { .. } => (StatusCode::NOT_FOUND, "ACCOUNT_NOT_LINKED"),
            EngineError::DuplicatePendingPayroll { .. } => {
                (StatusCode::CONFLICT, "DUPLICATE_PENDING_PAYROLL")
            }
            EngineError::PayrollAlreadyPaid { .. } => {
                (StatusCode::CONFLICT, "PAYROLL_ALREADY_PAID")
            }
            EngineError::InvalidTransition { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_TRANSITION")
            }
            EngineError::PolicyViolation { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "POLICY_VIOLATION")
            }
            EngineError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            EngineError::Store { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "STORE_ERROR"),
        };

        ApiErrorResponse {
            status,
            error: ApiError::new(code, error.to_string()),
        }
    }
}
