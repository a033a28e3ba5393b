//! HTTP request handlers for the attendance engine API.
//!
//! This module contains the handler functions for all endpoints. Handlers
//! are thin: convert JSON to domain types, call one engine service, map the
//! outcome. The one composite flow, payroll creation, reads the employee and
//! the deduction aggregate first and writes nothing if either read fails.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::engine::{EscalationPolicy, PayrollInput};
use crate::error::EngineError;
use crate::models::{LeaveStatus, PayrollPeriod};

use super::request::{
    ApproveLeaveRequest, CheckInRequest, CheckOutRequest, ComplianceQuery, CreatePayrollRequest,
    DeductionQuery, LateReturnQuery, MarkPaidRequest,
};
use super::response::{
    ApiError, ApiErrorResponse, CheckInResponse, ComplianceResponse, LateReturnEntry,
    LateReturnsResponse, LeaveDecisionResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/attendance/check-in", post(check_in_handler))
        .route("/attendance/check-out", post(check_out_handler))
        .route("/compliance/:employee_id", get(compliance_handler))
        .route("/leave/late-returns", get(late_returns_handler))
        .route("/leave/:id/approve", post(approve_leave_handler))
        .route("/leave/:id/reject", post(reject_leave_handler))
        .route("/payroll", post(create_payroll_handler))
        .route("/payroll/deductions/:employee_id", get(deductions_handler))
        .route("/payroll/:id/pay", post(pay_payroll_handler))
        .route("/payroll/:id/cancel", post(cancel_payroll_handler))
        .with_state(state)
}

/// Handler for `POST /attendance/check-in`.
async fn check_in_handler(
    State(state): State<AppState>,
    payload: Result<Json<CheckInRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing check-in request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => ApiError::new(
                    "MISSING_CONTENT_TYPE",
                    "Content-Type must be application/json",
                ),
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (StatusCode::BAD_REQUEST, Json(error)).into_response();
        }
    };

    match state
        .recorder()
        .check_in(&request.employee_id, request.date, request.time, request.location)
        .await
    {
        Ok(outcome) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %request.employee_id,
                status = outcome.record.status.as_str(),
                escalated = outcome.escalation.is_some(),
                "Check-in recorded"
            );
            (
                StatusCode::CREATED,
                Json(CheckInResponse {
                    record: outcome.record,
                    escalation: outcome.escalation,
                }),
            )
                .into_response()
        }
        Err(error) => {
            warn!(correlation_id = %correlation_id, error = %error, "Check-in failed");
            ApiErrorResponse::from(error).into_response()
        }
    }
}

/// Handler for `POST /attendance/check-out`.
async fn check_out_handler(
    State(state): State<AppState>,
    Json(request): Json<CheckOutRequest>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let record = state
        .recorder()
        .check_out(&request.employee_id, request.date, request.time)
        .await?;
    Ok(Json(record))
}

/// Handler for `GET /compliance/{employee_id}`.
///
/// Evaluation-time run of both escalation policies. Emission stays with the
/// check-in flow; this endpoint only reports.
async fn compliance_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    Query(query): Query<ComplianceQuery>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let weekly = state
        .weekly_policy()
        .evaluate(&employee_id, query.as_of)
        .await?;
    let monthly = state
        .monthly_policy()
        .evaluate(&employee_id, query.as_of)
        .await?;
    Ok(Json(ComplianceResponse { weekly, monthly }))
}

/// Handler for `GET /leave/late-returns`.
async fn late_returns_handler(
    State(state): State<AppState>,
    Query(query): Query<LateReturnQuery>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let requests = match &query.employee_id {
        Some(employee_id) => {
            state
                .stores()
                .leaves
                .get_approved_by_employee(employee_id)
                .await?
        }
        None => state.stores().leaves.get_all().await?,
    };

    let mut late_returns = Vec::new();
    for request in requests
        .iter()
        .filter(|r| r.status == LeaveStatus::Approved)
    {
        let outcome = state.leave_returns().check(request, query.today).await?;
        if outcome.is_late {
            late_returns.push(LateReturnEntry {
                request_id: request.id.clone(),
                employee_id: request.employee_id.clone(),
                end_date: request.end_date,
                return_date: outcome.return_date,
            });
        }
    }

    Ok(Json(LateReturnsResponse { late_returns }))
}

/// Handler for `POST /leave/{id}/approve`.
async fn approve_leave_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ApproveLeaveRequest>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let leave = state
        .stores()
        .leaves
        .get(&id)
        .await?
        .ok_or_else(|| EngineError::NotFound {
            entity: "leave request".to_string(),
            id: id.clone(),
        })?;

    let (approved, quota) = state
        .quotas()
        .approve(leave, &request.approved_by, request.approved_at)
        .await?;
    let persisted = state.stores().leaves.update(approved).await?;

    info!(
        request_id = %id,
        employee_id = %persisted.employee_id,
        remaining_days = quota.remaining_days,
        "Leave approved"
    );
    Ok(Json(LeaveDecisionResponse {
        request: persisted,
        quota: Some(quota),
    }))
}

/// Handler for `POST /leave/{id}/reject`.
async fn reject_leave_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let leave = state
        .stores()
        .leaves
        .get(&id)
        .await?
        .ok_or_else(|| EngineError::NotFound {
            entity: "leave request".to_string(),
            id: id.clone(),
        })?;

    let rejected = leave.reject()?;
    let persisted = state.stores().leaves.update(rejected).await?;
    Ok(Json(LeaveDecisionResponse {
        request: persisted,
        quota: None,
    }))
}

/// Handler for `GET /payroll/deductions/{employee_id}`.
async fn deductions_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    Query(query): Query<DeductionQuery>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let period = PayrollPeriod::new(query.month, query.year)?;
    let result = state.deductions().compute(&employee_id, period).await?;
    Ok(Json(result))
}

/// Handler for `POST /payroll`.
///
/// Reads the employee's base salary and the period's deduction aggregate,
/// then creates the pending record. A failed read aborts before anything is
/// written.
async fn create_payroll_handler(
    State(state): State<AppState>,
    Json(request): Json<CreatePayrollRequest>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let period = PayrollPeriod::new(request.month, request.year)?;

    let employee = state
        .stores()
        .directory
        .get(&request.employee_id)
        .await?
        .ok_or_else(|| EngineError::NotFound {
            entity: "employee".to_string(),
            id: request.employee_id.clone(),
        })?;

    let deductions = state
        .deductions()
        .compute(&request.employee_id, period)
        .await?;

    let record = state
        .payroll()
        .create(PayrollInput {
            employee_id: request.employee_id,
            period,
            base_salary: employee.salary,
            allowances: request.allowances,
            deductions: deductions.total,
            overtime_hours: request.overtime_hours,
            overtime_rate: request.overtime_rate,
        })
        .await?;

    info!(
        correlation_id = %correlation_id,
        employee_id = %record.employee_id,
        period = %record.period,
        net_salary = %record.net_salary,
        "Payroll record created"
    );
    Ok((StatusCode::CREATED, Json(record)))
}

/// Handler for `POST /payroll/{id}/pay`.
async fn pay_payroll_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<MarkPaidRequest>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let record = state.payroll().mark_as_paid(&id, request.pay_date).await?;
    Ok(Json(record))
}

/// Handler for `POST /payroll/{id}/cancel`.
async fn cancel_payroll_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let record = state.payroll().cancel(&id).await?;
    Ok(Json(record))
}
