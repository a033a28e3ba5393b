//! Comprehensive integration tests for the attendance engine API.
//!
//! This test suite covers the full engine surface end to end:
//! - Check-in classification and the tolerance window
//! - Duplicate punch rejection
//! - Check-out lifecycle
//! - Weekly and monthly SP1 escalation policies
//! - Late return-from-leave detection
//! - Deduction aggregation (loans + lateness, absences unpriced)
//! - Payroll creation, duplicate rejections, and the paid/cancelled
//!   lifecycle
//! - Leave approval and quota tracking
//! - Error cases

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use attendance_engine::api::{AppState, EngineStores, create_router};
use attendance_engine::config::EngineSettings;
use attendance_engine::models::{
    AttendanceRecord, AttendanceStatus, Employee, EmployeeStatus, LeaveQuota, LeaveRequest,
    LeaveStatus, LeaveType, Loan, LoanStatus, TimeOfDay,
};
use attendance_engine::store::{
    AttendanceStore, InMemoryAttendanceStore, InMemoryEmployeeDirectory, InMemoryLeaveQuotaStore,
    InMemoryLeaveStore, InMemoryLoanStore, InMemoryPayrollStore, LeaveQuotaStore, OpenGate,
    RecordingEscalationSink,
};

// =============================================================================
// Test Helpers
// =============================================================================

struct TestStores {
    attendance: Arc<InMemoryAttendanceStore>,
    leaves: Arc<InMemoryLeaveStore>,
    loans: Arc<InMemoryLoanStore>,
    quotas: Arc<InMemoryLeaveQuotaStore>,
    directory: Arc<InMemoryEmployeeDirectory>,
    sink: Arc<RecordingEscalationSink>,
}

fn create_test_state() -> (AppState, TestStores) {
    let attendance = Arc::new(InMemoryAttendanceStore::new());
    let leaves = Arc::new(InMemoryLeaveStore::new());
    let loans = Arc::new(InMemoryLoanStore::new());
    let payroll = Arc::new(InMemoryPayrollStore::new());
    let quotas = Arc::new(InMemoryLeaveQuotaStore::new());
    let directory = Arc::new(InMemoryEmployeeDirectory::new());
    let sink = Arc::new(RecordingEscalationSink::new());

    let settings = EngineSettings {
        late_penalty_rate_per_minute: Some(Decimal::from_str("1000").unwrap()),
    };

    let state = AppState::new(EngineStores {
        attendance: attendance.clone(),
        leaves: leaves.clone(),
        loans: loans.clone(),
        payroll,
        quotas: quotas.clone(),
        directory: directory.clone(),
        settings: Arc::new(settings),
        gate: Arc::new(OpenGate),
        sink: sink.clone(),
    });

    (
        state,
        TestStores {
            attendance,
            leaves,
            loans,
            quotas,
            directory,
            sink,
        },
    )
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn employee(id: &str, account_id: Option<&str>, salary: &str) -> Employee {
    Employee {
        id: id.to_string(),
        account_id: account_id.map(str::to_string),
        join_date: date("2023-06-01"),
        salary: Decimal::from_str(salary).unwrap(),
        status: EmployeeStatus::Active,
    }
}

fn pending_leave(id: &str, employee_id: &str, start: &str, end: &str, days: u32) -> LeaveRequest {
    LeaveRequest {
        id: id.to_string(),
        employee_id: employee_id.to_string(),
        leave_type: LeaveType::Annual,
        start_date: date(start),
        end_date: date(end),
        days,
        status: LeaveStatus::Pending,
        approved_by: None,
        approved_at: None,
    }
}

fn approved_leave(id: &str, employee_id: &str, start: &str, end: &str, days: u32) -> LeaveRequest {
    let mut request = pending_leave(id, employee_id, start, end, days);
    request.status = LeaveStatus::Approved;
    request.approved_by = Some("mgr_001".to_string());
    request
}

fn attendance_record(employee_id: &str, day: &str, check_in: Option<(u32, u32)>) -> AttendanceRecord {
    AttendanceRecord {
        id: format!("att_{employee_id}_{day}"),
        employee_id: employee_id.to_string(),
        date: date(day),
        check_in: check_in.map(|(h, m)| TimeOfDay::from_hm(h, m).unwrap()),
        check_out: None,
        status: if check_in.is_some() {
            AttendanceStatus::Present
        } else {
            AttendanceStatus::Absent
        },
        location: None,
        notes: None,
    }
}

async fn send(router: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => {
            builder = builder.header("Content-Type", "application/json");
            builder.body(Body::from(body.to_string())).unwrap()
        }
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn post(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(router, "POST", uri, Some(body)).await
}

async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
    send(router, "GET", uri, None).await
}

fn check_in_body(employee_id: &str, day: &str, time: &str) -> Value {
    json!({
        "employee_id": employee_id,
        "date": day,
        "time": time,
    })
}

// =============================================================================
// Check-in classification
// =============================================================================

#[tokio::test]
async fn test_check_in_within_tolerance_is_present() {
    let (state, _) = create_test_state();
    let router = create_router(state);

    // 08:05 is the last on-time minute for the 08:00 start.
    let (status, body) = post(
        router,
        "/attendance/check-in",
        check_in_body("emp_001", "2024-01-15", "08:05"),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["record"]["status"], "present");
    assert_eq!(body["record"]["check_in"], "08:05");
    assert!(body.get("escalation").is_none());
}

#[tokio::test]
async fn test_check_in_past_tolerance_is_late() {
    let (state, _) = create_test_state();
    let router = create_router(state);

    let (status, body) = post(
        router,
        "/attendance/check-in",
        check_in_body("emp_001", "2024-01-15", "08:06"),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["record"]["status"], "late");
}

#[tokio::test]
async fn test_duplicate_check_in_conflicts() {
    let (state, _) = create_test_state();
    let router = create_router(state);

    let (status, _) = post(
        router.clone(),
        "/attendance/check-in",
        check_in_body("emp_001", "2024-01-15", "08:00"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post(
        router,
        "/attendance/check-in",
        check_in_body("emp_001", "2024-01-15", "08:30"),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "ALREADY_CHECKED_IN");
}

#[tokio::test]
async fn test_malformed_time_is_bad_request() {
    let (state, _) = create_test_state();
    let router = create_router(state);

    let (status, _) = post(
        router,
        "/attendance/check-in",
        check_in_body("emp_001", "2024-01-15", "quarter past eight"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Check-out lifecycle
// =============================================================================

#[tokio::test]
async fn test_check_out_completes_the_day() {
    let (state, _) = create_test_state();
    let router = create_router(state);

    post(
        router.clone(),
        "/attendance/check-in",
        check_in_body("emp_001", "2024-01-15", "08:00"),
    )
    .await;

    let (status, body) = post(
        router,
        "/attendance/check-out",
        json!({"employee_id": "emp_001", "date": "2024-01-15", "time": "16:00"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["check_out"], "16:00");
    assert_eq!(body["check_in"], "08:00");
}

#[tokio::test]
async fn test_check_out_without_check_in_is_not_found() {
    let (state, _) = create_test_state();
    let router = create_router(state);

    let (status, body) = post(
        router,
        "/attendance/check-out",
        json!({"employee_id": "emp_001", "date": "2024-01-15", "time": "16:00"}),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "CHECK_IN_NOT_FOUND");
}

#[tokio::test]
async fn test_double_check_out_conflicts() {
    let (state, _) = create_test_state();
    let router = create_router(state);

    post(
        router.clone(),
        "/attendance/check-in",
        check_in_body("emp_001", "2024-01-15", "08:00"),
    )
    .await;
    post(
        router.clone(),
        "/attendance/check-out",
        json!({"employee_id": "emp_001", "date": "2024-01-15", "time": "16:00"}),
    )
    .await;

    let (status, body) = post(
        router,
        "/attendance/check-out",
        json!({"employee_id": "emp_001", "date": "2024-01-15", "time": "17:00"}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "ALREADY_CHECKED_OUT");
}

// =============================================================================
// Weekly escalation policy (minute-based)
// =============================================================================

#[tokio::test]
async fn test_weekly_sp1_fires_on_the_tipping_punch() {
    let (state, stores) = create_test_state();
    let router = create_router(state);

    // Monday 08:20 -> 15 late minutes. Not over the weekly 30 yet.
    let (_, body) = post(
        router.clone(),
        "/attendance/check-in",
        check_in_body("emp_001", "2024-01-15", "08:20"),
    )
    .await;
    assert!(body.get("escalation").is_none());

    // Tuesday 08:21 -> 16 more minutes: 31 total, SP1 fires with the punch.
    let (_, body) = post(
        router,
        "/attendance/check-in",
        check_in_body("emp_001", "2024-01-16", "08:21"),
    )
    .await;

    assert_eq!(body["escalation"]["kind"], "first_warning");
    assert_eq!(body["escalation"]["trigger_value"], 31);
    assert_eq!(body["escalation"]["period"], "2024-W03");

    // The sink saw exactly the one event.
    let emitted = stores.sink.emitted().await;
    assert_eq!(emitted.len(), 1);
    assert_eq!(emitted[0].trigger_value, 31);
}

#[tokio::test]
async fn test_lateness_in_previous_week_does_not_count() {
    let (state, _) = create_test_state();
    let router = create_router(state);

    // Friday of week 2: heavily late.
    post(
        router.clone(),
        "/attendance/check-in",
        check_in_body("emp_001", "2024-01-12", "09:00"),
    )
    .await;

    // Monday of week 3: slightly late; the weekly window restarts.
    let (_, body) = post(
        router,
        "/attendance/check-in",
        check_in_body("emp_001", "2024-01-15", "08:10"),
    )
    .await;
    assert!(body.get("escalation").is_none());
}

// =============================================================================
// Monthly escalation policy (count-based)
// =============================================================================

#[tokio::test]
async fn test_monthly_sp1_fires_past_five_late_days() {
    let (state, _) = create_test_state();
    let router = create_router(state);

    // Six barely-late days spread across the month: each adds only one
    // late minute, so the weekly minute policy stays quiet.
    for day in ["2024-01-02", "2024-01-03", "2024-01-09", "2024-01-10", "2024-01-16", "2024-01-17"]
    {
        let (status, _) = post(
            router.clone(),
            "/attendance/check-in",
            check_in_body("emp_001", day, "08:06"),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = get(router, "/compliance/emp_001?as_of=2024-01-31").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["monthly"]["kind"], "first_warning");
    assert_eq!(body["monthly"]["trigger_value"], 6);
    assert_eq!(body["monthly"]["period"], "2024-01");
    assert_eq!(body["weekly"], Value::Null);
}

#[tokio::test]
async fn test_monthly_policy_is_silent_at_five_late_days() {
    let (state, _) = create_test_state();
    let router = create_router(state);

    for day in ["2024-01-02", "2024-01-03", "2024-01-09", "2024-01-10", "2024-01-16"] {
        post(
            router.clone(),
            "/attendance/check-in",
            check_in_body("emp_001", day, "08:06"),
        )
        .await;
    }

    let (_, body) = get(router, "/compliance/emp_001?as_of=2024-01-31").await;
    assert_eq!(body["monthly"], Value::Null);
}

// =============================================================================
// Late return from leave
// =============================================================================

#[tokio::test]
async fn test_late_return_reports_first_check_in_after_end_date() {
    let (state, stores) = create_test_state();
    let router = create_router(state);

    stores
        .leaves
        .insert(approved_leave("leave_001", "emp_001", "2024-01-08", "2024-01-10", 3))
        .await;
    stores
        .attendance
        .insert(attendance_record("emp_001", "2024-01-12", Some((8, 0))))
        .await
        .unwrap();

    let (status, body) = get(router, "/leave/late-returns?today=2024-01-15").await;
    assert_eq!(status, StatusCode::OK);

    let entries = body["late_returns"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["request_id"], "leave_001");
    assert_eq!(entries[0]["return_date"], "2024-01-12");
}

#[tokio::test]
async fn test_never_returned_is_flagged_without_return_date() {
    let (state, stores) = create_test_state();
    let router = create_router(state);

    stores
        .leaves
        .insert(approved_leave("leave_001", "emp_001", "2024-01-08", "2024-01-10", 3))
        .await;

    let (_, body) = get(router, "/leave/late-returns?today=2024-01-15").await;
    let entries = body["late_returns"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].get("return_date").is_none());
}

#[tokio::test]
async fn test_late_returns_can_be_scoped_to_one_employee() {
    let (state, stores) = create_test_state();
    let router = create_router(state);

    stores
        .leaves
        .insert(approved_leave("leave_001", "emp_001", "2024-01-08", "2024-01-10", 3))
        .await;
    stores
        .leaves
        .insert(approved_leave("leave_002", "emp_002", "2024-01-08", "2024-01-10", 3))
        .await;

    let (status, body) = get(
        router,
        "/leave/late-returns?today=2024-01-15&employee_id=emp_002",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let entries = body["late_returns"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["employee_id"], "emp_002");
}

#[tokio::test]
async fn test_leave_still_running_is_not_flagged() {
    let (state, stores) = create_test_state();
    let router = create_router(state);

    stores
        .leaves
        .insert(approved_leave("leave_001", "emp_001", "2024-01-08", "2024-01-10", 3))
        .await;

    // Today is the end date itself: the day has not fully elapsed.
    let (_, body) = get(router, "/leave/late-returns?today=2024-01-10").await;
    assert_eq!(body["late_returns"].as_array().unwrap().len(), 0);
}

// =============================================================================
// Deductions
// =============================================================================

#[tokio::test]
async fn test_deductions_combine_loans_and_lateness() {
    let (state, stores) = create_test_state();
    let router = create_router(state);

    let mut loan = Loan::new(
        "loan_001",
        "emp_001",
        Decimal::from_str("1200000").unwrap(),
        Decimal::from_str("100000").unwrap(),
        date("2023-12-01"),
    )
    .unwrap();
    loan.status = LoanStatus::Approved;
    stores.loans.insert(loan).await;

    // 08:10 on a Monday: 5 minutes past the threshold at 1000/minute.
    post(
        router.clone(),
        "/attendance/check-in",
        check_in_body("emp_001", "2024-01-15", "08:10"),
    )
    .await;

    let (status, body) = get(router, "/payroll/deductions/emp_001?month=1&year=2024").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], "105000");

    let breakdown = body["breakdown"].as_array().unwrap();
    assert_eq!(breakdown.len(), 2);
    assert_eq!(breakdown[0]["category"], "loan_installment");
    assert_eq!(breakdown[0]["amount"], "100000");
    assert_eq!(breakdown[1]["category"], "late_penalty");
    assert_eq!(breakdown[1]["amount"], "5000");
}

#[tokio::test]
async fn test_absences_reported_but_not_priced() {
    let (state, stores) = create_test_state();
    let router = create_router(state);

    stores
        .attendance
        .insert(attendance_record("emp_001", "2024-01-15", None))
        .await
        .unwrap();
    stores
        .attendance
        .insert(attendance_record("emp_001", "2024-01-16", None))
        .await
        .unwrap();

    let (_, body) = get(router, "/payroll/deductions/emp_001?month=1&year=2024").await;
    assert_eq!(body["absent_count"], 2);
    assert_eq!(body["total"], "0");
}

#[tokio::test]
async fn test_deductions_reject_invalid_month() {
    let (state, _) = create_test_state();
    let router = create_router(state);

    let (status, body) = get(router, "/payroll/deductions/emp_001?month=13&year=2024").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Payroll lifecycle
// =============================================================================

fn payroll_body(employee_id: &str) -> Value {
    json!({
        "employee_id": employee_id,
        "month": 1,
        "year": 2024,
    })
}

#[tokio::test]
async fn test_payroll_creation_computes_net_salary() {
    let (state, stores) = create_test_state();
    let router = create_router(state);

    stores
        .directory
        .insert(employee("emp_001", Some("acct_001"), "4000000"))
        .await;

    let (status, body) = post(
        router,
        "/payroll",
        json!({
            "employee_id": "emp_001",
            "month": 1,
            "year": 2024,
            "allowances": "250000",
            "overtime_hours": "10",
            "overtime_rate": "25000",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "pending");
    assert_eq!(body["base_salary"], "4000000");
    // 4000000 + 250000 + 10 * 25000 - 0
    assert_eq!(body["net_salary"], "4500000");
}

#[tokio::test]
async fn test_payroll_creation_subtracts_deductions() {
    let (state, stores) = create_test_state();
    let router = create_router(state);

    stores
        .directory
        .insert(employee("emp_001", Some("acct_001"), "5000000"))
        .await;

    let mut loan = Loan::new(
        "loan_001",
        "emp_001",
        Decimal::from_str("1200000").unwrap(),
        Decimal::from_str("100000").unwrap(),
        date("2023-12-01"),
    )
    .unwrap();
    loan.status = LoanStatus::Approved;
    stores.loans.insert(loan).await;

    let (status, body) = post(router, "/payroll", payroll_body("emp_001")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["deductions"], "100000");
    assert_eq!(body["net_salary"], "4900000");
}

#[tokio::test]
async fn test_duplicate_pending_payroll_is_distinct_conflict() {
    let (state, stores) = create_test_state();
    let router = create_router(state);

    stores
        .directory
        .insert(employee("emp_001", Some("acct_001"), "5000000"))
        .await;

    let (status, _) = post(router.clone(), "/payroll", payroll_body("emp_001")).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post(router, "/payroll", payroll_body("emp_001")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "DUPLICATE_PENDING_PAYROLL");
}

#[tokio::test]
async fn test_paid_payroll_is_distinct_conflict_and_cancellation_reopens() {
    let (state, stores) = create_test_state();
    let router = create_router(state);

    stores
        .directory
        .insert(employee("emp_001", Some("acct_001"), "5000000"))
        .await;

    let (_, created) = post(router.clone(), "/payroll", payroll_body("emp_001")).await;
    let id = created["id"].as_str().unwrap().to_string();

    // Pay it.
    let (status, paid) = post(
        router.clone(),
        &format!("/payroll/{id}/pay"),
        json!({"pay_date": "2024-01-28"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(paid["status"], "paid");
    assert_eq!(paid["pay_date"], "2024-01-28");

    // A paid period is a different rejection than a pending one.
    let (status, body) = post(router.clone(), "/payroll", payroll_body("emp_001")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "PAYROLL_ALREADY_PAID");

    // Paid is terminal.
    let (status, body) = send(
        router.clone(),
        "POST",
        &format!("/payroll/{id}/cancel"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INVALID_TRANSITION");

    // A fresh period is fine, and cancelling it reopens the period.
    let february = json!({"employee_id": "emp_001", "month": 2, "year": 2024});
    let (_, created) = post(router.clone(), "/payroll", february.clone()).await;
    let feb_id = created["id"].as_str().unwrap().to_string();

    let (status, cancelled) = send(
        router.clone(),
        "POST",
        &format!("/payroll/{feb_id}/cancel"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cancelled["status"], "cancelled");

    let (status, _) = post(router, "/payroll", february).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_payroll_requires_linked_account() {
    let (state, stores) = create_test_state();
    let router = create_router(state);

    stores
        .directory
        .insert(employee("emp_002", None, "5000000"))
        .await;

    let (status, body) = post(router, "/payroll", payroll_body("emp_002")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "ACCOUNT_NOT_LINKED");
}

#[tokio::test]
async fn test_payroll_for_unknown_employee_is_not_found() {
    let (state, _) = create_test_state();
    let router = create_router(state);

    let (status, body) = post(router, "/payroll", payroll_body("emp_404")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

// =============================================================================
// Leave approval and quota
// =============================================================================

#[tokio::test]
async fn test_leave_approval_consumes_quota() {
    let (state, stores) = create_test_state();
    let router = create_router(state);

    stores
        .quotas
        .insert(LeaveQuota {
            employee_id: "emp_001".to_string(),
            total_days: 12,
            used_days: 0,
            remaining_days: 12,
        })
        .await;
    stores
        .leaves
        .insert(pending_leave("leave_001", "emp_001", "2024-02-05", "2024-02-07", 3))
        .await;

    let (status, body) = post(
        router,
        "/leave/leave_001/approve",
        json!({"approved_by": "mgr_001", "approved_at": "2024-01-30T10:00:00"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["request"]["status"], "approved");
    assert_eq!(body["request"]["approved_by"], "mgr_001");
    assert_eq!(body["quota"]["used_days"], 3);
    assert_eq!(body["quota"]["remaining_days"], 9);
}

#[tokio::test]
async fn test_over_quota_approval_is_a_policy_violation() {
    let (state, stores) = create_test_state();
    let router = create_router(state);

    stores
        .quotas
        .insert(LeaveQuota {
            employee_id: "emp_001".to_string(),
            total_days: 12,
            used_days: 11,
            remaining_days: 1,
        })
        .await;
    stores
        .leaves
        .insert(pending_leave("leave_001", "emp_001", "2024-02-05", "2024-02-07", 3))
        .await;

    let (status, body) = post(
        router,
        "/leave/leave_001/approve",
        json!({"approved_by": "mgr_001", "approved_at": "2024-01-30T10:00:00"}),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "POLICY_VIOLATION");
}

#[tokio::test]
async fn test_second_approval_is_an_invalid_transition() {
    let (state, stores) = create_test_state();
    let router = create_router(state);

    stores
        .quotas
        .insert(LeaveQuota {
            employee_id: "emp_001".to_string(),
            total_days: 12,
            used_days: 0,
            remaining_days: 12,
        })
        .await;
    stores
        .leaves
        .insert(pending_leave("leave_001", "emp_001", "2024-02-05", "2024-02-07", 3))
        .await;

    let body = json!({"approved_by": "mgr_001", "approved_at": "2024-01-30T10:00:00"});
    let (status, _) = post(router.clone(), "/leave/leave_001/approve", body.clone()).await;
    assert_eq!(status, StatusCode::OK);

    let (status, response) = post(router, "/leave/leave_001/approve", body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response["code"], "INVALID_TRANSITION");
}

#[tokio::test]
async fn test_leave_rejection_leaves_quota_untouched() {
    let (state, stores) = create_test_state();
    let router = create_router(state);

    stores
        .quotas
        .insert(LeaveQuota {
            employee_id: "emp_001".to_string(),
            total_days: 12,
            used_days: 0,
            remaining_days: 12,
        })
        .await;
    stores
        .leaves
        .insert(pending_leave("leave_001", "emp_001", "2024-02-05", "2024-02-07", 3))
        .await;

    let (status, body) = send(router, "POST", "/leave/leave_001/reject", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["request"]["status"], "rejected");
    assert!(body.get("quota").is_none());

    let quota = stores.quotas.get("emp_001").await.unwrap().unwrap();
    assert_eq!(quota.remaining_days, 12);
}

#[tokio::test]
async fn test_approving_missing_leave_is_not_found() {
    let (state, _) = create_test_state();
    let router = create_router(state);

    let (status, body) = post(
        router,
        "/leave/leave_404/approve",
        json!({"approved_by": "mgr_001", "approved_at": "2024-01-30T10:00:00"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}
