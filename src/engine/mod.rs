//! Compliance and payroll logic.
//!
//! This module contains the rule set that turns raw time-clock punches,
//! leave requests and loan records into compliance signals and payroll
//! numbers: schedule resolution, check-in classification, lateness
//! escalation policies, late-return-from-leave detection, deduction
//! aggregation, net-salary computation and leave-quota tracking.

mod classifier;
mod compliance;
mod deduction;
mod leave_return;
mod payroll_run;
mod quota;
mod recorder;
mod schedule;

pub use classifier::{
    CHECK_IN_TOLERANCE_MINUTES, Classification, classify_check_in, recorded_late_minutes,
};
pub use compliance::{
    EscalationPolicy, MONTHLY_LATE_COUNT_LIMIT, MonthlyLateCountPolicy, WEEKLY_LATE_MINUTES_LIMIT,
    WeeklyLateMinutesPolicy,
};
pub use deduction::{
    DEFAULT_LATE_PENALTY_RATE_PER_MINUTE, DeductionCalculator, DeductionCategory, DeductionLine,
    DeductionResult,
};
pub use leave_return::{LeaveReturn, LeaveReturnMonitor};
pub use payroll_run::{PayrollComputer, PayrollInput, net_salary};
pub(crate) use payroll_run::duplicate_payroll_error;
pub use quota::LeaveQuotaTracker;
pub use recorder::{AttendanceRecorder, CheckInOutcome};
pub use schedule::{
    SATURDAY_END_MINUTES, WEEKDAY_END_MINUTES, WORK_START_MINUTES, WorkSchedule, resolve_schedule,
};
