//! Core data models for the attendance and payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod employee;
mod escalation;
mod leave;
mod loan;
mod payroll;
mod time_of_day;

pub use attendance::{AttendanceRecord, AttendanceStatus};
pub use employee::{Employee, EmployeeStatus};
pub use escalation::{Escalation, EscalationKind};
pub use leave::{LeaveQuota, LeaveRequest, LeaveStatus, LeaveType};
pub use loan::{Loan, LoanStatus};
pub use payroll::{PayrollPeriod, PayrollRecord, PayrollStatus};
pub use time_of_day::TimeOfDay;
