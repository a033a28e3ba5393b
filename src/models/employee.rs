//! Employee model and related types.
//!
//! This module defines the Employee struct and EmployeeStatus enum. Employee
//! records are owned by an external directory and are read-only to this
//! engine; they are consulted for salary figures and account linkage.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents the standing of an employee in the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    /// Currently employed and subject to attendance rules.
    Active,
    /// No longer employed; retained for historical records.
    Inactive,
}

/// Represents an employee as seen by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Identifier of the linked system account, if one exists.
    ///
    /// Payroll creation requires a linked account.
    #[serde(default)]
    pub account_id: Option<String>,
    /// The date the employee joined the company.
    pub join_date: NaiveDate,
    /// The employee's monthly base salary.
    pub salary: Decimal,
    /// The employee's standing in the directory.
    pub status: EmployeeStatus,
}

impl Employee {
    /// Returns true if the employee has a linked system account.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::{Employee, EmployeeStatus};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     account_id: Some("acct_001".to_string()),
    ///     join_date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
    ///     salary: Decimal::new(5_000_000, 0),
    ///     status: EmployeeStatus::Active,
    /// };
    /// assert!(employee.has_linked_account());
    /// ```
    pub fn has_linked_account(&self) -> bool {
        self.account_id.is_some()
    }
}
