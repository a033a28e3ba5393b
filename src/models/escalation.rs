//! Escalation event model.
//!
//! An escalation is an outbound fact handed to the [`EscalationSink`]; this
//! engine does not persist it and keeps no ledger of past emissions, so the
//! same condition can fire again on recomputation.
//!
//! [`EscalationSink`]: crate::store::EscalationSink

use serde::{Deserialize, Serialize};

/// The kind of disciplinary escalation being raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscalationKind {
    /// First formal written warning for excessive lateness ("SP1").
    FirstWarning,
}

impl EscalationKind {
    /// Returns the HR code for the escalation kind.
    pub fn code(self) -> &'static str {
        match self {
            EscalationKind::FirstWarning => "SP1",
        }
    }
}

/// A single escalation event for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Escalation {
    /// The employee the escalation concerns.
    pub employee_id: String,
    /// The kind of escalation.
    pub kind: EscalationKind,
    /// The value that crossed the policy threshold (accumulated late minutes
    /// or late-day count, depending on the policy).
    pub trigger_value: i64,
    /// A label for the window the policy evaluated, e.g. "2024-W03" or
    /// "2024-01".
    pub period: String,
}
