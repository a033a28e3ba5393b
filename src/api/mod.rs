//! HTTP API module for the attendance engine.
//!
//! This module provides the REST endpoints for recording punches, running
//! compliance checks, flagging late returns from leave, and driving the
//! payroll lifecycle. The engine itself owns no wire protocol; these
//! handlers are a thin JSON adapter over it.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    ApproveLeaveRequest, CheckInRequest, CheckOutRequest, CreatePayrollRequest, MarkPaidRequest,
};
pub use response::{
    ApiError, CheckInResponse, ComplianceResponse, LateReturnEntry, LateReturnsResponse,
    LeaveDecisionResponse,
};
pub use state::{AppState, EngineStores};
