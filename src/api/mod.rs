//! HTTP API module for the payroll engine.
//!
//! This module provides the thin REST surface over the engine: attendance
//! writes, the absentee sweep, holiday register mutation, and payroll
//! recalculation/lookup. It is the explicit write path the trigger
//! coordinator is invoked from.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    ClockRequest, DeleteRecordRequest, HolidayRequest, RecalculateRequest, RecordRequest,
    SweepRequest,
};
pub use response::{
    ApiError, ApiErrorResponse, AttendanceResponse, FanOutSummary, HolidayResponse,
    SweepFailure, SweepResponse,
};
pub use state::AppState;
