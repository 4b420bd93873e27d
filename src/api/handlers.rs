//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints. Every
//! write handler follows the same shape: validate input, invoke the ledger or
//! engine, dispatch the trigger fan-out explicitly, and return the results —
//! recalculation never fires as a hidden persistence side effect.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{Datelike, NaiveDate};
use tracing::{info, warn};
use uuid::Uuid;

use crate::coordinator::{dispatch, ChangeEvent, FanOutReport};
use crate::engine::recalculate;
use crate::error::EngineResult;
use crate::ledger;
use crate::models::{Holiday, Month, Payroll};
use crate::store::{HolidayStore, PayrollStore};

use super::request::{
    ClockRequest, DeleteRecordRequest, HolidayRequest, RecalculateRequest, RecordRequest,
    SweepRequest,
};
use super::response::{
    ApiError, ApiErrorResponse, AttendanceResponse, FanOutSummary, HolidayResponse,
    SweepFailure, SweepResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/attendance/check-in", post(check_in_handler))
        .route("/attendance/check-out", post(check_out_handler))
        .route(
            "/attendance/records",
            post(create_record_handler)
                .put(update_record_handler)
                .delete(delete_record_handler),
        )
        .route("/attendance/sweep", post(sweep_handler))
        .route("/holidays", post(add_holiday_handler))
        .route("/holidays/:date", axum::routing::delete(remove_holiday_handler))
        .route("/payroll/recalculate", post(recalculate_handler))
        .route("/payroll/:employee_id/:month", get(payroll_handler))
        .with_state(state)
}

/// Unwraps a JSON payload, mapping rejections to a 400 response.
fn parse_json<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, Response> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(error = %body_text, "JSON data error");
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(error = %err, "JSON syntax error");
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            Err((StatusCode::BAD_REQUEST, Json(error)).into_response())
        }
    }
}

/// Runs the attendance fan-out for one pair and extracts its payroll, if the
/// recalculation succeeded. Fan-out failures are already logged per pair.
fn attendance_fan_out(
    state: &AppState,
    employee_id: &str,
    date: NaiveDate,
) -> EngineResult<Option<Payroll>> {
    let report = dispatch(
        state.store(),
        &ChangeEvent::AttendanceChanged {
            employee_id: employee_id.to_string(),
            date,
        },
    )?;
    Ok(report
        .outcomes
        .into_iter()
        .find_map(|o| o.result.ok()))
}

fn summarize(report: &FanOutReport) -> FanOutSummary {
    FanOutSummary {
        recalculated: report.recalculated(),
        failed: report.failures().count(),
    }
}

/// Handler for `POST /attendance/check-in`.
async fn check_in_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClockRequest>, JsonRejection>,
) -> Response {
    let request = match parse_json(payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id = %request.employee_id,
          date = %request.date, "Processing check-in");

    let record = match ledger::check_in(
        state.store(),
        &request.employee_id,
        request.date,
        request.time,
    ) {
        Ok(record) => record,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Check-in rejected");
            return ApiErrorResponse::from(err).into_response();
        }
    };

    match attendance_fan_out(&state, &request.employee_id, request.date) {
        Ok(payroll) => {
            (StatusCode::OK, Json(AttendanceResponse { record, payroll })).into_response()
        }
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}

/// Handler for `POST /attendance/check-out`.
async fn check_out_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClockRequest>, JsonRejection>,
) -> Response {
    let request = match parse_json(payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id = %request.employee_id,
          date = %request.date, "Processing check-out");

    let record = match ledger::check_out(
        state.store(),
        &request.employee_id,
        request.date,
        request.time,
    ) {
        Ok(record) => record,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Check-out rejected");
            return ApiErrorResponse::from(err).into_response();
        }
    };

    match attendance_fan_out(&state, &request.employee_id, request.date) {
        Ok(payroll) => {
            (StatusCode::OK, Json(AttendanceResponse { record, payroll })).into_response()
        }
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}

/// Handler for `POST /attendance/records` (administrative create).
async fn create_record_handler(
    State(state): State<AppState>,
    payload: Result<Json<RecordRequest>, JsonRejection>,
) -> Response {
    let request = match parse_json(payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id = %request.employee_id,
          date = %request.date, "Creating attendance record");

    let record = match ledger::create_record(
        state.store(),
        &request.employee_id,
        request.date,
        request.check_in_time,
        request.check_out_time,
        request.status,
    ) {
        Ok(record) => record,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Record create rejected");
            return ApiErrorResponse::from(err).into_response();
        }
    };

    match attendance_fan_out(&state, &request.employee_id, request.date) {
        Ok(payroll) => (
            StatusCode::CREATED,
            Json(AttendanceResponse { record, payroll }),
        )
            .into_response(),
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}

/// Handler for `PUT /attendance/records` (administrative update).
async fn update_record_handler(
    State(state): State<AppState>,
    payload: Result<Json<RecordRequest>, JsonRejection>,
) -> Response {
    let request = match parse_json(payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id = %request.employee_id,
          date = %request.date, "Updating attendance record");

    let record = match ledger::update_record(
        state.store(),
        &request.employee_id,
        request.date,
        request.check_in_time,
        request.check_out_time,
        request.status,
    ) {
        Ok(record) => record,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Record update rejected");
            return ApiErrorResponse::from(err).into_response();
        }
    };

    match attendance_fan_out(&state, &request.employee_id, request.date) {
        Ok(payroll) => {
            (StatusCode::OK, Json(AttendanceResponse { record, payroll })).into_response()
        }
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}

/// Handler for `DELETE /attendance/records`.
async fn delete_record_handler(
    State(state): State<AppState>,
    payload: Result<Json<DeleteRecordRequest>, JsonRejection>,
) -> Response {
    let request = match parse_json(payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id = %request.employee_id,
          date = %request.date, "Deleting attendance record");

    if let Err(err) = ledger::delete_record(state.store(), &request.employee_id, request.date)
    {
        warn!(correlation_id = %correlation_id, error = %err, "Record delete rejected");
        return ApiErrorResponse::from(err).into_response();
    }

    match dispatch(
        state.store(),
        &ChangeEvent::AttendanceChanged {
            employee_id: request.employee_id.clone(),
            date: request.date,
        },
    ) {
        Ok(report) => (StatusCode::OK, Json(summarize(&report))).into_response(),
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}

/// Handler for `POST /attendance/sweep`.
async fn sweep_handler(
    State(state): State<AppState>,
    payload: Result<Json<SweepRequest>, JsonRejection>,
) -> Response {
    let request = match parse_json(payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, date = %request.date, "Running absentee sweep");

    let report = match ledger::mark_absentees(state.store(), request.date) {
        Ok(report) => report,
        Err(err) => return ApiErrorResponse::from(err).into_response(),
    };

    let mut recalculated = 0;
    for employee_id in &report.marked {
        match dispatch(
            state.store(),
            &ChangeEvent::AttendanceChanged {
                employee_id: employee_id.clone(),
                date: request.date,
            },
        ) {
            Ok(fan_out) => recalculated += fan_out.recalculated(),
            Err(err) => return ApiErrorResponse::from(err).into_response(),
        }
    }

    let response = SweepResponse {
        date: report.date,
        marked: report.marked,
        failures: report
            .failures
            .into_iter()
            .map(|(employee_id, error)| SweepFailure {
                employee_id,
                message: error.to_string(),
            })
            .collect(),
        recalculated,
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// Validates the holiday uniqueness invariants against the register: at most
/// one holiday per date, and no duplicate name within a calendar year.
fn holiday_conflict(
    state: &AppState,
    request: &HolidayRequest,
) -> EngineResult<Option<ApiError>> {
    let store = state.store();
    if !store
        .holidays_between(request.date, request.date)?
        .is_empty()
    {
        return Ok(Some(ApiError::holiday_conflict(format!(
            "a holiday is already registered on {}",
            request.date
        ))));
    }

    let year = request.date.year();
    let year_start = NaiveDate::from_ymd_opt(year, 1, 1).expect("valid year start");
    let year_end = NaiveDate::from_ymd_opt(year, 12, 31).expect("valid year end");
    let clash = store
        .holidays_between(year_start, year_end)?
        .into_iter()
        .any(|h| h.name == request.name);
    if clash {
        return Ok(Some(ApiError::holiday_conflict(format!(
            "holiday '{}' is already registered in {}",
            request.name, year
        ))));
    }

    Ok(None)
}

/// Handler for `POST /holidays`.
async fn add_holiday_handler(
    State(state): State<AppState>,
    payload: Result<Json<HolidayRequest>, JsonRejection>,
) -> Response {
    let request = match parse_json(payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, date = %request.date, name = %request.name,
          "Registering holiday");

    match holiday_conflict(&state, &request) {
        Ok(Some(error)) => return (StatusCode::CONFLICT, Json(error)).into_response(),
        Ok(None) => {}
        Err(err) => return ApiErrorResponse::from(err).into_response(),
    }

    let holiday = Holiday {
        date: request.date,
        name: request.name,
    };
    if let Err(err) = state.store().put_holiday(holiday.clone()) {
        return ApiErrorResponse::from(err).into_response();
    }

    match dispatch(
        state.store(),
        &ChangeEvent::HolidayChanged { date: holiday.date },
    ) {
        Ok(report) => (
            StatusCode::CREATED,
            Json(HolidayResponse {
                holiday,
                fan_out: summarize(&report),
            }),
        )
            .into_response(),
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}

/// Handler for `DELETE /holidays/{date}`.
async fn remove_holiday_handler(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, date = %date, "Removing holiday");

    let existing = match state.store().holidays_between(date, date) {
        Ok(mut holidays) => holidays.pop(),
        Err(err) => return ApiErrorResponse::from(err).into_response(),
    };
    let Some(holiday) = existing else {
        let error = ApiError::new(
            "HOLIDAY_NOT_FOUND",
            format!("No holiday registered on {}", date),
        );
        return (StatusCode::NOT_FOUND, Json(error)).into_response();
    };

    if let Err(err) = state.store().remove_holiday(date) {
        return ApiErrorResponse::from(err).into_response();
    }

    match dispatch(state.store(), &ChangeEvent::HolidayChanged { date }) {
        Ok(report) => (
            StatusCode::OK,
            Json(HolidayResponse {
                holiday,
                fan_out: summarize(&report),
            }),
        )
            .into_response(),
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}

/// Handler for `POST /payroll/recalculate`.
async fn recalculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<RecalculateRequest>, JsonRejection>,
) -> Response {
    let request = match parse_json(payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id = %request.employee_id,
          month = %request.month, "Processing recalculation request");

    match recalculate(state.store(), &request.employee_id, request.month) {
        Ok(payroll) => {
            info!(correlation_id = %correlation_id, employee_id = %payroll.employee_id,
                  month = %payroll.month, net_salary = %payroll.net_salary,
                  "Recalculation completed");
            (StatusCode::OK, Json(payroll)).into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Recalculation failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for `GET /payroll/{employee_id}/{month}`.
async fn payroll_handler(
    State(state): State<AppState>,
    Path((employee_id, month)): Path<(String, Month)>,
) -> Response {
    match state.store().payroll(&employee_id, month) {
        Ok(Some(payroll)) => (StatusCode::OK, Json(payroll)).into_response(),
        Ok(None) => {
            let error = ApiError::new(
                "PAYROLL_NOT_FOUND",
                format!("No payroll row for employee '{}' in {}", employee_id, month),
            );
            (StatusCode::NOT_FOUND, Json(error)).into_response()
        }
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}
