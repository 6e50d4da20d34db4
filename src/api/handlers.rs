//! HTTP request handlers for the HR payroll API.
//!
//! Every handler tags its work with a fresh correlation id, resolves the
//! caller's capability, and hands the request to a service. Service errors
//! become [`ApiErrorResponse`] bodies.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::access::Capability;
use crate::error::HrError;
use crate::models::{EmployeeUpdate, NewEmployee};
use crate::services::{PayrollAmendment, PayrollEntry};
use crate::store::{AttendanceQuery, PayrollQuery};

use super::caller::Caller;
use super::request::{AttendanceRequest, GenerationRequest};
use super::response::{ApiError, ApiErrorResponse, GenerationResponse, HealthResponse};
use super::state::AppState;

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health-check", get(health_check))
        .route("/check-in", post(check_in))
        .route("/check-out", post(check_out))
        .route("/payroll-generation", post(generate_payroll))
        .route("/attendances", get(list_attendance).post(create_attendance))
        .route("/attendances/:id", get(show_attendance))
        .route("/payrolls", get(list_payrolls).post(create_payroll))
        .route("/payrolls/:id", get(show_payroll).put(update_payroll))
        .route("/employees", get(list_employees).post(create_employee))
        .route(
            "/employees/:id",
            get(show_employee).put(update_employee).delete(delete_employee),
        )
        .route("/hrd/dashboard", get(dashboard))
        .with_state(state)
}

/// Logs and converts a service error.
fn reject(correlation_id: Uuid, action: &str, err: HrError) -> ApiErrorResponse {
    warn!(
        correlation_id = %correlation_id,
        action,
        error = %err,
        "Request rejected"
    );
    err.into()
}

fn resolve(state: &AppState, caller: &Caller, correlation_id: Uuid) -> ApiResult<Capability> {
    state
        .capability(&caller.0)
        .map_err(|err| reject(correlation_id, "resolve capability", err))
}

/// Converts a JSON body rejection into a 400 response.
fn json_body<T>(correlation_id: Uuid, payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(correlation_id = %correlation_id, error = %body_text, "JSON data error");
            ApiError::validation_error(body_text)
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "JSON syntax error");
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(ApiErrorResponse::bad_request(error))
}

fn query_params<T>(correlation_id: Uuid, query: Result<Query<T>, QueryRejection>) -> ApiResult<T> {
    query.map(|Query(q)| q).map_err(|rejection| {
        warn!(correlation_id = %correlation_id, error = %rejection.body_text(), "Invalid query");
        ApiErrorResponse::bad_request(ApiError::validation_error(rejection.body_text()))
    })
}

fn path_id(correlation_id: Uuid, path: Result<Path<u64>, PathRejection>) -> ApiResult<u64> {
    path.map(|Path(id)| id).map_err(|rejection| {
        warn!(correlation_id = %correlation_id, error = %rejection.body_text(), "Invalid path");
        ApiErrorResponse::bad_request(ApiError::validation_error(rejection.body_text()))
    })
}

/// Handler for GET /health-check.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: state.clock().now(),
    })
}

/// Handler for POST /check-in.
///
/// Operates on the caller's own employee profile.
async fn check_in(State(state): State<AppState>, caller: Caller) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let user_id = caller.0.user_id;
    info!(correlation_id = %correlation_id, user_id, "Processing check-in");

    let employee = state
        .directory()
        .linked_employee(user_id)
        .ok_or(HrError::NotLinkedToEmployee { user_id })
        .map_err(|err| reject(correlation_id, "check in", err))?;

    let record = state
        .ledger()
        .check_in(employee.id)
        .map_err(|err| reject(correlation_id, "check in", err))?;

    Ok((StatusCode::OK, Json(record)))
}

/// Handler for POST /check-out.
async fn check_out(State(state): State<AppState>, caller: Caller) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let user_id = caller.0.user_id;
    info!(correlation_id = %correlation_id, user_id, "Processing check-out");

    let employee = state
        .directory()
        .linked_employee(user_id)
        .ok_or(HrError::NotLinkedToEmployee { user_id })
        .map_err(|err| reject(correlation_id, "check out", err))?;

    let record = state
        .ledger()
        .check_out(employee.id)
        .map_err(|err| reject(correlation_id, "check out", err))?;

    Ok((StatusCode::OK, Json(record)))
}

/// Handler for POST /payroll-generation.
async fn generate_payroll(
    State(state): State<AppState>,
    caller: Caller,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> ApiResult<Json<GenerationResponse>> {
    let correlation_id = Uuid::new_v4();
    let request = json_body(correlation_id, payload)?;
    info!(
        correlation_id = %correlation_id,
        year = request.year,
        month = request.month,
        "Processing payroll generation"
    );

    let capability = resolve(&state, &caller, correlation_id)?;
    let outcome = state
        .generator()
        .generate(&capability, request.year, request.month)
        .map_err(|err| reject(correlation_id, "generate payroll", err))?;

    Ok(Json(outcome.into()))
}

/// Handler for GET /attendances.
async fn list_attendance(
    State(state): State<AppState>,
    caller: Caller,
    query: Result<Query<AttendanceQuery>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let query = query_params(correlation_id, query)?;
    let capability = resolve(&state, &caller, correlation_id)?;
    Ok(Json(state.ledger().list(&capability, query)))
}

/// Handler for POST /attendances.
async fn create_attendance(
    State(state): State<AppState>,
    caller: Caller,
    payload: Result<Json<AttendanceRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let request = json_body(correlation_id, payload)?;
    let capability = resolve(&state, &caller, correlation_id)?;

    let record = state
        .ledger()
        .record_manual(&capability, request.into())
        .map_err(|err| reject(correlation_id, "record attendance", err))?;

    info!(correlation_id = %correlation_id, attendance_id = record.id, "Attendance recorded");
    Ok((StatusCode::CREATED, Json(record)))
}

/// Handler for GET /attendances/:id.
async fn show_attendance(
    State(state): State<AppState>,
    caller: Caller,
    id: Result<Path<u64>, PathRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let id = path_id(correlation_id, id)?;
    let capability = resolve(&state, &caller, correlation_id)?;

    let record = state
        .ledger()
        .get(&capability, id)
        .map_err(|err| reject(correlation_id, "view attendance", err))?;
    Ok(Json(record))
}

/// Handler for GET /payrolls.
async fn list_payrolls(
    State(state): State<AppState>,
    caller: Caller,
    query: Result<Query<PayrollQuery>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let query = query_params(correlation_id, query)?;
    let capability = resolve(&state, &caller, correlation_id)?;
    Ok(Json(state.payrolls().list(&capability, query)))
}

/// Handler for POST /payrolls.
async fn create_payroll(
    State(state): State<AppState>,
    caller: Caller,
    payload: Result<Json<PayrollEntry>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let entry = json_body(correlation_id, payload)?;
    let capability = resolve(&state, &caller, correlation_id)?;

    let record = state
        .payrolls()
        .create(&capability, entry)
        .map_err(|err| reject(correlation_id, "create payroll", err))?;

    info!(correlation_id = %correlation_id, payroll_id = record.id, "Payroll created");
    Ok((StatusCode::CREATED, Json(record)))
}

/// Handler for GET /payrolls/:id.
async fn show_payroll(
    State(state): State<AppState>,
    caller: Caller,
    id: Result<Path<u64>, PathRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let id = path_id(correlation_id, id)?;
    let capability = resolve(&state, &caller, correlation_id)?;

    let record = state
        .payrolls()
        .get(&capability, id)
        .map_err(|err| reject(correlation_id, "view payroll", err))?;
    Ok(Json(record))
}

/// Handler for PUT /payrolls/:id.
async fn update_payroll(
    State(state): State<AppState>,
    caller: Caller,
    id: Result<Path<u64>, PathRejection>,
    payload: Result<Json<PayrollAmendment>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let id = path_id(correlation_id, id)?;
    let amendment = json_body(correlation_id, payload)?;
    let capability = resolve(&state, &caller, correlation_id)?;

    let record = state
        .payrolls()
        .update(&capability, id, amendment)
        .map_err(|err| reject(correlation_id, "update payroll", err))?;
    Ok(Json(record))
}

/// Handler for GET /employees.
async fn list_employees(
    State(state): State<AppState>,
    caller: Caller,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let capability = resolve(&state, &caller, correlation_id)?;

    let employees = state
        .directory()
        .list(&capability)
        .map_err(|err| reject(correlation_id, "list employees", err))?;
    Ok(Json(employees))
}

/// Handler for POST /employees.
async fn create_employee(
    State(state): State<AppState>,
    caller: Caller,
    payload: Result<Json<NewEmployee>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let new = json_body(correlation_id, payload)?;
    let capability = resolve(&state, &caller, correlation_id)?;

    let employee = state
        .directory()
        .create(&capability, new)
        .map_err(|err| reject(correlation_id, "create employee", err))?;
    Ok((StatusCode::CREATED, Json(employee)))
}

/// Handler for GET /employees/:id.
async fn show_employee(
    State(state): State<AppState>,
    caller: Caller,
    id: Result<Path<u64>, PathRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let id = path_id(correlation_id, id)?;
    let capability = resolve(&state, &caller, correlation_id)?;

    let employee = state
        .directory()
        .get(&capability, id)
        .map_err(|err| reject(correlation_id, "view employee", err))?;
    Ok(Json(employee))
}

/// Handler for PUT /employees/:id.
async fn update_employee(
    State(state): State<AppState>,
    caller: Caller,
    id: Result<Path<u64>, PathRejection>,
    payload: Result<Json<EmployeeUpdate>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let id = path_id(correlation_id, id)?;
    let update = json_body(correlation_id, payload)?;
    let capability = resolve(&state, &caller, correlation_id)?;

    let employee = state
        .directory()
        .update(&capability, id, update)
        .map_err(|err| reject(correlation_id, "update employee", err))?;
    Ok(Json(employee))
}

/// Handler for DELETE /employees/:id.
async fn delete_employee(
    State(state): State<AppState>,
    caller: Caller,
    id: Result<Path<u64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let correlation_id = Uuid::new_v4();
    let id = path_id(correlation_id, id)?;
    let capability = resolve(&state, &caller, correlation_id)?;

    state
        .directory()
        .delete(&capability, id)
        .map_err(|err| reject(correlation_id, "delete employee", err))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET /hrd/dashboard.
async fn dashboard(State(state): State<AppState>, caller: Caller) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let capability = resolve(&state, &caller, correlation_id)?;

    let dashboard = state
        .directory()
        .dashboard(&capability)
        .map_err(|err| reject(correlation_id, "view dashboard", err))?;
    Ok(Json(dashboard))
}
