//! HTTP API module for the HR payroll engine.
//!
//! This module provides the REST endpoints for attendance check-in and
//! check-out, payroll generation, and the HR record surface.

mod caller;
mod handlers;
mod request;
mod response;
mod state;

pub use caller::{Caller, USER_ID_HEADER, USER_ROLE_HEADER};
pub use handlers::create_router;
pub use request::{AttendanceRequest, GenerationRequest};
pub use response::{ApiError, ApiErrorResponse, GenerationResponse, HealthResponse, status_and_code};
pub use state::AppState;
