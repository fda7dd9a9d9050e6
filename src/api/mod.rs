//! HTTP API module for the Attendance Engine.
//!
//! This module provides the REST API endpoints for computing attendance
//! reports and export rows from caller-supplied sessions and calendars.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::ReportRequest;
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
