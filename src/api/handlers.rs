//! HTTP request handlers for the Attendance Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    Clock, build_report_summary, collect_warnings, export_rows, project_live_day, report_window,
};
use crate::config::{ConfigLoader, EngineSettings};
use crate::models::ReportResult;

use super::request::ReportRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/report", post(report_handler))
        .route("/export", post(export_handler))
        .with_state(state)
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(error: ApiErrorResponse) -> Response {
    json_response(error.status, error.error)
}

/// Maps a body rejection to a 400 error body.
fn rejection_error(rejection: JsonRejection, correlation_id: Uuid) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's message, including the field path
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            // Well-formed JSON that does not fit the request shape
            ApiError::validation_error(body_text)
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

/// Parses and validates a request body, or builds the error response.
fn accept_request(
    payload: Result<Json<ReportRequest>, JsonRejection>,
    settings: &EngineSettings,
    correlation_id: Uuid,
) -> Result<ReportRequest, Response> {
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return Err(json_response(
                StatusCode::BAD_REQUEST,
                rejection_error(rejection, correlation_id),
            ));
        }
    };

    if let Err(err) = request.validate(settings) {
        warn!(
            correlation_id = %correlation_id,
            user_id = %request.user.id,
            error = %err,
            "Request validation failed"
        );
        return Err(error_response(err.into()));
    }

    Ok(request)
}

/// Handler for POST /report endpoint.
///
/// Accepts a report request and returns the computed [`ReportResult`].
async fn report_handler(
    State(state): State<AppState>,
    payload: Result<Json<ReportRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing report request");

    let request = match accept_request(payload, state.config().settings(), correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let result = generate_report(&request, state.config(), state.clock());
    info!(
        correlation_id = %correlation_id,
        user_id = %result.user_id,
        days = result.summary.days.len(),
        live_minutes = result.live_minutes,
        warnings = result.warnings.len(),
        duration_us = result.duration_us,
        "Report completed successfully"
    );

    json_response(StatusCode::OK, result)
}

/// Handler for POST /export endpoint.
///
/// Accepts a report request and returns one export row per reported day.
async fn export_handler(
    State(state): State<AppState>,
    payload: Result<Json<ReportRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing export request");

    let request = match accept_request(payload, state.config().settings(), correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let result = generate_report(&request, state.config(), state.clock());
    let rows = export_rows(&result.summary, &request.user_sessions());
    info!(
        correlation_id = %correlation_id,
        user_id = %result.user_id,
        rows = rows.len(),
        duration_us = result.duration_us,
        "Export completed successfully"
    );

    json_response(StatusCode::OK, rows)
}

/// Runs the report pipeline: window, summary, optional live projection and
/// diagnostics.
fn generate_report(request: &ReportRequest, config: &ConfigLoader, clock: &dyn Clock) -> ReportResult {
    let start_time = Instant::now();
    let settings = config.settings();
    let today = clock.today();
    let user_id = request.user.id.as_str();
    let rounding = request.rounding.unwrap_or(settings.default_rounding);

    let (start, end) = report_window(request.period, today, settings.week_starts_on);
    let sessions = request.user_sessions();

    let mut summary = build_report_summary(
        user_id,
        start,
        end,
        &sessions,
        &request.user,
        &request.holidays,
        &request.commitment_history,
        rounding,
    );

    let mut live_minutes = 0;
    if request.include_live {
        let projection = project_live_day(summary, user_id, &sessions, rounding, clock);
        summary = projection.summary;
        live_minutes = projection.live_minutes;
    }

    let warnings = collect_warnings(user_id, &sessions, &request.commitment_history, today);

    ReportResult {
        report_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        user_id: user_id.to_string(),
        rounding,
        summary,
        live_minutes,
        warnings,
        duration_us: start_time.elapsed().as_micros() as u64,
    }
}
