//! Integration tests for the Attendance Engine.
//!
//! This test suite covers the report pipeline end to end:
//! - Single-day and multi-day summaries
//! - Commitment history, holidays and weekly off days
//! - Multiple sessions per day and rounding
//! - Live projection of open sessions
//! - Report windows and diagnostics
//! - Export rows
//! - Error cases
//! - Ledger, outbox and configuration working together

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use attendance_engine::api::{AppState, create_router};
use attendance_engine::calculation::{FixedClock, build_report_summary};
use attendance_engine::config::{ConfigLoader, EngineSettings};
use attendance_engine::models::{AttendanceSession, DayStatus, RoundingRule, User};
use attendance_engine::sync::{OperationKind, Outbox};
use attendance_engine::tracking::SessionLedger;

// =============================================================================
// Test Helpers
// =============================================================================

/// Wednesday 2024-06-12, 10:30.
fn now() -> NaiveDateTime {
    NaiveDateTime::parse_from_str("2024-06-12 10:30", "%Y-%m-%d %H:%M").unwrap()
}

fn make_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

fn make_time(time_str: &str) -> NaiveTime {
    NaiveTime::parse_from_str(time_str, "%H:%M").unwrap()
}

fn create_router_for_test() -> Router {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    create_router(AppState::with_clock(config, FixedClock(now())))
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

async fn post(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn post_report(body: Value) -> (StatusCode, Value) {
    post(create_router_for_test(), "/report", body).await
}

fn user() -> Value {
    json!({
        "id": "user_001",
        "name": "Ada",
        "committed_hours_per_day": "8",
        "weekly_off_days": ["Saturday", "Sunday"],
        "timezone": "Europe/Berlin"
    })
}

fn session(id: &str, date: &str, check_in: &str, check_out: Option<&str>) -> Value {
    let mut value = json!({
        "id": id,
        "user_id": "user_001",
        "date": date,
        "check_in_time": check_in,
        "total_worked_minutes": 0,
        "is_manual": false
    });
    if let Some(out) = check_out {
        value["check_out_time"] = json!(out);
    }
    value
}

fn custom(start: &str, end: &str) -> Value {
    json!({"view": "custom", "start_date": start, "end_date": end})
}

fn create_request(period: Value, sessions: Vec<Value>) -> Value {
    json!({
        "user": user(),
        "period": period,
        "sessions": sessions,
        "holidays": [],
        "commitment_history": []
    })
}

fn day<'a>(result: &'a Value, date: &str) -> &'a Value {
    result["summary"]["days"]
        .as_array()
        .unwrap()
        .iter()
        .find(|d| d["date"] == date)
        .unwrap()
}

// =============================================================================
// Single-day scenarios
// =============================================================================

#[tokio::test]
async fn test_single_overtime_day() {
    let request = create_request(
        custom("2024-06-10", "2024-06-10"),
        vec![session("att_001", "2024-06-10", "09:00", Some("17:30"))],
    );
    let (status, result) = post_report(request).await;

    assert_eq!(status, StatusCode::OK);
    let monday = day(&result, "2024-06-10");
    assert_eq!(monday["worked_minutes"], 510);
    assert_eq!(monday["committed_minutes"], 480);
    assert_eq!(monday["status"], "overtime");
    assert_eq!(monday["overtime_minutes"], 30);
    assert_eq!(monday["short_minutes"], 0);

    let summary = &result["summary"];
    assert_eq!(summary["working_days"], 1);
    assert_eq!(summary["holidays"], 0);
    assert_eq!(summary["off_days"], 0);
    assert_eq!(result["user_id"], "user_001");
    assert_eq!(result["rounding"], "none");
}

#[tokio::test]
async fn test_two_sessions_same_day_are_summed() {
    let request = create_request(
        custom("2024-06-10", "2024-06-10"),
        vec![
            session("att_001", "2024-06-10", "08:00", Some("10:00")),
            session("att_002", "2024-06-10", "13:00", Some("14:30")),
        ],
    );
    let (_, result) = post_report(request).await;

    let monday = day(&result, "2024-06-10");
    assert_eq!(monday["worked_minutes"], 210);
    assert_eq!(monday["status"], "short");
    assert_eq!(monday["short_minutes"], 270);
}

#[tokio::test]
async fn test_exact_commitment_is_complete() {
    let request = create_request(
        custom("2024-06-11", "2024-06-11"),
        vec![session("att_001", "2024-06-11", "09:00", Some("17:00"))],
    );
    let (_, result) = post_report(request).await;
    assert_eq!(day(&result, "2024-06-11")["status"], "complete");
}

#[tokio::test]
async fn test_cached_worked_minutes_are_recomputed() {
    let mut stale = session("att_001", "2024-06-10", "09:00", Some("12:00"));
    stale["total_worked_minutes"] = json!(999);
    let request = create_request(custom("2024-06-10", "2024-06-10"), vec![stale]);
    let (_, result) = post_report(request).await;
    assert_eq!(day(&result, "2024-06-10")["worked_minutes"], 180);
}

// =============================================================================
// Commitment calendar
// =============================================================================

#[tokio::test]
async fn test_commitment_history_selection() {
    let mut request = create_request(custom("2023-12-01", "2024-03-15"), vec![]);
    request["commitment_history"] = json!([
        {"id": "cmt_001", "user_id": "user_001", "hours_per_day": "5", "effective_from": "2024-01-01"},
        {"id": "cmt_002", "user_id": "user_001", "hours_per_day": "6", "effective_from": "2024-03-01"}
    ]);
    let (_, result) = post_report(request).await;

    // Fri 2023-12-01, Thu 2024-02-15, Fri 2024-03-15
    assert_eq!(day(&result, "2023-12-01")["committed_minutes"], 480);
    assert_eq!(day(&result, "2024-02-15")["committed_minutes"], 300);
    assert_eq!(day(&result, "2024-03-15")["committed_minutes"], 360);
}

#[tokio::test]
async fn test_holiday_overrides_active_commitment() {
    let mut request = create_request(custom("2024-06-10", "2024-06-16"), vec![]);
    request["holidays"] = json!([
        {"id": "hol_001", "user_id": "user_001", "date": "2024-06-12", "title": "Company day"}
    ]);
    request["commitment_history"] = json!([
        {"id": "cmt_001", "user_id": "user_001", "hours_per_day": "6", "effective_from": "2024-01-01"}
    ]);
    let (_, result) = post_report(request).await;

    let wednesday = day(&result, "2024-06-12");
    assert_eq!(wednesday["committed_minutes"], 0);
    assert_eq!(wednesday["status"], "holiday");
    assert_eq!(wednesday["is_holiday"], true);

    let summary = &result["summary"];
    assert_eq!(summary["working_days"], 4);
    assert_eq!(summary["holidays"], 1);
    assert_eq!(summary["off_days"], 2);
    assert_eq!(summary["total_committed_minutes"], 4 * 360);
}

#[tokio::test]
async fn test_weekend_work_is_overtime_status_only() {
    let request = create_request(
        custom("2024-06-15", "2024-06-15"),
        vec![session("att_001", "2024-06-15", "10:00", Some("12:00"))],
    );
    let (_, result) = post_report(request).await;

    let saturday = day(&result, "2024-06-15");
    assert_eq!(saturday["status"], "overtime");
    assert_eq!(saturday["worked_minutes"], 120);
    assert_eq!(saturday["overtime_minutes"], 0);
    assert_eq!(saturday["is_off_day"], true);
    assert_eq!(result["summary"]["off_days"], 1);
}

// =============================================================================
// Rounding
// =============================================================================

#[tokio::test]
async fn test_rounding_rules() {
    let sessions = vec![session("att_001", "2024-06-10", "09:00", Some("17:03"))];

    let mut request = create_request(custom("2024-06-10", "2024-06-10"), sessions.clone());
    request["rounding"] = json!("5");
    let (_, result) = post_report(request).await;
    assert_eq!(day(&result, "2024-06-10")["worked_minutes"], 485);
    assert_eq!(result["rounding"], "5");

    let mut request = create_request(custom("2024-06-10", "2024-06-10"), sessions);
    request["rounding"] = json!("10");
    let (_, result) = post_report(request).await;
    assert_eq!(day(&result, "2024-06-10")["worked_minutes"], 480);
    assert_eq!(day(&result, "2024-06-10")["status"], "complete");
}

// =============================================================================
// Live projection
// =============================================================================

#[tokio::test]
async fn test_live_projection_adds_open_session() {
    let mut request = create_request(
        json!({"view": "daily"}),
        vec![
            session("att_001", "2024-06-12", "07:00", Some("08:00")),
            session("att_002", "2024-06-12", "09:00", None),
        ],
    );
    request["include_live"] = json!(true);
    let (_, result) = post_report(request).await;

    assert_eq!(result["live_minutes"], 90);
    let today = day(&result, "2024-06-12");
    assert_eq!(today["worked_minutes"], 150);
    assert_eq!(today["short_minutes"], 330);
    assert_eq!(result["summary"]["total_worked_minutes"], 150);
}

#[tokio::test]
async fn test_live_projection_off_by_default() {
    let request = create_request(
        json!({"view": "daily"}),
        vec![session("att_001", "2024-06-12", "09:00", None)],
    );
    let (_, result) = post_report(request).await;
    assert_eq!(result["live_minutes"], 0);
    assert_eq!(day(&result, "2024-06-12")["worked_minutes"], 0);
}

// =============================================================================
// Windows and diagnostics
// =============================================================================

#[tokio::test]
async fn test_monthly_window() {
    let (_, result) = post_report(create_request(json!({"view": "monthly"}), vec![])).await;
    let summary = &result["summary"];
    assert_eq!(summary["start_date"], "2024-06-01");
    assert_eq!(summary["end_date"], "2024-06-30");
    assert_eq!(summary["days"].as_array().unwrap().len(), 30);
    assert_eq!(summary["working_days"], 20);
    assert_eq!(summary["off_days"], 10);
}

#[tokio::test]
async fn test_inverted_custom_range_is_empty() {
    let (status, result) =
        post_report(create_request(custom("2024-06-14", "2024-06-10"), vec![])).await;
    assert_eq!(status, StatusCode::OK);
    assert!(result["summary"]["days"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_warnings_reported() {
    let mut request = create_request(
        json!({"view": "weekly"}),
        vec![
            session("att_001", "2024-06-10", "09:00", None),
            session("att_002", "2024-06-11", "09:00", Some("12:00")),
            session("att_003", "2024-06-11", "11:00", Some("13:00")),
        ],
    );
    request["commitment_history"] = json!([
        {"id": "cmt_a", "user_id": "user_001", "hours_per_day": "4", "effective_from": "2024-05-01"},
        {"id": "cmt_b", "user_id": "user_001", "hours_per_day": "7", "effective_from": "2024-05-01"}
    ]);
    let (_, result) = post_report(request).await;

    let codes: Vec<&str> = result["warnings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["code"].as_str().unwrap())
        .collect();
    assert_eq!(
        codes,
        vec!["AMBIGUOUS_COMMITMENT", "STALE_OPEN_SESSION", "OVERLAPPING_SESSIONS"]
    );
    // The first listed entry is used
    assert_eq!(day(&result, "2024-06-13")["committed_minutes"], 240);
}

// =============================================================================
// Export
// =============================================================================

#[tokio::test]
async fn test_export_rows() {
    let mut morning = session("att_001", "2024-06-10", "08:30", Some("12:00"));
    morning["notes"] = json!("standup");
    let request = create_request(
        custom("2024-06-10", "2024-06-11"),
        vec![morning, session("att_002", "2024-06-10", "13:00", Some("17:45"))],
    );
    let (status, rows) = post(create_router_for_test(), "/export", request).await;

    assert_eq!(status, StatusCode::OK);
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["check_in"], "08:30");
    assert_eq!(rows[0]["check_out"], "17:45");
    assert_eq!(
        decimal(rows[0]["worked_hours"].as_str().unwrap()),
        decimal("8.25")
    );
    assert_eq!(rows[0]["status"], "overtime");
    assert_eq!(rows[0]["notes"], "standup");
    assert_eq!(rows[1]["check_in"], Value::Null);
    assert_eq!(rows[1]["status"], "short");
}

// =============================================================================
// Error cases
// =============================================================================

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/report")
                .header("Content-Type", "application/json")
                .body(Body::from("{invalid json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let error: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_missing_user_returns_validation_error() {
    let (status, error) = post_report(json!({"period": {"view": "daily"}})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
    assert!(error["message"].as_str().unwrap().contains("user"));
}

#[tokio::test]
async fn test_bad_session_time_returns_validation_error() {
    let request = create_request(
        json!({"view": "daily"}),
        vec![session("att_001", "2024-06-12", "9:00", Some("17:00"))],
    );
    let (status, error) = post_report(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_unknown_weekday_is_rejected() {
    let mut request = create_request(json!({"view": "daily"}), vec![]);
    request["user"]["weekly_off_days"] = json!(["Caturday"]);
    let (status, error) = post_report(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
    assert!(error["message"].as_str().unwrap().contains("Caturday"));
}

#[tokio::test]
async fn test_wrong_field_type_returns_validation_error() {
    let mut request = create_request(json!({"view": "daily"}), vec![]);
    request["include_live"] = json!("yes");
    let (status, error) = post_report(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
    assert!(error["message"].as_str().unwrap().contains("include_live"));
}

#[tokio::test]
async fn test_custom_range_over_default_limit_rejected() {
    // 2020-01-01 through 2024-12-31 is 1827 days; the shipped limit is 731
    let request = create_request(custom("2020-01-01", "2024-12-31"), vec![]);
    let (status, error) = post_report(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
    assert!(error["message"].as_str().unwrap().contains("731"));

    // Two full years fit
    let request = create_request(custom("2023-01-01", "2024-12-31"), vec![]);
    let (status, result) = post_report(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["summary"]["days"].as_array().unwrap().len(), 731);
}

#[tokio::test]
async fn test_commitment_over_24_hours_rejected() {
    let mut request = create_request(json!({"view": "daily"}), vec![]);
    request["commitment_history"] = json!([
        {"id": "cmt_001", "user_id": "user_001", "hours_per_day": "25", "effective_from": "2024-01-01"}
    ]);
    let (status, error) = post_report(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_COMMITMENT");
}

// =============================================================================
// Components working together
// =============================================================================

#[test]
fn test_ledger_sessions_feed_report() {
    let settings = ConfigLoader::load("./config/default").unwrap().settings().clone();
    let mut ledger = SessionLedger::new(settings);
    let today = make_date("2024-06-12");

    ledger.check_in("user_001", make_date("2024-06-10"), make_time("09:00")).unwrap();
    ledger.check_out("user_001", make_time("17:30")).unwrap();
    ledger
        .add_manual_entry(
            "user_001",
            make_date("2024-06-11"),
            make_time("09:00"),
            make_time("13:00"),
            Some("doctor".to_string()),
            today,
        )
        .unwrap();

    let user = User {
        id: "user_001".to_string(),
        name: "Ada".to_string(),
        committed_hours_per_day: decimal("8"),
        weekly_off_days: vec![Weekday::Sat, Weekday::Sun],
        timezone: "UTC".to_string(),
    };
    let summary = build_report_summary(
        "user_001",
        make_date("2024-06-10"),
        make_date("2024-06-11"),
        ledger.sessions(),
        &user,
        &[],
        &[],
        RoundingRule::None,
    );

    assert_eq!(summary.days[0].status, DayStatus::Overtime);
    assert_eq!(summary.days[1].status, DayStatus::Short);
    assert_eq!(summary.total_worked_minutes, 510 + 240);
    assert_eq!(summary.balance_minutes(), 30 - 240);
}

#[test]
fn test_outbox_persists_sessions_across_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("outbox.json");

    let mut ledger = SessionLedger::new(EngineSettings::default());
    let session = ledger
        .check_in("user_001", make_date("2024-06-12"), make_time("09:00"))
        .unwrap()
        .clone();

    let mut outbox: Outbox<AttendanceSession> = Outbox::new();
    outbox.enqueue(session.id.clone(), OperationKind::Attendance, session.clone());
    let closed = ledger.check_out("user_001", make_time("17:00")).unwrap().clone();
    assert!(!outbox.enqueue(closed.id.clone(), OperationKind::Attendance, closed.clone()));
    outbox.save(&path).unwrap();

    let mut restored: Outbox<AttendanceSession> = Outbox::load(&path).unwrap();
    assert_eq!(restored.len(), 1);

    let mut remote = Vec::new();
    let report = restored.replay(|op| -> Result<(), String> {
        remote.push(op.payload.clone());
        Ok(())
    });
    assert_eq!(report.applied, 1);
    assert_eq!(remote, vec![closed]);
    assert_eq!(remote[0].worked_minutes(), 480);
}
